use crate::routes::Route;
use yew::{Html, classes, function_component, html};
use yew_router::prelude::Link;

/// `ErrorPage` page component
#[function_component(ErrorPage)]
pub fn error_page() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center min-h-screen gap-4">
            <h1 class="text-2xl font-bold">{ "Page not found" }</h1>
            <Link<Route> to={Route::Login} classes={classes!("link", "link-primary")}>{ "Back to sign in" }</Link<Route>>
        </div>
    }
}
