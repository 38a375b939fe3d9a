use crate::routes::Route;
use yew::{Html, classes, function_component, html};
use yew_router::prelude::Link;

/// Registration lives with the auth provider's hosted flow; this screen only
/// points users back to sign in.
#[function_component(SignUpPage)]
pub fn sign_up_page() -> Html {
    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <div class="card-body">
                    <h2 class="card-title text-2xl">{"Sign up"}</h2>
                    <p>{"Account registration is not available in this client yet."}</p>
                    <Link<Route> to={Route::Login} classes={classes!("link", "link-primary", "text-center")}>
                        {"Already have an account? Sign in"}
                    </Link<Route>>
                </div>
            </div>
        </div>
    }
}
