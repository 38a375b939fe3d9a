use crate::{
    models::app_state::AppState,
    pages::{DirectoryPage, ErrorPage, LoginPage, SignUpPage},
};
use shared::login::{Navigator, Screen};
use strum::EnumIter;
use tracing::debug;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

/// The app routes
#[derive(Debug, Clone, PartialEq, Routable, EnumIter)]
pub enum Route {
    #[at("/")]
    Root,
    #[at("/login")]
    Login,
    #[at("/sign-up")]
    SignUp,
    #[at("/directory")]
    Directory,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<Screen> for Route {
    fn from(screen: Screen) -> Self {
        match screen {
            Screen::Login => Route::Login,
            Screen::SignUp => Route::SignUp,
            Screen::Directory => Route::Directory,
        }
    }
}

/// [`Navigator`] over the browser history.
///
/// Browser history cannot be cleared, so a reset replaces the current entry.
#[derive(Clone, PartialEq)]
pub struct RouterNavigator {
    inner: yew_router::navigator::Navigator,
}

impl RouterNavigator {
    #[must_use]
    pub fn new(inner: yew_router::navigator::Navigator) -> Self {
        Self { inner }
    }
}

impl std::fmt::Debug for RouterNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterNavigator").finish_non_exhaustive()
    }
}

impl Navigator for RouterNavigator {
    fn navigate(&self, screen: Screen) {
        self.inner.push(&Route::from(screen));
    }

    fn reset_to(&self, screen: Screen) {
        self.inner.replace(&Route::from(screen));
    }
}

#[derive(Properties, PartialEq)]
pub struct RouteViewProps {
    pub route: Route,
}

#[function_component(RouteView)]
fn route_view(props: &RouteViewProps) -> Html {
    let signed_in = use_selector(|state: &AppState| state.session.is_some());

    match props.route {
        Route::Root | Route::Login => {
            if *signed_in {
                html! { <Redirect<Route> to={Route::Directory} /> }
            } else {
                html! { <LoginPage /> }
            }
        }
        Route::SignUp => html! { <SignUpPage /> },
        Route::Directory => html! { <DirectoryPage /> },
        Route::NotFound => html! { <ErrorPage /> },
    }
}

/// Switch function for the app routes.
pub fn switch(route: Route) -> Html {
    debug!(?route, "switching route");
    html! { <RouteView {route} /> }
}
