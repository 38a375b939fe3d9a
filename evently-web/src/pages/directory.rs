use crate::{api, app::SessionContext, models::app_state::AppState, routes::Route};
use shared::auth::AuthEvent;
use tracing::error;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

/// Landing screen after sign-in or when continuing as a guest.
#[function_component(DirectoryPage)]
pub fn directory_page() -> Html {
    let session = use_selector(|state: &AppState| state.session.clone());
    let email = use_selector(|state: &AppState| state.email().map(ToString::to_string));
    let sessions = use_context::<SessionContext>();

    let on_sign_out = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(current) = (*session).clone() else {
                return;
            };
            let sessions = sessions.clone();
            spawn_local(async move {
                match api::shared_client() {
                    Ok(client) => {
                        if let Err(err) = client.sign_out(&current.access_token).await {
                            error!(error = %err, "sign-out request failed");
                        }
                    }
                    Err(err) => error!(error = %err, "auth client unavailable"),
                }
                // The local session ends either way.
                if let Some(sessions) = sessions {
                    sessions.hub.publish(AuthEvent::SignedOut);
                }
            });
        })
    };

    let greeting = match (&*session, &*email) {
        (Some(_), Some(email)) => format!("Signed in as {email}"),
        (Some(current), None) => format!("Signed in as {}", current.user.id),
        (None, _) => "Browsing as guest".to_string(),
    };

    html! {
        <div class="p-4 space-y-6">
            <h1 class="text-2xl font-bold">{"Events"}</h1>
            <p>{greeting}</p>
            if session.is_some() {
                <button class="btn btn-outline" onclick={on_sign_out}>{"Sign out"}</button>
            } else {
                <Link<Route> to={Route::Login} classes={classes!("link", "link-primary")}>
                    {"Sign in"}
                </Link<Route>>
            }
        </div>
    }
}
