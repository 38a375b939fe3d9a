use std::rc::Rc;

use crate::models::app_state::AppState;
use crate::routes::{Route, RouterNavigator, switch};
use shared::auth::{AuthEvent, SessionHub, SessionObserver, SubscriptionId};
use yew::{ContextProvider, Html, Properties, function_component, html, use_context, use_effect_with, use_memo};
use yew_router::prelude::*;
use yewdux::prelude::use_store;

/// Shares the process-wide [`SessionHub`] with every page.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    pub hub: Rc<SessionHub>,
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.hub, &other.hub)
    }
}

/// Wires the hub to the store and to the router.
///
/// Subscriptions are dropped when the router goes away.
#[function_component(SessionBridge)]
fn session_bridge() -> Html {
    let sessions = use_context::<SessionContext>();
    let navigator = use_navigator();
    let (_state, dispatch) = use_store::<AppState>();

    use_effect_with((sessions, navigator), move |(sessions, navigator)| {
        let registered: Option<(Rc<SessionHub>, Vec<SubscriptionId>)> =
            match (sessions.clone(), navigator.clone()) {
                (Some(sessions), Some(navigator)) => {
                    let hub = sessions.hub;
                    // Store first so the landing page renders with the new session.
                    let store = hub.subscribe(Rc::new(move |event: &AuthEvent| {
                        dispatch.reduce_mut(|state| state.apply(event));
                    }));
                    let observer = hub.subscribe(Rc::new(SessionObserver::new(
                        RouterNavigator::new(navigator),
                    )));
                    Some((hub, vec![store, observer]))
                }
                _ => None,
            };

        move || {
            if let Some((hub, ids)) = registered {
                for id in ids {
                    hub.unsubscribe(id);
                }
            }
        }
    });

    html! {}
}

#[derive(Properties, PartialEq, Default)]
pub struct AppProps {
    #[prop_or_default]
    pub sessions: Option<SessionContext>,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let provided = props.sessions.clone();
    let sessions = use_memo((), move |_| provided.unwrap_or_default());

    html! {
        <ContextProvider<SessionContext> context={(*sessions).clone()}>
            <BrowserRouter>
                <SessionBridge />
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<SessionContext>>
    }
}
