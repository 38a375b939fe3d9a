use std::rc::Rc;

use crate::{
    api::PageAuthClient, app::SessionContext, components::Loading, routes::RouterNavigator,
};
use shared::{auth::SessionHub, login::LoginController};
use tracing::warn;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::hooks::use_navigator;

type PageController = LoginController<PageAuthClient, RouterNavigator>;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let refresh = use_force_update();
    let sessions = use_context::<SessionContext>();
    let navigator = use_navigator();

    let controller = {
        let refresh = refresh.clone();
        use_memo((), move |()| {
            let navigator = navigator?;
            let hub = sessions.map_or_else(
                || {
                    warn!("login page mounted without a session hub");
                    Rc::new(SessionHub::new())
                },
                |sessions| sessions.hub,
            );
            let controller =
                PageController::new(PageAuthClient, RouterNavigator::new(navigator), hub);
            controller.set_on_change(move |_| refresh.force_update());
            Some(Rc::new(controller))
        })
    };

    {
        let controller = (*controller).clone();
        use_effect_with((), move |()| {
            move || {
                if let Some(controller) = controller {
                    controller.tear_down();
                }
            }
        });
    }

    let Some(controller) = (*controller).clone() else {
        return html! {
            <p class="text-error text-center" role="alert">{"Navigation is unavailable."}</p>
        };
    };

    let onsubmit = {
        let controller = Rc::clone(&controller);
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let controller = Rc::clone(&controller);
            spawn_local(async move {
                controller.submit().await;
            });
        })
    };

    let on_email_change = {
        let controller = Rc::clone(&controller);
        let refresh = refresh.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                controller.set_email(input.value());
                refresh.force_update();
            }
        })
    };

    let on_password_change = {
        let controller = Rc::clone(&controller);
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                controller.set_password(input.value());
                refresh.force_update();
            }
        })
    };

    let on_sign_up = {
        let controller = Rc::clone(&controller);
        Callback::from(move |_: MouseEvent| controller.go_to_sign_up())
    };

    let on_guest = {
        let controller = Rc::clone(&controller);
        Callback::from(move |_: MouseEvent| controller.continue_as_guest())
    };

    let email = controller.email();
    let password = controller.password();
    let error = controller.error_message();
    let busy = controller.is_submitting();
    let disable_submit = !controller.can_submit();

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" onsubmit={onsubmit}>
                    <h2 class="card-title text-2xl justify-center">{"Login"}</h2>
                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">{"Email"}</span>
                        </label>
                        <input
                            id="email"
                            class="input input-bordered"
                            type="email"
                            placeholder="Email"
                            autocapitalize="none"
                            autocorrect="off"
                            value={email}
                            oninput={on_email_change}
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{"Password"}</span>
                        </label>
                        <input
                            id="password"
                            class="input input-bordered"
                            type="password"
                            placeholder="Password"
                            autocapitalize="none"
                            autocorrect="off"
                            value={password}
                            oninput={on_password_change}
                        />
                    </div>
                    if let Some(message) = error {
                        <p class="text-error text-center" role="alert">{message}</p>
                    }
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={disable_submit}>
                            if busy {
                                <Loading label="Signing in..." />
                            } else {
                                {"Sign in"}
                            }
                        </button>
                    </div>
                    <button type="button" class="link link-primary text-center mt-3" onclick={on_sign_up}>
                        {"Don't have an account? Sign Up"}
                    </button>
                    <button type="button" class="link link-primary text-center mt-3" onclick={on_guest}>
                        {"Continue as guest"}
                    </button>
                </form>
            </div>
        </div>
    }
}
