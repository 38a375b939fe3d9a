//! Evently web client: login, sign-up and directory screens rendered with Yew.

mod api;
mod app;
mod components;
mod config;
mod models;
mod pages;
mod routes;

use app::App;
use tracing_subscriber::{
    EnvFilter, fmt::format::Pretty, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};
use tracing_web::{MakeWebConsoleWriter, performance_layer};
use yew::Renderer;

/// Routes `tracing` events to the browser console.
fn init_tracing() {
    let level = option_env!("EVENTLY_LOG_LEVEL").unwrap_or("info");
    let filter = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());
    let perf_layer = performance_layer().with_details_from_fields(Pretty::default());

    tracing_subscriber::registry()
        .with(perf_layer)
        .with(filter)
        .with(fmt)
        .init();
}

fn main() {
    // Disable truncation of panic payloads to debug any panics
    std::panic::set_hook(Box::new(|info| {
        if let Some(s) = info.payload().downcast_ref::<String>() {
            web_sys::console::log_1(&format!("Panic: {s}").into());
        } else if let Some(s) = info.payload().downcast_ref::<&str>() {
            web_sys::console::log_1(&format!("Panic: {s}").into());
        } else {
            web_sys::console::log_1(&"Unknown panic".into());
        }
        if let Some(location) = info.location() {
            web_sys::console::log_1(
                &format!(
                    "  at {}:{}:{}",
                    location.file(),
                    location.line(),
                    location.column()
                )
                .into(),
            );
        }
    }));

    init_tracing();
    tracing::info!("starting Evently");

    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        web_sys::console::error_1(&"no document body to mount into".into());
        return;
    };
    Renderer::<App>::with_root(body.into()).render();
}
