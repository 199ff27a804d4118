//! Timers and wall-clock helpers that work in the browser and on the server.

use std::time::Duration;

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Local time of day as `HH:MM:SS`.
#[cfg(target_arch = "wasm32")]
pub fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Full page navigation, used after sign-in state changes.
pub fn redirect(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!(path, "redirect requested outside the browser");
}
