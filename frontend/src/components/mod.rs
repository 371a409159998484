pub mod icons;
pub mod layout;
pub mod route_guard;
pub mod session_provider;

use yew::prelude::*;

use crate::api::ApiClient;

pub use layout::{error_alert, page_shell, success_alert, Layout};
pub use route_guard::RouteGuard;
pub use session_provider::{use_session, SessionProvider};

/// The shared client from context.
#[hook]
pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_else(ApiClient::from_build_env)
}

/// Blocking `window.confirm`; `false` when there is no window.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn input_value(e: &InputEvent) -> String {
    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
    input.value()
}

pub fn select_value(e: &Event) -> String {
    let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
    select.value()
}
