use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::login::{auth_card, text_field};
use crate::api::AuthApi;
use crate::components::{error_alert, success_alert, use_api_client};
use crate::route::{use_navigator, Route};

const REGISTERED: &str = "Registration successful!";
const REGISTER_FAILED: &str = "Registration failed. Try a different username.";
const DUPLICATE_USER: &str = "A user with this name already exists.";
const MISSING_FIELDS: &str = "Username and password are required.";

/// Delay before the login view replaces the success message.
pub const REDIRECT_DELAY_MS: u32 = 1_500;

/// The success message to show, or the error to show instead.
pub async fn submit_registration<A: AuthApi>(
    api: &A,
    username: &str,
    password: &str,
) -> Result<String, String> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS.to_string());
    }

    match api.register(username, password).await {
        Ok(response) => {
            log::info!("registered {username}");
            Ok(response
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| REGISTERED.to_string()))
        }
        Err(err) => {
            log::error!("registration failed for {username}: {err}");
            match err.server_message() {
                Some(message) if message.to_lowercase().contains("unique constraint failed") => {
                    Err(DUPLICATE_USER.to_string())
                }
                _ => Err(err.user_message(REGISTER_FAILED)),
            }
        }
    }
}

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let api = use_api_client();
    let navigator = use_navigator();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let success = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let success = success.clone();
        let loading = loading.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let success = success.clone();
            let loading = loading.clone();
            let username = (*username).clone();
            let password = (*password).clone();

            loading.set(true);
            error.set(None);
            success.set(None);
            spawn_local(async move {
                let result = submit_registration(&api, &username, &password).await;
                loading.set(false);
                match result {
                    Ok(message) => {
                        success.set(Some(message));
                        TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                        navigator.push(Route::Login);
                    }
                    Err(message) => error.set(Some(message)),
                }
            });
        })
    };

    let to_login = Callback::from(move |_| navigator.push(Route::Login));

    auth_card(
        "Create account",
        "Start tracking where your money goes.",
        html! {
            <form class="space-y-4" onsubmit={on_submit}>
                { error_alert(error.as_deref()) }
                { success_alert(success.as_deref()) }
                { text_field("Username", "text", &username) }
                { text_field("Password", "password", &password) }
                <button
                    type="submit"
                    class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                    disabled={*loading}
                >
                    { if *loading { "Please wait..." } else { "Sign up" } }
                </button>
            </form>
        },
        html! {
            <>
                {"Already have an account?"}
                <button class="ml-2 text-primary font-semibold" onclick={to_login}>{"Login"}</button>
            </>
        },
    )
}
