use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::AuthApi;
use crate::components::{error_alert, input_value, use_api_client, use_session};
use crate::error::StorageError;
use crate::identity::resolve_user_id;
use crate::route::{use_navigator, Route};
use crate::session::{Credentials, User};

const LOGIN_FAILED: &str = "Login failed. Check your username and password.";
const MISSING_FIELDS: &str = "Username and password are required.";
const SESSION_NOT_SAVED: &str = "Could not save your session. Check that browser storage is enabled.";

/// Exchanges the form input for credentials. Nothing is stored yet.
pub async fn submit_login<A: AuthApi>(
    api: &A,
    username: &str,
    password: &str,
) -> Result<Credentials, String> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS.to_string());
    }

    let response = api.login(username, password).await.map_err(|err| {
        log::error!("login failed for {username}: {err}");
        err.user_message(LOGIN_FAILED)
    })?;
    let id = resolve_user_id(response.user_id, &response.token);
    if id.is_none() {
        log::warn!("login response did not identify user {username}");
    }

    Ok(Credentials {
        token: response.token,
        user: User {
            id,
            username: username.to_string(),
        },
    })
}

/// Persists the credentials through `login` and names the view to land on.
pub fn finish_login(
    credentials: Credentials,
    login: impl FnOnce(Credentials) -> Result<(), StorageError>,
) -> Result<Route, String> {
    login(credentials).map_err(|err| {
        log::error!("{err}");
        SESSION_NOT_SAVED.to_string()
    })?;
    Ok(Route::PROTECTED_ROOT)
}

pub(super) fn auth_card(heading: &'static str, subtitle: &'static str, body: Html, footer: Html) -> Html {
    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{ heading }</h1>
                    <p class="text-sm text-muted-foreground mt-2">{ subtitle }</p>
                </div>
                { body }
                <div class="mt-6 text-center text-sm text-muted-foreground">{ footer }</div>
            </div>
        </div>
    }
}

pub(super) fn text_field(label: &'static str, kind: &'static str, value: &UseStateHandle<String>) -> Html {
    let oninput = {
        let value = value.clone();
        Callback::from(move |e: InputEvent| value.set(input_value(&e)))
    };
    html! {
        <div class="space-y-1">
            <label class="text-sm font-medium text-foreground">{ label }</label>
            <input
                type={kind}
                required={true}
                class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                value={(**value).clone()}
                oninput={oninput}
            />
        </div>
    }
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let api = use_api_client();
    let session = use_session();
    let navigator = use_navigator();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let loading = loading.clone();
            let username = (*username).clone();
            let password = (*password).clone();

            loading.set(true);
            error.set(None);
            spawn_local(async move {
                let landed = match submit_login(&api, &username, &password).await {
                    Ok(credentials) => finish_login(credentials, |credentials| match &session {
                        Some(session) => session.login(credentials),
                        None => Err(StorageError::Unavailable),
                    }),
                    Err(message) => Err(message),
                };
                loading.set(false);
                match landed {
                    Ok(route) => navigator.push(route),
                    Err(message) => error.set(Some(message)),
                }
            });
        })
    };

    let to_register = Callback::from(move |_| navigator.push(Route::Register));

    auth_card(
        "Welcome back",
        "Sign in to track your expenses.",
        html! {
            <form class="space-y-4" onsubmit={on_submit}>
                { error_alert(error.as_deref()) }
                { text_field("Username", "text", &username) }
                { text_field("Password", "password", &password) }
                <button
                    type="submit"
                    class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                    disabled={*loading}
                >
                    { if *loading { "Please wait..." } else { "Login" } }
                </button>
            </form>
        },
        html! {
            <>
                {"No account?"}
                <button class="ml-2 text-primary font-semibold" onclick={to_register}>{"Sign up"}</button>
            </>
        },
    )
}
