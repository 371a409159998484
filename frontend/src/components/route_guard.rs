use yew::prelude::*;

use super::session_provider::use_session;
use crate::route::{use_navigator, Route};
use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Redirecting,
    Authorized,
}

impl GuardState {
    pub fn of(session: &Session) -> Self {
        Self::from_flags(session.is_loading(), session.is_authenticated())
    }

    fn from_flags(is_loading: bool, is_authenticated: bool) -> Self {
        if is_loading {
            GuardState::Loading
        } else if is_authenticated {
            GuardState::Authorized
        } else {
            GuardState::Redirecting
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct RouteGuardProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(RouteGuard)]
pub fn route_guard(props: &RouteGuardProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let state = session
        .as_ref()
        .map(|handle| GuardState::of(handle.session()))
        .unwrap_or(GuardState::Loading);

    use_effect_with_deps(
        move |state| {
            if *state == GuardState::Redirecting {
                navigator.push(Route::Login);
            }
            || ()
        },
        state,
    );

    match state {
        GuardState::Loading => html! {
            <div class="min-h-screen flex items-center justify-center bg-background text-muted-foreground">
                {"Loading..."}
            </div>
        },
        GuardState::Redirecting => html! {},
        GuardState::Authorized => html! { <>{ for props.children.iter() }</> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Credentials, SessionAction, User};

    fn credentials() -> Credentials {
        Credentials {
            token: "abc123".into(),
            user: User {
                id: Some(1),
                username: "alice".into(),
            },
        }
    }

    #[test]
    fn loading_wins_regardless_of_authentication() {
        assert_eq!(GuardState::of(&Session::default()), GuardState::Loading);
        assert_eq!(GuardState::from_flags(true, false), GuardState::Loading);
        assert_eq!(GuardState::from_flags(true, true), GuardState::Loading);
    }

    #[test]
    fn restored_sessions_resolve_to_redirect_or_children() {
        let signed_out = Session::default().apply(SessionAction::Restored(None));
        assert_eq!(GuardState::of(&signed_out), GuardState::Redirecting);

        let signed_in = Session::default().apply(SessionAction::Restored(Some(credentials())));
        assert_eq!(GuardState::of(&signed_in), GuardState::Authorized);

        let logged_out = signed_in.apply(SessionAction::LoggedOut);
        assert_eq!(GuardState::of(&logged_out), GuardState::Redirecting);
    }
}
