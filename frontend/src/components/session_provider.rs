use yew::prelude::*;

use crate::error::StorageError;
use crate::session::{Credentials, Session, SessionStore};

/// Read access to the session plus its two mutators.
#[derive(Clone)]
pub struct SessionHandle {
    state: UseReducerHandle<Session>,
    store: SessionStore,
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl SessionHandle {
    pub fn session(&self) -> &Session {
        &self.state
    }

    pub fn login(&self, credentials: Credentials) -> Result<(), StorageError> {
        let action = self.store.login(credentials)?;
        self.state.dispatch(action);
        Ok(())
    }

    pub fn logout(&self) {
        self.state.dispatch(self.store.logout());
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub store: SessionStore,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let state = use_reducer(Session::default);

    {
        let state = state.clone();
        let store = props.store.clone();
        use_effect_with_deps(
            move |_| {
                state.dispatch(store.restore());
                || ()
            },
            (),
        );
    }

    let handle = SessionHandle {
        state,
        store: props.store.clone(),
    };

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            { for props.children.iter() }
        </ContextProvider<SessionHandle>>
    }
}

#[hook]
pub fn use_session() -> Option<SessionHandle> {
    use_context::<SessionHandle>()
}
