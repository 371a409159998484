//! Tab-wide session state.
//!
//! [`Session`] is the in-memory value shared through context. It only changes
//! by applying a [`SessionAction`], and the only producers of actions are the
//! three [`SessionStore`] operations, which keep `localStorage` in step.

use std::rc::Rc;

use yew::Reducible;

use crate::config::{TOKEN_KEY, USERNAME_KEY, USER_ID_KEY};
use crate::error::StorageError;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// `None` when neither the server nor the token said who this is.
    pub id: Option<u64>,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    is_authenticated: bool,
    user: Option<User>,
    token: Option<String>,
    is_loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            is_authenticated: false,
            user: None,
            token: None,
            is_loading: true,
        }
    }
}

impl Session {
    fn signed_in(credentials: Credentials) -> Self {
        Self {
            is_authenticated: true,
            user: Some(credentials.user),
            token: Some(credentials.token),
            is_loading: false,
        }
    }

    fn signed_out() -> Self {
        Self {
            is_loading: false,
            ..Self::default()
        }
    }

    /// Only meaningful once [`Session::is_loading`] is false.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.username.as_str())
    }

    pub fn apply(&self, action: SessionAction) -> Self {
        match action {
            SessionAction::Restored(_) if !self.is_loading => {
                log::debug!("session already restored, ignoring");
                self.clone()
            }
            SessionAction::Restored(Some(credentials)) | SessionAction::LoggedIn(credentials) => {
                Self::signed_in(credentials)
            }
            SessionAction::Restored(None) | SessionAction::LoggedOut => Self::signed_out(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Restored(Option<Credentials>),
    LoggedIn(Credentials),
    LoggedOut,
}

impl Reducible for Session {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn KeyValueStore>,
}

impl PartialEq for SessionStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage)
    }
}

impl SessionStore {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    fn read(&self) -> Result<Option<Credentials>, StorageError> {
        let token = self.storage.get(TOKEN_KEY)?;
        let username = self.storage.get(USERNAME_KEY)?;
        let user_id = self.storage.get(USER_ID_KEY)?;
        let (Some(token), Some(username), Some(user_id)) = (token, username, user_id) else {
            return Ok(None);
        };

        let id = if user_id.is_empty() {
            None
        } else {
            match user_id.parse::<u64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    log::warn!("stored user id {user_id:?} is not a number, ignoring stored session");
                    return Ok(None);
                }
            }
        };

        Ok(Some(Credentials {
            token,
            user: User { id, username },
        }))
    }

    /// Reads the persisted session. Called once per page load.
    pub fn restore(&self) -> SessionAction {
        match self.read() {
            Ok(credentials) => {
                log::info!("session restored (authenticated: {})", credentials.is_some());
                SessionAction::Restored(credentials)
            }
            Err(err) => {
                log::error!("could not read stored session: {err}");
                SessionAction::Restored(None)
            }
        }
    }

    /// Persists all three fields. On failure nothing stays written and no
    /// action is produced, so memory keeps matching storage.
    pub fn login(&self, credentials: Credentials) -> Result<SessionAction, StorageError> {
        let user_id = credentials.user.id.map(|id| id.to_string()).unwrap_or_default();
        let written = self
            .storage
            .set(TOKEN_KEY, &credentials.token)
            .and_then(|_| self.storage.set(USERNAME_KEY, &credentials.user.username))
            .and_then(|_| self.storage.set(USER_ID_KEY, &user_id));

        if let Err(err) = written {
            log::error!("could not persist session: {err}");
            self.remove_all();
            return Err(err);
        }

        log::info!("logged in as {}", credentials.user.username);
        Ok(SessionAction::LoggedIn(credentials))
    }

    pub fn logout(&self) -> SessionAction {
        self.remove_all();
        log::info!("logged out");
        SessionAction::LoggedOut
    }

    fn remove_all(&self) {
        for key in [TOKEN_KEY, USERNAME_KEY, USER_ID_KEY] {
            if let Err(err) = self.storage.remove(key) {
                log::error!("{err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn alice() -> Credentials {
        Credentials {
            token: "abc123".into(),
            user: User {
                id: Some(7),
                username: "alice".into(),
            },
        }
    }

    fn store_with(memory: &Rc<MemoryStore>) -> SessionStore {
        SessionStore::new(memory.clone())
    }

    #[test]
    fn starts_loading_and_unauthenticated() {
        let session = Session::default();
        assert!(session.is_loading);
        assert!(!session.is_authenticated);
        assert_eq!(session.user, None);
        assert_eq!(session.token, None);
    }

    #[test]
    fn restore_with_all_three_entries_authenticates() {
        let memory = Rc::new(MemoryStore::with_entries(&[
            ("token", "abc123"),
            ("user", "alice"),
            ("userId", "7"),
        ]));
        let session = Session::default().apply(store_with(&memory).restore());

        assert_eq!(session, Session::default().apply(SessionAction::LoggedIn(alice())));
        assert!(!session.is_loading);
    }

    #[test]
    fn restore_with_missing_entry_stays_signed_out() {
        let memory = Rc::new(MemoryStore::with_entries(&[("token", "abc123"), ("user", "alice")]));
        let session = Session::default().apply(store_with(&memory).restore());

        assert!(!session.is_loading);
        assert!(!session.is_authenticated);
        assert_eq!(session.token, None);
    }

    #[test]
    fn restore_rejects_garbage_user_id_and_accepts_unknown_one() {
        let memory = Rc::new(MemoryStore::with_entries(&[
            ("token", "abc123"),
            ("user", "alice"),
            ("userId", "NaN"),
        ]));
        assert_eq!(store_with(&memory).restore(), SessionAction::Restored(None));

        let memory = Rc::new(MemoryStore::with_entries(&[
            ("token", "abc123"),
            ("user", "alice"),
            ("userId", ""),
        ]));
        let session = Session::default().apply(store_with(&memory).restore());
        assert!(session.is_authenticated);
        assert_eq!(session.user.and_then(|user| user.id), None);
    }

    #[test]
    fn restore_failure_still_finishes_loading() {
        let store = SessionStore::new(Rc::new(MemoryStore::unavailable()));
        let session = Session::default().apply(store.restore());
        assert!(!session.is_loading);
        assert!(!session.is_authenticated);
    }

    #[test]
    fn restore_only_applies_once() {
        let signed_out = Session::default().apply(SessionAction::Restored(None));
        let again = signed_out.apply(SessionAction::Restored(Some(alice())));
        assert_eq!(again, signed_out);
    }

    #[test]
    fn login_writes_storage_then_memory() {
        let memory = Rc::new(MemoryStore::new());
        let store = store_with(&memory);
        let action = store.login(alice()).unwrap();
        let session = Session::default().apply(SessionAction::Restored(None)).apply(action);

        assert_eq!(memory.value("token").as_deref(), Some("abc123"));
        assert_eq!(memory.value("user").as_deref(), Some("alice"));
        assert_eq!(memory.value("userId").as_deref(), Some("7"));
        assert!(session.is_authenticated);
        assert_eq!(session.token.as_deref(), Some("abc123"));
        assert_eq!(session.username(), Some("alice"));
    }

    #[test]
    fn failed_login_write_rolls_back() {
        let memory = Rc::new(MemoryStore::failing_writes_to("userId"));
        let store = store_with(&memory);

        assert!(store.login(alice()).is_err());
        assert!(memory.is_empty());
    }

    #[test]
    fn login_then_logout_clears_storage_and_memory() {
        let memory = Rc::new(MemoryStore::new());
        let store = store_with(&memory);

        let mut session = Session::default().apply(store.restore());
        for _ in 0..3 {
            session = session.apply(store.login(alice()).unwrap());
            session = session.apply(store.logout());
        }

        assert!(memory.is_empty());
        assert_eq!(session, Session::default().apply(SessionAction::Restored(None)));
    }

    #[test]
    fn authenticated_exactly_when_token_and_user_present() {
        let actions = [
            SessionAction::Restored(None),
            SessionAction::Restored(Some(alice())),
            SessionAction::LoggedIn(alice()),
            SessionAction::LoggedOut,
        ];
        for first in &actions {
            for second in &actions {
                let session = Session::default().apply(first.clone()).apply(second.clone());
                assert_eq!(
                    session.is_authenticated(),
                    session.token.is_some() && session.user.is_some(),
                    "{first:?} then {second:?}"
                );
                assert!(!session.is_loading());
            }
        }
    }

    #[test]
    fn reducer_matches_apply() {
        let reduced = Rc::new(Session::default()).reduce(SessionAction::LoggedIn(alice()));
        assert_eq!(*reduced, Session::default().apply(SessionAction::LoggedIn(alice())));
    }
}
