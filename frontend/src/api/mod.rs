//! HTTP access to the expense API.
//!
//! One [`ApiClient`] is built at startup and shared by context. Each resource
//! has its own trait so views can be driven by a fake in tests.

mod auth;
mod categories;
pub mod models;
mod summary;
mod transactions;

use std::rc::Rc;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{AppConfig, TOKEN_KEY};
use crate::error::{ApiError, StorageError};
use crate::storage::{KeyValueStore, LocalStore};

pub use auth::AuthApi;
pub use categories::CategoryApi;
pub use summary::SummaryApi;
pub use transactions::TransactionApi;

/// `Authorization` header value for the persisted token, if there is one.
///
/// Reads storage rather than the in-memory session so that requests issued
/// before the session has been restored are still authorized.
pub fn bearer_header(store: &dyn KeyValueStore) -> Result<Option<String>, StorageError> {
    Ok(store
        .get(TOKEN_KEY)?
        .filter(|token| !token.is_empty())
        .map(|token| format!("Bearer {token}")))
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    tokens: Rc<dyn KeyValueStore>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.base_url, &other.base_url) && Rc::ptr_eq(&self.tokens, &other.tokens)
    }
}

impl ApiClient {
    pub fn new(config: &AppConfig, tokens: Rc<dyn KeyValueStore>) -> Self {
        log::info!("API client bound to {}", config.api_base_url);
        Self {
            base_url: Rc::from(config.api_base_url.as_str()),
            tokens,
        }
    }

    /// Client backed by `localStorage`, for views rendered outside the provider tree.
    pub fn from_build_env() -> Self {
        Self::new(&AppConfig::from_build_env(), Rc::new(LocalStore))
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn authorization_header(&self) -> Result<Option<String>, ApiError> {
        Ok(bearer_header(self.tokens.as_ref())?)
    }

    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        match self.authorization_header() {
            Ok(Some(header)) => Ok(builder.header("Authorization", &header)),
            Ok(None) => Ok(builder),
            Err(err) => {
                log::error!("request not sent: {err}");
                Err(err)
            }
        }
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        Request::get(&self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        Request::post(&self.url(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        Request::put(&self.url(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        Request::delete(&self.url(path))
    }

    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = self
            .authorize(builder)?
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::dispatch(request).await
    }

    pub(crate) async fn send_json<B: Serialize>(
        &self,
        builder: RequestBuilder,
        body: &B,
    ) -> Result<Response, ApiError> {
        let request = self
            .authorize(builder)?
            .json(body)
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::dispatch(request).await
    }

    async fn dispatch(request: Request) -> Result<Response, ApiError> {
        let method = request.method();
        let url = request.url();
        let response = request.send().await.map_err(|e| {
            log::error!("{method:?} {url} failed: {e}");
            ApiError::Transport(e.to_string())
        })?;

        if response.ok() {
            log::debug!("{method:?} {url} -> {}", response.status());
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_response_body(status, &body);
        log::warn!("{method:?} {url} -> {err}");
        Err(err)
    }

    pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| {
            log::error!("could not decode {}: {e}", response.url());
            ApiError::Decode(e.to_string())
        })
    }
}

#[cfg(test)]
pub(crate) mod fake;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Credentials, SessionStore, User};
    use crate::storage::MemoryStore;

    fn client_over(memory: &Rc<MemoryStore>) -> ApiClient {
        ApiClient::new(&AppConfig::default(), memory.clone())
    }

    #[test]
    fn joins_base_url_and_path() {
        let client = client_over(&Rc::new(MemoryStore::new()));
        assert_eq!(client.url("/categories/3"), "http://localhost:8080/api/categories/3");
    }

    #[test]
    fn no_header_without_token() {
        let client = client_over(&Rc::new(MemoryStore::new()));
        assert_eq!(client.authorization_header(), Ok(None));

        let client = client_over(&Rc::new(MemoryStore::with_entries(&[("token", "")])));
        assert_eq!(client.authorization_header(), Ok(None));
    }

    #[test]
    fn bearer_header_follows_login_and_logout() {
        let memory = Rc::new(MemoryStore::new());
        let sessions = SessionStore::new(memory.clone());
        let client = client_over(&memory);

        sessions
            .login(Credentials {
                token: "abc123".into(),
                user: User {
                    id: None,
                    username: "alice".into(),
                },
            })
            .unwrap();
        for _ in 0..3 {
            assert_eq!(client.authorization_header(), Ok(Some("Bearer abc123".into())));
        }

        sessions.logout();
        assert_eq!(client.authorization_header(), Ok(None));
    }

    #[test]
    fn storage_failure_blocks_authorization() {
        let client = ApiClient::new(&AppConfig::default(), Rc::new(MemoryStore::unavailable()));
        assert_eq!(
            client.authorization_header(),
            Err(ApiError::Authorization(StorageError::Unavailable))
        );
    }

    #[test]
    fn clients_compare_by_identity() {
        let memory = Rc::new(MemoryStore::new());
        let client = client_over(&memory);
        assert!(client == client.clone());
        assert!(client != client_over(&memory));
    }
}
