use super::models::{AuthRequest, LoginResponse, RegisterResponse};
use super::ApiClient;
use crate::error::ApiError;

#[allow(async_fn_in_trait)]
pub trait AuthApi {
    async fn register(&self, username: &str, password: &str) -> Result<RegisterResponse, ApiError>;
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;
}

impl AuthApi for ApiClient {
    async fn register(&self, username: &str, password: &str) -> Result<RegisterResponse, ApiError> {
        let body = AuthRequest { username, password };
        let response = self.send_json(self.post("/register"), &body).await?;
        Self::decode(response).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = AuthRequest { username, password };
        let response = self.send_json(self.post("/login"), &body).await?;
        Self::decode(response).await
    }
}
