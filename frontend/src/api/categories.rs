use super::models::{Category, CategoryEnvelope, CategoryInput, CategoryList};
use super::ApiClient;
use crate::error::ApiError;

#[allow(async_fn_in_trait)]
pub trait CategoryApi {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;
    async fn create_category(&self, name: &str) -> Result<Category, ApiError>;
    async fn update_category(&self, id: u64, name: &str) -> Result<Category, ApiError>;
    /// Rejected by the server while transactions still reference the category.
    async fn delete_category(&self, id: u64) -> Result<(), ApiError>;
}

impl CategoryApi for ApiClient {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = self.send(self.get("/categories")).await?;
        let list: CategoryList = Self::decode(response).await?;
        Ok(list.categories)
    }

    async fn create_category(&self, name: &str) -> Result<Category, ApiError> {
        let response = self
            .send_json(self.post("/categories"), &CategoryInput { name })
            .await?;
        let envelope: CategoryEnvelope = Self::decode(response).await?;
        Ok(envelope.category)
    }

    async fn update_category(&self, id: u64, name: &str) -> Result<Category, ApiError> {
        let response = self
            .send_json(self.put(&format!("/categories/{id}")), &CategoryInput { name })
            .await?;
        let envelope: CategoryEnvelope = Self::decode(response).await?;
        Ok(envelope.category)
    }

    async fn delete_category(&self, id: u64) -> Result<(), ApiError> {
        self.send(self.delete(&format!("/categories/{id}"))).await?;
        Ok(())
    }
}
