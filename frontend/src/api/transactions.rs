use super::models::{TransactionInput, TransactionPage, TransactionQuery};
use super::ApiClient;
use crate::error::ApiError;

#[allow(async_fn_in_trait)]
pub trait TransactionApi {
    async fn list_transactions(&self, query: &TransactionQuery) -> Result<TransactionPage, ApiError>;
    async fn create_transaction(&self, input: &TransactionInput) -> Result<(), ApiError>;
    async fn update_transaction(&self, id: u64, input: &TransactionInput) -> Result<(), ApiError>;
    async fn delete_transaction(&self, id: u64) -> Result<(), ApiError>;
}

// Create and update responses are not decoded: the view re-lists the
// current page afterwards, so the canonical rows come from there.
impl TransactionApi for ApiClient {
    async fn list_transactions(&self, query: &TransactionQuery) -> Result<TransactionPage, ApiError> {
        let response = self.send(self.get(&query.path())).await?;
        let page: TransactionPage = Self::decode(response).await?;
        Ok(page.normalized())
    }

    async fn create_transaction(&self, input: &TransactionInput) -> Result<(), ApiError> {
        self.send_json(self.post("/transactions"), input).await?;
        Ok(())
    }

    async fn update_transaction(&self, id: u64, input: &TransactionInput) -> Result<(), ApiError> {
        self.send_json(self.put(&format!("/transactions/{id}")), input)
            .await?;
        Ok(())
    }

    async fn delete_transaction(&self, id: u64) -> Result<(), ApiError> {
        self.send(self.delete(&format!("/transactions/{id}"))).await?;
        Ok(())
    }
}
