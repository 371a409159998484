use chrono::NaiveDate;

use super::models::{CategorySummary, SummaryResponse};
use super::ApiClient;
use crate::error::ApiError;

/// Per-category totals computed by the server.
#[allow(async_fn_in_trait)]
pub trait SummaryApi {
    async fn daily_summary(&self, date: NaiveDate) -> Result<Vec<CategorySummary>, ApiError>;
    async fn period_summary(
        &self,
        begin: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CategorySummary>, ApiError>;
}

impl SummaryApi for ApiClient {
    async fn daily_summary(&self, date: NaiveDate) -> Result<Vec<CategorySummary>, ApiError> {
        let path = format!("/summary/daily?date={}", date.format("%Y-%m-%d"));
        let response = self.send(self.get(&path)).await?;
        let summary: SummaryResponse = Self::decode(response).await?;
        Ok(summary.summary)
    }

    async fn period_summary(
        &self,
        begin: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CategorySummary>, ApiError> {
        let path = format!(
            "/summary/period?begin_date={}&end_date={}",
            begin.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );
        let response = self.send(self.get(&path)).await?;
        let summary: SummaryResponse = Self::decode(response).await?;
        Ok(summary.summary)
    }
}
