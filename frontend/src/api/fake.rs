//! In-memory API used by view tests. Records every call it receives.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use chrono::{DateTime, NaiveDate};

use super::models::{
    Category, CategorySummary, LoginResponse, RegisterResponse, Transaction, TransactionInput,
    TransactionKind, TransactionPage, TransactionQuery,
};
use super::{AuthApi, CategoryApi, SummaryApi, TransactionApi};
use crate::error::ApiError;

#[derive(Default)]
pub struct FakeApi {
    calls: RefCell<Vec<String>>,
    failure: RefCell<Option<ApiError>>,
    pub categories: RefCell<Vec<Category>>,
    pub referenced_categories: RefCell<HashSet<u64>>,
    next_id: Cell<u64>,
    pub pages: RefCell<Vec<Vec<Transaction>>>,
    pub login_response: RefCell<Option<LoginResponse>>,
    pub summary: RefCell<Vec<CategorySummary>>,
}

impl FakeApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.next_id.set(100);
        api
    }

    pub fn with_categories(names: &[&str]) -> Self {
        let api = Self::new();
        *api.categories.borrow_mut() = names
            .iter()
            .enumerate()
            .map(|(i, name)| category(i as u64 + 1, name))
            .collect();
        api
    }

    /// The next call fails with `err`.
    pub fn fail_next(&self, err: ApiError) {
        *self.failure.borrow_mut() = Some(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: impl Into<String>) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call.into());
        match self.failure.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn category(id: u64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
    }
}

pub fn transaction(id: u64, amount: f64, category: Category) -> Transaction {
    Transaction {
        id,
        amount,
        date: DateTime::parse_from_rfc3339("2024-03-05T00:00:00Z").unwrap(),
        description: Some(format!("transaction {id}")),
        kind: TransactionKind::Expense,
        category,
    }
}

pub fn server_error(status: u16, message: &str) -> ApiError {
    ApiError::Api {
        status,
        message: Some(message.to_string()),
    }
}

impl AuthApi for FakeApi {
    async fn register(&self, username: &str, _password: &str) -> Result<RegisterResponse, ApiError> {
        self.record(format!("POST /register {username}"))?;
        Ok(RegisterResponse {
            message: Some("User registered".into()),
        })
    }

    async fn login(&self, username: &str, _password: &str) -> Result<LoginResponse, ApiError> {
        self.record(format!("POST /login {username}"))?;
        self.login_response
            .borrow()
            .clone()
            .ok_or_else(|| server_error(401, "Invalid username or password"))
    }
}

impl CategoryApi for FakeApi {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.record("GET /categories")?;
        Ok(self.categories.borrow().clone())
    }

    async fn create_category(&self, name: &str) -> Result<Category, ApiError> {
        self.record(format!("POST /categories {name}"))?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let created = category(id, name);
        self.categories.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn update_category(&self, id: u64, name: &str) -> Result<Category, ApiError> {
        self.record(format!("PUT /categories/{id} {name}"))?;
        let mut categories = self.categories.borrow_mut();
        let existing = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| server_error(404, "Category not found"))?;
        existing.name = name.to_string();
        Ok(existing.clone())
    }

    async fn delete_category(&self, id: u64) -> Result<(), ApiError> {
        self.record(format!("DELETE /categories/{id}"))?;
        if self.referenced_categories.borrow().contains(&id) {
            return Err(server_error(409, "Category is used by existing transactions"));
        }
        self.categories.borrow_mut().retain(|c| c.id != id);
        Ok(())
    }
}

impl TransactionApi for FakeApi {
    async fn list_transactions(&self, query: &TransactionQuery) -> Result<TransactionPage, ApiError> {
        self.record(format!("GET {}", query.path()))?;
        let pages = self.pages.borrow();
        let index = query.page.saturating_sub(1) as usize;
        Ok(TransactionPage {
            transactions: pages.get(index).cloned().unwrap_or_default(),
            current_page: query.page,
            total_pages: pages.len() as u32,
        }
        .normalized())
    }

    async fn create_transaction(&self, input: &TransactionInput) -> Result<(), ApiError> {
        self.record(format!("POST /transactions {}", input.amount))
    }

    async fn update_transaction(&self, id: u64, input: &TransactionInput) -> Result<(), ApiError> {
        self.record(format!("PUT /transactions/{id} {}", input.amount))
    }

    async fn delete_transaction(&self, id: u64) -> Result<(), ApiError> {
        self.record(format!("DELETE /transactions/{id}"))
    }
}

impl SummaryApi for FakeApi {
    async fn daily_summary(&self, date: NaiveDate) -> Result<Vec<CategorySummary>, ApiError> {
        self.record(format!("GET /summary/daily {date}"))?;
        Ok(self.summary.borrow().clone())
    }

    async fn period_summary(
        &self,
        begin: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CategorySummary>, ApiError> {
        self.record(format!("GET /summary/period {begin} {end}"))?;
        Ok(self.summary.borrow().clone())
    }
}
