//! Wire types for the expense API.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Expense => "Expense",
            TransactionKind::Income => "Income",
        }
    }

    pub fn sign(self) -> &'static str {
        match self {
            TransactionKind::Expense => "-",
            TransactionKind::Income => "+",
        }
    }

    /// Select-box values; anything unknown is treated as an expense.
    pub fn from_value(value: &str) -> Self {
        match value {
            "income" => TransactionKind::Income,
            _ => TransactionKind::Expense,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub amount: f64,
    pub date: DateTime<FixedOffset>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: Category,
}

impl Transaction {
    pub fn calendar_date(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionPage {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl TransactionPage {
    /// Missing or zero counters are read as page 1 of 1.
    pub fn normalized(mut self) -> Self {
        self.current_page = self.current_page.max(1);
        self.total_pages = self.total_pages.max(1);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionInput {
    pub amount: f64,
    pub description: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub category_id: u64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub category_id: Option<u64>,
    pub begin_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionQuery {
    pub page: u32,
    pub limit: u32,
    pub filter: TransactionFilter,
}

impl TransactionQuery {
    pub fn path(&self) -> String {
        let mut path = format!("/transactions?page={}&limit={}", self.page, self.limit);
        if let Some(category_id) = self.filter.category_id {
            path.push_str(&format!("&category_id={category_id}"));
        }
        if let Some(begin) = self.filter.begin_date {
            path.push_str(&format!("&begin_date={}", begin.format("%Y-%m-%d")));
        }
        if let Some(end) = self.filter.end_date {
            path.push_str(&format!("&end_date={}", end.format("%Y-%m-%d")));
        }
        path
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user_id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInput<'a> {
    pub name: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CategoryList {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryEnvelope {
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategorySummary {
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub total_amount: f64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SummaryResponse {
    #[serde(default)]
    pub summary: Vec<CategorySummary>,
}
