pub mod categories;
pub mod dashboard;
pub mod login;
pub mod register;
pub mod statistics;
pub mod transactions;

pub use categories::CategoriesPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use register::RegisterPage;
pub use statistics::StatisticsPage;
pub use transactions::TransactionsPage;

use chrono::NaiveDate;

/// The user's local calendar date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// What a list view shows for its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListDisplay {
    Loading,
    /// Nothing was loaded yet, so the error stands alone.
    ErrorOnly(String),
    /// The list, with the error above it when there is one.
    List { error: Option<String> },
}

pub fn list_display(loading: bool, is_empty: bool, error: Option<&str>) -> ListDisplay {
    match (error, is_empty) {
        (Some(error), true) if !loading => ListDisplay::ErrorOnly(error.to_string()),
        _ if loading && is_empty => ListDisplay::Loading,
        (error, _) => ListDisplay::List {
            error: error.map(str::to_string),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_replaces_empty_list_only() {
        assert_eq!(list_display(false, true, Some("boom")), ListDisplay::ErrorOnly("boom".into()));
        assert_eq!(
            list_display(false, false, Some("boom")),
            ListDisplay::List { error: Some("boom".into()) }
        );
    }

    #[test]
    fn loading_placeholder_only_when_nothing_to_show() {
        assert_eq!(list_display(true, true, None), ListDisplay::Loading);
        assert_eq!(list_display(true, false, None), ListDisplay::List { error: None });
        assert_eq!(list_display(false, true, None), ListDisplay::List { error: None });
    }
}
