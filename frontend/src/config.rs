/// Base endpoint used when `EXPENSE_TRACKER_API_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Transactions are always requested ten at a time.
pub const PAGE_SIZE: u32 = 10;

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "user";
pub const USER_ID_KEY: &str = "userId";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::with_base_url(option_env!("EXPENSE_TRACKER_API_URL"))
    }

    fn with_base_url(base_url: Option<&str>) -> Self {
        match base_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Self {
                api_base_url: url.trim_end_matches('/').to_string(),
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_base_url() {
        assert_eq!(AppConfig::with_base_url(None).api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(AppConfig::with_base_url(Some("  ")).api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn strips_trailing_slash_from_override() {
        let config = AppConfig::with_base_url(Some("https://money.example.com/api/"));
        assert_eq!(config.api_base_url, "https://money.example.com/api");
    }
}
