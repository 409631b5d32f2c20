use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Runtime configuration for the client: where the API lives and whether to
/// answer from the in-memory mock instead of the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub use_mocks: bool,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, use_mocks: bool) -> Self {
        Self {
            api_url: api_url.into(),
            use_mocks,
        }
    }

    /// Read `API_URL` and `USE_MOCKS` from the environment, falling back to
    /// the local development defaults.
    pub fn from_env() -> Self {
        let api_url = env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let use_mocks = env::var("USE_MOCKS")
            .map(|value| value == "true")
            .unwrap_or(false);
        Self { api_url, use_mocks }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(!config.use_mocks);
    }

    #[test]
    fn test_explicit_config() {
        let config = ClientConfig::new("https://api.example.com/v1", true);
        assert_eq!(config.api_url, "https://api.example.com/v1");
        assert!(config.use_mocks);
    }
}
