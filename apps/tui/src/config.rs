use color_eyre::eyre::eyre;
use dotenv::dotenv;
use reqwest::Url;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8000/query";
pub const ENDPOINT_ENV_VAR: &str = "RAG_QUERY_ENDPOINT";
pub const LOG_FILE_ENV_VAR: &str = "RAG_QUERY_LOG_FILE";
const DEFAULT_LOG_FILE: &str = "rag-query-tui.log";

/// Settings injected into the answer service at construction time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint_url: Url,
}

impl ClientConfig {
    pub fn new(endpoint_url: &str) -> color_eyre::eyre::Result<Self> {
        let endpoint_url = Url::parse(endpoint_url.trim())
            .map_err(|e| eyre!("Invalid endpoint URL '{endpoint_url}': {e}"))?;

        if !matches!(endpoint_url.scheme(), "http" | "https") {
            return Err(eyre!(
                "Endpoint URL must use http or https, got '{}'",
                endpoint_url.scheme()
            ));
        }

        Ok(Self { endpoint_url })
    }
}

/// Initializes the application configuration
/// A command line value wins over `RAG_QUERY_ENDPOINT` (environment or `.env`),
/// which wins over the local development endpoint
pub fn init_app_config(cli_endpoint: Option<&str>) -> color_eyre::eyre::Result<ClientConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let endpoint = resolve_endpoint(cli_endpoint, env::var(ENDPOINT_ENV_VAR).ok().as_deref());
    ClientConfig::new(&endpoint)
}

fn resolve_endpoint(cli: Option<&str>, env: Option<&str>) -> String {
    [cli, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or(DEFAULT_ENDPOINT_URL)
        .to_string()
}

/// Gets the path diagnostics are written to
pub fn get_log_file() -> PathBuf {
    env::var(LOG_FILE_ENV_VAR).map_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_or_blank_sources_fall_back_to_default() -> color_eyre::eyre::Result<()> {
        assert_eq!(resolve_endpoint(None, None), DEFAULT_ENDPOINT_URL);
        assert_eq!(resolve_endpoint(Some(""), Some("   ")), DEFAULT_ENDPOINT_URL);

        let config = ClientConfig::new(&resolve_endpoint(None, None))?;
        assert_eq!(config.endpoint_url.as_str(), DEFAULT_ENDPOINT_URL);
        Ok(())
    }

    #[test]
    fn env_value_overrides_default() {
        assert_eq!(
            resolve_endpoint(None, Some(" http://rag.internal:9000/query ")),
            "http://rag.internal:9000/query"
        );
    }

    #[test]
    fn cli_value_overrides_env() {
        assert_eq!(
            resolve_endpoint(
                Some("http://127.0.0.1:9100/query"),
                Some("http://rag.internal:9000/query")
            ),
            "http://127.0.0.1:9100/query"
        );
        assert_eq!(
            resolve_endpoint(Some(" "), Some("http://rag.internal:9000/query")),
            "http://rag.internal:9000/query"
        );
    }

    #[test]
    fn init_prefers_cli_endpoint_over_environment() -> color_eyre::eyre::Result<()> {
        env::set_var(ENDPOINT_ENV_VAR, "http://rag.internal:9000/query");
        let from_cli = init_app_config(Some("http://127.0.0.1:9100/query"));
        let from_env = init_app_config(None);
        env::remove_var(ENDPOINT_ENV_VAR);

        assert_eq!(from_cli?.endpoint_url.as_str(), "http://127.0.0.1:9100/query");
        assert_eq!(from_env?.endpoint_url.as_str(), "http://rag.internal:9000/query");
        Ok(())
    }

    #[test]
    fn rejects_unusable_endpoints() {
        assert!(ClientConfig::new("not a url").is_err());
        assert!(ClientConfig::new("ftp://example.com/query").is_err());
        assert!(ClientConfig::new("https://example.com/query").is_ok());
    }
}
