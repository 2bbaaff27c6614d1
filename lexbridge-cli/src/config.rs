use crate::error::{CliError, CliResult};
use lexbridge_sparql::HttpMethod;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Connection file read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "login_info.json";

/// Path of the SPARQL endpoint relative to a wikibase root URL.
const WIKIBASE_QUERY_PATH: &str = "/query/sparql";

/// Endpoint settings from the connection file.
///
/// Any other keys in the file (OAuth tokens and the like) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Root URL of the wikibase, e.g. `https://wiki.example.org`.
    #[serde(default)]
    pub wiki_url: Option<String>,
    /// Explicit SPARQL endpoint. Defaults to `{wiki_url}/query/sparql`.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub method: Option<HttpMethod>,
    /// Seconds to pause after each response.
    #[serde(default)]
    pub sleep: Option<f64>,
}

/// Values from global CLI flags; each one that is set wins over the file.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub endpoint: Option<String>,
    pub user_agent: Option<String>,
    pub method: Option<HttpMethod>,
    pub sleep: Option<f64>,
}

impl ConnectionConfig {
    /// Apply CLI overrides on top of file values.
    pub fn with_overrides(mut self, overrides: ConnectionOverrides) -> Self {
        if overrides.endpoint.is_some() {
            self.endpoint = overrides.endpoint;
        }
        if overrides.user_agent.is_some() {
            self.user_agent = overrides.user_agent;
        }
        if overrides.method.is_some() {
            self.method = overrides.method;
        }
        if overrides.sleep.is_some() {
            self.sleep = overrides.sleep;
        }
        self
    }

    /// `wiki_url` without trailing slashes.
    pub fn wiki_url(&self) -> Option<&str> {
        self.wiki_url.as_deref().map(|u| u.trim_end_matches('/'))
    }

    /// The explicit endpoint, else the wikibase query service under `wiki_url`.
    /// `None` leaves the client's default in place.
    pub fn resolve_endpoint(&self) -> Option<String> {
        self.endpoint
            .clone()
            .or_else(|| self.wiki_url().map(|u| format!("{u}{WIKIBASE_QUERY_PATH}")))
    }
}

/// Load the connection file.
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] in the
/// working directory is used if present, otherwise an empty config.
pub fn load_config(path: Option<&Path>) -> CliResult<ConnectionConfig> {
    match path {
        Some(p) => read_config(p),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                read_config(default)
            } else {
                Ok(ConnectionConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> CliResult<ConnectionConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::Config(format!("invalid connection file {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_ignores_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("login_info.json");
        fs::write(
            &path,
            r#"{
                "wiki_url": "https://wiki.example.org/",
                "consumer_token": "ct",
                "consumer_secret": "cs",
                "access_token": "at",
                "access_secret": "as",
                "method": "get",
                "sleep": 0.5
            }"#,
        )
        .unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.wiki_url(), Some("https://wiki.example.org"));
        assert_eq!(config.method, Some(HttpMethod::Get));
        assert_eq!(config.sleep, Some(0.5));
        assert_eq!(
            config.resolve_endpoint().as_deref(),
            Some("https://wiki.example.org/query/sparql")
        );
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("nope.json").as_path())).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ wiki_url: ").unwrap();
        assert!(matches!(load_config(Some(path.as_path())), Err(CliError::Config(_))));
    }

    #[test]
    fn test_overrides_win() {
        let config = ConnectionConfig {
            wiki_url: Some("https://wiki.example.org".to_string()),
            user_agent: Some("file-agent".to_string()),
            sleep: Some(1.0),
            ..Default::default()
        }
        .with_overrides(ConnectionOverrides {
            endpoint: Some("http://localhost:9999/blazegraph/sparql".to_string()),
            sleep: Some(0.0),
            ..Default::default()
        });

        assert_eq!(
            config.resolve_endpoint().as_deref(),
            Some("http://localhost:9999/blazegraph/sparql")
        );
        assert_eq!(config.user_agent.as_deref(), Some("file-agent"));
        assert_eq!(config.sleep, Some(0.0));
    }

    #[test]
    fn test_no_endpoint_or_wiki_url() {
        assert_eq!(ConnectionConfig::default().resolve_endpoint(), None);
    }
}
