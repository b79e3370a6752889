use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use thiserror::Error;

use crate::domain::entities::table::DEFAULT_PAGE_SIZE;

pub const API_BASE_URL_VAR: &str = "FLEET_API_BASE_URL";
pub const PAGE_SIZE_VAR: &str = "FLEET_PAGE_SIZE";
pub const SERVER_ADDR_VAR: &str = "FLEET_SERVER_ADDR";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3005";
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:3005";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidPageSize { var: &'static str, value: String },
    #[error("{var} must be a socket address like 127.0.0.1:3005, got {value:?}")]
    InvalidAddr { var: &'static str, value: String },
    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = non_empty(lookup(API_BASE_URL_VAR)) {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl {
                    var: API_BASE_URL_VAR,
                    value,
                });
            }
            config.api_base_url = value;
        }

        if let Some(value) = non_empty(lookup(PAGE_SIZE_VAR)) {
            config.page_size = match value.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidPageSize {
                        var: PAGE_SIZE_VAR,
                        value,
                    })
                }
            };
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = non_empty(lookup(SERVER_ADDR_VAR)).unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
        let bind_addr: SocketAddr = value.trim().parse().map_err(|_| ConfigError::InvalidAddr {
            var: SERVER_ADDR_VAR,
            value: value.clone(),
        })?;
        Ok(Self { bind_addr })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "fleet-console")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn client_defaults_to_localhost() {
        let config = ClientConfig::from_lookup(lookup(&[])).expect("defaults should load");
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:3005");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn client_reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_BASE_URL_VAR, "https://fleet.example"),
            (PAGE_SIZE_VAR, "5"),
        ]))
        .expect("overrides should load");
        assert_eq!(config.api_base_url, "https://fleet.example");
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn client_rejects_zero_page_size_and_bad_url() {
        let err = ClientConfig::from_lookup(lookup(&[(PAGE_SIZE_VAR, "0")]))
            .expect_err("zero page size should fail");
        assert!(err.to_string().contains(PAGE_SIZE_VAR));

        let err = ClientConfig::from_lookup(lookup(&[(API_BASE_URL_VAR, "localhost:3005")]))
            .expect_err("schemeless url should fail");
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn server_addr_defaults_and_validates() {
        let config = ServerConfig::from_lookup(lookup(&[])).expect("default addr should parse");
        assert_eq!(config.bind_addr.port(), 3005);

        let err = ServerConfig::from_lookup(lookup(&[(SERVER_ADDR_VAR, "nowhere")]))
            .expect_err("bad addr should fail");
        assert!(err.to_string().contains(SERVER_ADDR_VAR));
    }

    #[test]
    fn webview_dir_is_created_under_base() {
        let base = std::env::temp_dir().join(format!("fleet-console-webview-{}", std::process::id()));
        let dir = ensure_webview_data_dir(&base).expect("should create webview dir");
        assert!(dir.is_dir());
        assert!(dir.ends_with("webview2"));
        std::fs::remove_dir_all(&base).expect("should cleanup temp dir");
    }
}
