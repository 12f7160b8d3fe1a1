use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// API root, e.g. "https://api.le-systeme-solaire.net/rest/"
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Catalog endpoint relative to `base_url`, including its query string
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Prefix for satellite detail requests; the satellite id is appended
    #[serde(default = "default_satellite_path")]
    pub satellite_path: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on in-flight satellite requests per body (0 = unbounded)
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Deadline for all satellite fetches of one body (0 = no deadline)
    #[serde(default = "default_body_timeout_secs")]
    pub body_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_base_url() -> String {
    "https://api.le-systeme-solaire.net/rest/".to_string()
}

fn default_catalog_path() -> String {
    "bodies?data=id,englishName,semimajorAxis,moons,moon,rel&filter%5B%5D=isPlanet,eq,true"
        .to_string()
}

fn default_satellite_path() -> String {
    "bodies/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_concurrent_requests() -> usize {
    16
}

fn default_body_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    format!("celestia/{}", env!("CARGO_PKG_VERSION"))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            catalog_path: default_catalog_path(),
            satellite_path: default_satellite_path(),
            request_timeout_secs: default_request_timeout_secs(),
            max_concurrent_requests: default_max_concurrent_requests(),
            body_timeout_secs: default_body_timeout_secs(),
            user_agent: default_user_agent(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

impl CatalogConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: CatalogConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn catalog_url(&self) -> String {
        join_url(&self.base_url, &self.catalog_path)
    }

    pub fn satellite_url(&self, satellite_id: &str) -> String {
        format!("{}{}", join_url(&self.base_url, &self.satellite_path), satellite_id)
    }
}

fn join_url(base: &str, path: &str) -> String {
    match (base.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", base, &path[1..]),
        (false, false) if !path.is_empty() => format!("{}/{}", base, path),
        _ => format!("{}{}", base, path),
    }
}

pub static CONFIG: OnceLock<CatalogConfig> = OnceLock::new();

/// Load the config at `path` into [`CONFIG`]. A missing file falls back to defaults.
pub fn read_config(path: impl AsRef<Path>) -> anyhow::Result<&'static CatalogConfig> {
    let path = path.as_ref();
    let config = if path.exists() {
        CatalogConfig::from_file(path)?
    } else {
        tracing::info!("Config file {} not found, using defaults", path.display());
        CatalogConfig::default()
    };

    Ok(CONFIG.get_or_init(|| config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://localhost:8080/api\"").unwrap();
        writeln!(file, "max_concurrent_requests = 4").unwrap();

        let config = CatalogConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.max_concurrent_requests, 4);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_concurrent_requests = \"many\"").unwrap();

        assert!(CatalogConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_urls_join_without_double_slash() {
        let config = CatalogConfig {
            base_url: "http://localhost:8080/api".to_string(),
            catalog_path: "/bodies?filter=planets".to_string(),
            satellite_path: "bodies/".to_string(),
            ..CatalogConfig::default()
        };

        assert_eq!(config.catalog_url(), "http://localhost:8080/api/bodies?filter=planets");
        assert_eq!(config.satellite_url("phobos"), "http://localhost:8080/api/bodies/phobos");
    }

    #[test]
    fn test_default_urls() {
        let config = CatalogConfig::default();
        assert!(config.catalog_url().starts_with("https://api.le-systeme-solaire.net/rest/bodies?"));
        assert_eq!(
            config.satellite_url("lune"),
            "https://api.le-systeme-solaire.net/rest/bodies/lune"
        );
    }
}
