use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};
use crate::validation::{FileRules, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_PAGE_SIZE, DEFAULT_MAX_SIZE_MB};

/// Overrides `server_url` from the config file when set.
pub const SERVER_URL_ENV: &str = "MDAUDIT_SERVER_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub api_base_path: String,
    pub analyze_timeout_secs: u64,
    pub max_file_size_mb: f64,
    pub allowed_extensions: Vec<String>,
    pub page_size: u32,
    pub max_page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            api_base_path: "/api/v1".to_string(),
            analyze_timeout_secs: 30,
            max_file_size_mb: DEFAULT_MAX_SIZE_MB,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            page_size: 20,
            max_page_size: DEFAULT_MAX_PAGE_SIZE as u32,
        }
    }
}

impl Config {
    /// Loads the config file (or defaults when it does not exist) and
    /// applies environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_at(&Self::config_path()?)
    }

    /// Same as [`Config::load`] for a config file at `path`.
    pub fn load_at(path: &PathBuf) -> Result<Self> {
        let mut config = Self::load_from(path)?;
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::debug!(server_url = %url, "server url taken from {}", SERVER_URL_ENV);
                config.server_url = url;
            }
        }
        Ok(config)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| Error::Config("could not find home directory".into()))?
            .join(".mdaudit")
            .join("config.json"))
    }

    /// Root of the service, e.g. `http://localhost:8000`.
    pub fn server(&self) -> Result<Url> {
        let url = Url::parse(self.server_url.trim_end_matches('/'))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "server url must use http or https, got {}",
                url.scheme()
            )));
        }
        Ok(url)
    }

    pub fn analyze_timeout(&self) -> Duration {
        Duration::from_secs(self.analyze_timeout_secs)
    }

    pub fn file_rules(&self) -> FileRules {
        FileRules {
            allowed_extensions: self.allowed_extensions.clone(),
            max_size_mb: self.max_file_size_mb,
        }
    }

    /// Updates one setting from its textual form, as typed by the user.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parse_err = |what: &str| Error::Config(format!("{key}: expected {what}, got '{value}'"));
        match key {
            "server_url" | "server-url" => {
                let previous = std::mem::replace(&mut self.server_url, value.trim().to_string());
                if let Err(e) = self.server() {
                    self.server_url = previous;
                    return Err(e);
                }
            }
            "api_base_path" => {
                let path = value.trim().trim_end_matches('/');
                self.api_base_path = if path.starts_with('/') {
                    path.to_string()
                } else {
                    format!("/{path}")
                };
            }
            "analyze_timeout_secs" => {
                let secs: u64 = value.parse().map_err(|_| parse_err("seconds"))?;
                if secs == 0 {
                    return Err(parse_err("a positive number of seconds"));
                }
                self.analyze_timeout_secs = secs;
            }
            "max_file_size_mb" => {
                let mb: f64 = value.parse().map_err(|_| parse_err("a number"))?;
                if !(mb > 0.0) {
                    return Err(parse_err("a positive number"));
                }
                self.max_file_size_mb = mb;
            }
            "allowed_extensions" => {
                let exts: Vec<String> = value
                    .split(',')
                    .map(|e| e.trim().to_lowercase())
                    .filter(|e| !e.is_empty())
                    .map(|e| if e.starts_with('.') { e } else { format!(".{e}") })
                    .collect();
                if exts.is_empty() {
                    return Err(parse_err("a comma-separated extension list"));
                }
                self.allowed_extensions = exts;
            }
            "page_size" => {
                let size: u32 = value.parse().map_err(|_| parse_err("an integer"))?;
                if size == 0 || size > self.max_page_size {
                    return Err(parse_err(&format!("1..={}", self.max_page_size)));
                }
                self.page_size = size;
            }
            "max_page_size" => {
                let max: u32 = value.parse().map_err(|_| parse_err("an integer"))?;
                if max == 0 {
                    return Err(parse_err("a positive integer"));
                }
                self.max_page_size = max;
                self.page_size = self.page_size.min(max);
            }
            _ => return Err(Error::Config(format!("unknown setting '{key}'"))),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_limits() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://localhost:8000");
        assert_eq!(config.api_base_path, "/api/v1");
        assert_eq!(config.analyze_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_file_size_mb, 10.0);
        assert_eq!(config.allowed_extensions, vec![".md", ".txt", ".markdown"]);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.max_page_size, 100);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"server_url": "https://audit.example.com"}"#).unwrap();
        assert_eq!(config.server_url, "https://audit.example.com");
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = Config::default();
        config.set("page_size", "50").unwrap();
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().page_size, 50);
    }

    #[test]
    fn set_rejects_non_http_server() {
        let mut config = Config::default();
        assert!(config.set("server_url", "ftp://example.com").is_err());
        assert_eq!(config.server_url, "http://localhost:8000");
        config.set("server-url", "https://audit.example.com/").unwrap();
        assert_eq!(config.server().unwrap().as_str(), "https://audit.example.com/");
    }

    #[test]
    fn set_normalizes_extensions_and_paths() {
        let mut config = Config::default();
        config.set("allowed_extensions", "MD, txt,,.rst").unwrap();
        assert_eq!(config.allowed_extensions, vec![".md", ".txt", ".rst"]);
        config.set("api_base_path", "api/v2/").unwrap();
        assert_eq!(config.api_base_path, "/api/v2");
    }

    #[test]
    fn set_validates_numbers() {
        let mut config = Config::default();
        assert!(config.set("page_size", "0").is_err());
        assert!(config.set("page_size", "101").is_err());
        assert!(config.set("max_file_size_mb", "-1").is_err());
        assert!(config.set("analyze_timeout_secs", "soon").is_err());
        assert!(config.set("analyze_timeout_secs", "0").is_err());
        assert_eq!(config.analyze_timeout_secs, 30);
        config.set("analyze_timeout_secs", "90").unwrap();
        assert_eq!(config.analyze_timeout(), Duration::from_secs(90));
        assert!(config.set("colour", "blue").is_err());
        config.set("max_page_size", "10").unwrap();
        assert_eq!(config.page_size, 10);
    }
}
