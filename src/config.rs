use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::net::TcpListener;

/// Server settings. Every field is optional in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 8000,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl Config {
    /// Reads a JSON config file, or returns the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Config::from_json(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    fn from_json(text: &str) -> Result<Config> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Config {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Binds the listen socket. `host` may be an IP literal or a hostname.
    pub async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("binding {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file() {
        let config = Config::from_json(r#"{ "port": 9000 }"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.body_limit_bytes, 1024 * 1024);
    }

    #[test]
    fn test_unknown_field() {
        assert!(Config::from_json(r#"{ "prot": 9000 }"#).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some("0.0.0.0".into()), Some(9100));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9100);
    }

    #[tokio::test]
    async fn test_bind_hostname() {
        let config = Config::default().with_overrides(Some("localhost".into()), Some(0));
        let listener = config.bind().await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/lessonsheet.json"))).unwrap_err();
        assert!(err.to_string().contains("reading config file"));
    }
}
