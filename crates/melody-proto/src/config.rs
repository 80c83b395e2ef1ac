use serde::{Deserialize, Serialize};

use super::platform;
use super::song::RecKind;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub user: UserConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Recommendations service endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Login URL and the loopback address the auth server redirects back to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_login_url")]
    pub login_url: String,
    #[serde(default = "default_callback_bind")]
    pub callback_bind: String,
    #[serde(default = "default_callback_port")]
    pub callback_port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// The service never tells us who the token belongs to, so the user id
    /// is plain configuration. `user123` matches the service's own default.
    #[serde(default = "default_user_id")]
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub default_kind: RecKind,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
            callback_bind: default_callback_bind(),
            callback_port: default_callback_port(),
        }
    }
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            id: default_user_id(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_kind: RecKind::default(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_login_url() -> String {
    "http://127.0.0.1:5000/login".to_string()
}

fn default_callback_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_callback_port() -> u16 {
    // The port the auth server is registered to redirect to.
    5173
}

fn default_user_id() -> String {
    "user123".to_string()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    /// Loopback address the callback listener binds, e.g. `127.0.0.1:5173`.
    pub fn callback_addr(&self) -> String {
        format!("{}:{}", self.auth.callback_bind, self.auth.callback_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
            user: UserConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
        assert!(config.auth.login_url.ends_with("/login"));
        assert_eq!(config.callback_addr(), "127.0.0.1:5173");
        assert_eq!(config.user.id, "user123");
        assert_eq!(config.ui.default_kind, RecKind::Hybrid);
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.api.base_url, config.api.base_url);
        assert_eq!(back.auth.callback_port, config.auth.callback_port);
        assert_eq!(back.ui.default_kind, config.ui.default_kind);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = toml::from_str("[user]\nid = \"someone\"\n").unwrap();
        assert_eq!(parsed.user.id, "someone");
        assert_eq!(parsed.api.base_url, default_base_url());
        assert_eq!(parsed.ui.default_kind, RecKind::Hybrid);
    }
}
