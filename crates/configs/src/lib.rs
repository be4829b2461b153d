use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

/// Backend address used when neither the config file nor `OFAC_BASE_URL` provide one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8084";
pub const BASE_URL_ENV: &str = "OFAC_BASE_URL";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub status_policy: StatusPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            user_agent: default_user_agent(),
            status_policy: StatusPolicy::default(),
        }
    }
}

/// How a response's HTTP status is treated before the body is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StatusPolicy {
    /// Decode every body regardless of status; a JSON error payload comes back as data.
    #[default]
    Passthrough,
    /// Non-2xx responses become errors without decoding.
    RequireSuccess,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_user_agent() -> String {
    format!("ofac-client/{}", env!("CARGO_PKG_VERSION"))
}
fn default_log_format() -> String { "compact".to_string() }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

/// Like [`load_from_file`], but a missing file yields the defaults.
pub fn load_or_default(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(anyhow!("cannot read {path}: {e}")),
    }
}

impl AppConfig {
    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.client.normalize_from_env();
        self.client.normalize();
        self.client.validate()?;
        Ok(())
    }
}

impl ClientConfig {
    pub fn normalize_from_env(&mut self) {
        self.normalize_with(|key| std::env::var(key).ok());
    }

    /// Fill an empty `base_url` from `lookup(OFAC_BASE_URL)`.
    pub fn normalize_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.base_url.trim().is_empty() {
            if let Some(url) = lookup(BASE_URL_ENV) {
                self.base_url = url;
            }
        }
    }

    fn normalize(&mut self) {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        self.base_url = if trimmed.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        if self.user_agent.trim().is_empty() {
            self.user_agent = default_user_agent();
        }
    }

    pub fn validate(&self) -> Result<()> {
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("client.base_url must start with http:// or https://"));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| anyhow!("client.base_url is not a valid URL: {e}"))?;
        Ok(())
    }

    /// Config for a specific backend, already normalized.
    pub fn for_base_url(base_url: &str) -> Self {
        let mut cfg = Self { base_url: base_url.to_string(), ..Self::default() };
        cfg.normalize();
        cfg
    }
}
