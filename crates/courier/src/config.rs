//! Gateway configuration.
//!
//! Layered with figment: built-in defaults, then a TOML file, then
//! environment variables prefixed `COURIER_` (nested keys separated by
//! `__`, e.g. `COURIER_POLL__TIMEOUT_SECS=25`).

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use courier_core::ParseMode;

use crate::bot::Settings;
use crate::poller::LongPoller;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "courier.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Figment(#[from] figment::Error),

    #[error("no bot token configured (set `token` or COURIER_TOKEN)")]
    MissingToken,
}

/// Top-level gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bot API token.
    pub token: String,
    /// Override of the platform API base URL.
    pub api_url: Option<String>,
    /// Run handlers inline on the dispatch loop.
    pub synchronous: bool,
    /// Raise tracing detail for every processed update.
    pub verbose: bool,
    /// Default parse mode for outgoing text.
    pub parse_mode: Option<ParseMode>,
    pub poll: PollConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Maximum updates per retrieval batch.
    pub limit: usize,
    /// Long-poll timeout in seconds.
    pub timeout_secs: u64,
    /// Capacity of the retrieval → dispatch queue.
    pub queue_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base log level when `RUST_LOG` is unset.
    pub level: String,
    /// Extra filter directives, e.g. `"courier=debug"`.
    pub directives: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: None,
            synchronous: false,
            verbose: false,
            parse_mode: None,
            poll: PollConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            limit: 100,
            timeout_secs: 10,
            queue_capacity: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            directives: Vec::new(),
        }
    }
}

impl GatewayConfig {
    /// Loads from `courier.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_file(CONFIG_FILE)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("COURIER_").split("__"))
            .extract()?;
        config.validate()
    }

    fn validate(mut self) -> Result<Self, ConfigError> {
        self.token = self.token.trim().to_string();
        if self.token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(self)
    }

    /// Converts into gateway [`Settings`].
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::new(&self.token);
        settings.api_url = self.api_url.clone();
        settings.synchronous = self.synchronous;
        settings.verbose = self.verbose;
        settings.parse_mode = self.parse_mode.unwrap_or_default();
        settings.queue_capacity = self.poll.queue_capacity;
        settings.poller = LongPoller::new(
            self.poll.limit,
            std::time::Duration::from_secs(self.poll.timeout_secs),
        );
        settings
    }
}
