use allot_calculator::Normalizer;
use allot_types::{ContractCounters, DEFAULT_DECIMALS, FixedPointAmount};
use serde::Deserialize;
use std::fs;
use std::io;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "allot.toml";
pub const DEFAULT_RPC_URL: &str = "https://eth.llamarpc.com";
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x4d058e2849a7bab450b8eb3c9941064e5abec551";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read configuration file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration value for {setting}: {message}")]
    Invalid { setting: &'static str, message: String },
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ChainConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_contract_address")]
    pub contract_address: String,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            contract_address: default_contract_address(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl ChainConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct PrecisionConfig {
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

impl Default for PrecisionConfig {
    fn default() -> Self {
        Self { decimals: default_decimals() }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct DisplayConfig {
    /// Render amounts as whole units, dropping the fraction.
    #[serde(default)]
    pub whole_units_only: bool,
    /// Sale-token price in quote units, as a decimal string.
    #[serde(default = "default_token_price")]
    pub token_price: String,
    #[serde(default = "default_token_symbol")]
    pub token_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            whole_units_only: false,
            token_price: default_token_price(),
            token_symbol: default_token_symbol(),
        }
    }
}

/// Service configuration.
///
/// When `counters` is set the service answers from those fixed values and
/// never contacts the chain.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct AllotConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub precision: PrecisionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub counters: Option<ContractCounters>,
}

impl AllotConfig {
    /// Reads the file named by `ALLOT_CONFIG_PATH` (default `allot.toml`),
    /// falling back to built-in defaults when it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("ALLOT_CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        match fs::read_to_string(config_path) {
            Ok(config_str) => Self::from_toml_str(&config_str),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!("Configuration file '{}' not found. Using default configuration.", config_path);
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path: config_path.to_string(), source }),
        }
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `ALLOT_*` environment overrides.
    pub fn apply_profile(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    /// Values that do not parse are ignored with a warning.
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup("ALLOT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("ALLOT_PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %port, "Ignoring invalid ALLOT_PORT"),
            }
        }
        if let Some(rpc_url) = lookup("ALLOT_RPC_URL") {
            self.chain.rpc_url = rpc_url;
        }
        if let Some(address) = lookup("ALLOT_CONTRACT_ADDRESS") {
            self.chain.contract_address = address;
        }
        if let Some(timeout) = lookup("ALLOT_RPC_TIMEOUT_SECONDS") {
            match timeout.parse::<u64>() {
                Ok(seconds) => self.chain.request_timeout_seconds = seconds,
                Err(_) => warn!(value = %timeout, "Ignoring invalid ALLOT_RPC_TIMEOUT_SECONDS"),
            }
        }
        if let Some(price) = lookup("ALLOT_TOKEN_PRICE") {
            self.display.token_price = price;
        }
        if let Some(decimals) = lookup("ALLOT_DECIMALS") {
            match decimals.parse::<u8>() {
                Ok(decimals) => self.precision.decimals = decimals,
                Err(_) => warn!(value = %decimals, "Ignoring invalid ALLOT_DECIMALS"),
            }
        }

        self.validate()?;
        info!(
            rpc_url = %self.chain.rpc_url,
            contract = %self.chain.contract_address,
            decimals = self.precision.decimals,
            static_counters = self.counters.is_some(),
            "Configuration loaded"
        );
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.normalizer()?;
        self.token_price()?;

        let address = &self.chain.contract_address;
        let hex = address.strip_prefix("0x").unwrap_or_default();
        if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::Invalid {
                setting: "chain.contract_address",
                message: format!("'{address}' is not a 0x-prefixed 20-byte hex address"),
            });
        }
        if self.chain.request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                setting: "chain.request_timeout_seconds",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn normalizer(&self) -> Result<Normalizer, ConfigError> {
        Normalizer::new(self.precision.decimals).map_err(|err| ConfigError::Invalid {
            setting: "precision.decimals",
            message: err.to_string(),
        })
    }

    /// The sale-token price at the configured precision. Must be above zero.
    pub fn token_price(&self) -> Result<FixedPointAmount, ConfigError> {
        let invalid = |message: String| ConfigError::Invalid { setting: "display.token_price", message };
        let price = self
            .normalizer()?
            .decimal_string(&self.display.token_price)
            .map_err(|err| invalid(err.to_string()))?;
        if price.is_zero() {
            return Err(invalid(format!("'{}' must be above zero", self.display.token_price)));
        }
        Ok(price)
    }

    /// Forces whole-unit rendering when `whole` is set; otherwise keeps the
    /// configured choice.
    pub fn with_whole_units(mut self, whole: bool) -> Self {
        self.display.whole_units_only |= whole;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_contract_address() -> String {
    DEFAULT_CONTRACT_ADDRESS.to_string()
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

fn default_token_price() -> String {
    "0.05".to_string()
}

fn default_token_symbol() -> String {
    "XPL".to_string()
}
