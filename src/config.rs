//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. The keystore passphrase is the
//! only secret and is taken from the `KEYSTORE_PASSPHRASE` environment
//! variable when set, falling back to the configured passphrase file. It is
//! never written back out or logged.

use std::path::{Path, PathBuf};

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use crate::error::{ConfigError, Result};

/// Environment variable consulted for the keystore passphrase.
pub const PASSPHRASE_ENV: &str = "KEYSTORE_PASSPHRASE";

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub fund: FundConfig,
    pub wallet: WalletConfig,
    #[serde(default)]
    pub provisioner: ProvisionerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Target network and registry location.
#[derive(Debug, Deserialize)]
pub struct NetworkConfig {
    /// HTTP JSON-RPC endpoint.
    pub endpoint: String,
    /// Network name, passed through to the wrapper provisioner.
    pub name: String,
    /// Path to the deployment address registry (JSON).
    pub deployment_file: PathBuf,
}

/// The fund being provisioned.
#[derive(Debug, Deserialize)]
pub struct FundConfig {
    /// Fund name, at most 32 bytes of UTF-8.
    pub name: String,
    /// Symbol of the quote/denomination token, resolved via the registry.
    pub quote_token: String,
    /// Symbols of the assets the fund may hold.
    pub allowed_tokens: Vec<String>,
    /// Management fee as a decimal fraction, e.g. "0.02".
    #[serde(with = "rust_decimal::serde::str")]
    pub management_fee: Decimal,
    /// Performance fee as a decimal fraction, e.g. "0.20".
    #[serde(with = "rust_decimal::serde::str")]
    pub performance_fee: Decimal,
    /// Exchange identifiers to enable for trading.
    #[serde(default)]
    pub exchanges: Vec<String>,
}

/// Wallet configuration for signing setup transactions.
///
/// The passphrase is loaded from `KEYSTORE_PASSPHRASE` or the passphrase
/// file at runtime, never from the config file itself.
#[derive(Debug, Deserialize)]
pub struct WalletConfig {
    /// Address expected to sign and pay for every setup transaction.
    pub sender: Address,
    /// Path to the encrypted keystore JSON.
    pub keystore_path: PathBuf,
    /// Path to a file holding the keystore passphrase.
    #[serde(default)]
    pub passphrase_file: Option<PathBuf>,
    /// Passphrase from the environment, if set.
    #[serde(skip)]
    pub passphrase: Option<String>,
}

/// Tunables for the provisioning sequence.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProvisionerConfig {
    /// Gas limit applied to every setup transaction.
    pub gas_limit: u64,
    /// Protocol surcharge paid with each privileged call, in ether.
    #[serde(with = "rust_decimal::serde::str")]
    pub amgu_ether: Decimal,
    /// Blocks to wait before a transaction counts as confirmed.
    pub confirmations: u64,
    /// Where resume state is persisted between runs.
    pub state_file: PathBuf,
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            gas_limit: 8_000_000,
            amgu_ether: Decimal::ONE,
            confirmations: 1,
            state_file: PathBuf::from("fundctl.state.json"),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if
    /// validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.wallet.passphrase = std::env::var(PASSPHRASE_ENV).ok();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        Url::parse(&self.network.endpoint).map_err(|e| ConfigError::InvalidValue {
            field: "endpoint",
            reason: e.to_string(),
        })?;

        if self.network.name.is_empty() {
            return Err(ConfigError::MissingField { field: "name" }.into());
        }

        if self.fund.name.is_empty() {
            return Err(ConfigError::MissingField { field: "fund.name" }.into());
        }
        if self.fund.name.len() > 32 {
            return Err(ConfigError::InvalidValue {
                field: "fund.name",
                reason: format!("{} bytes exceeds the 32 byte limit", self.fund.name.len()),
            }
            .into());
        }

        if self.provisioner.gas_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gas_limit",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        if self.provisioner.confirmations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "confirmations",
                reason: "must be at least 1".into(),
            }
            .into());
        }

        Ok(())
    }
}
