//! Deployment address registry.
//!
//! The registry is produced by the protocol deployment tooling as a JSON
//! document, grouped by protocol family. Each family carries an `addr` map
//! from logical contract name to on-chain address:
//!
//! ```json
//! {
//!   "melon": { "addr": { "Version": "0x..", "ManagementFee": "0x.." } },
//!   "tokens": { "addr": { "WETH": "0x..", "MLN": "0x.." } },
//!   "oasis": { "addr": { "OasisDexExchange": "0x.." } }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use alloy_primitives::Address;
use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Contract addresses for one protocol family.
#[derive(Debug, Default, Deserialize)]
pub struct AddressBook {
    #[serde(default)]
    pub addr: BTreeMap<String, Address>,
}

impl AddressBook {
    /// Look up a contract by logical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Address> {
        self.addr.get(name).copied()
    }

    /// Look up a contract by logical name, failing if absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownContract`] if the name is not present.
    pub fn require(&self, name: &str) -> Result<Address> {
        self.get(name).ok_or_else(|| {
            ConfigError::UnknownContract {
                name: name.to_string(),
            }
            .into()
        })
    }
}

/// The full address registry for one network deployment.
#[derive(Debug, Default, Deserialize)]
pub struct Deployment {
    /// Core protocol contracts: fund factory, fee modules, adapters.
    #[serde(default)]
    pub melon: AddressBook,
    /// Token symbol to address map.
    #[serde(default)]
    pub tokens: AddressBook,
    #[serde(default)]
    pub oasis: AddressBook,
    #[serde(default)]
    pub kyber: AddressBook,
    #[serde(default, rename = "zeroExV2")]
    pub zero_ex_v2: AddressBook,
    #[serde(default, rename = "zeroExV3")]
    pub zero_ex_v3: AddressBook,
}

impl Deployment {
    /// Load the registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadDeployment)?;
        Self::parse_json(&content)
    }

    /// Parse the registry from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn parse_json(content: &str) -> Result<Self> {
        let deployment = serde_json::from_str(content).map_err(ConfigError::ParseDeployment)?;
        Ok(deployment)
    }

    /// Resolve a token symbol to its address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownToken`] if the symbol is not registered.
    pub fn token(&self, symbol: &str) -> Result<Address> {
        self.tokens.get(symbol).ok_or_else(|| {
            ConfigError::UnknownToken {
                symbol: symbol.to_string(),
            }
            .into()
        })
    }
}
