//! Signing account acquisition.
//!
//! The sender account is derived once from an encrypted keystore. The
//! passphrase comes from the environment or a file and is dropped as soon
//! as the key is decrypted; neither it nor the derived key is ever logged.

use alloy_signer_local::PrivateKeySigner;

use crate::config::WalletConfig;
use crate::error::{ConfigError, Error, Result};

/// Decrypt the configured keystore into a local signer.
///
/// The keystore account must match the configured sender address.
///
/// # Errors
///
/// Returns an error if no passphrase source is configured, the passphrase
/// file is unreadable, decryption fails, or the decrypted account does not
/// match the configured sender.
pub fn unlock(config: &WalletConfig) -> Result<PrivateKeySigner> {
    let passphrase = match (&config.passphrase, &config.passphrase_file) {
        (Some(passphrase), _) => passphrase.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(Error::Io)?
            .trim()
            .to_string(),
        (None, None) => {
            return Err(ConfigError::MissingField {
                field: "passphrase_file",
            }
            .into())
        }
    };

    let signer = PrivateKeySigner::decrypt_keystore(&config.keystore_path, passphrase).map_err(
        |e| ConfigError::Keystore {
            reason: e.to_string(),
        },
    )?;

    if signer.address() != config.sender {
        return Err(ConfigError::SenderMismatch {
            expected: config.sender,
            actual: signer.address(),
        }
        .into());
    }

    Ok(signer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use alloy_primitives::Address;

    #[test]
    fn missing_passphrase_source_is_an_error() {
        let config = WalletConfig {
            sender: Address::repeat_byte(0x11),
            keystore_path: PathBuf::from("keystore.json"),
            passphrase_file: None,
            passphrase: None,
        };

        let result = unlock(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField {
                field: "passphrase_file"
            }))
        ));
    }

    #[test]
    fn unreadable_passphrase_file_is_an_error() {
        let config = WalletConfig {
            sender: Address::repeat_byte(0x11),
            keystore_path: PathBuf::from("keystore.json"),
            passphrase_file: Some(PathBuf::from("/nonexistent/passphrase.txt")),
            passphrase: None,
        };

        assert!(matches!(unlock(&config), Err(Error::Io(_))));
    }
}
