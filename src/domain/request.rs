//! The provisioning request and the wrapper handle it is built for.

use std::fmt;

use alloy_primitives::{Address, FixedBytes, U256};
use serde::{Deserialize, Serialize};

use super::exchange::ExchangePairs;
use super::DomainError;

/// Fee observation period applied to new funds: 90 days, in seconds.
pub const FEE_PERIOD_SECS: u64 = 90 * 24 * 60 * 60;

/// Reference to the fund's governance proxy on-chain.
///
/// Returned once by the wrapper provisioner and threaded unchanged through
/// every subsequent setup call. The proxy itself persists on-chain; this is
/// only a local handle for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WrapperHandle(Address);

impl WrapperHandle {
    #[must_use]
    pub const fn new(address: Address) -> Self {
        Self(address)
    }

    #[must_use]
    pub const fn address(self) -> Address {
        self.0
    }
}

impl fmt::Display for WrapperHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fee module addresses and their scaled rates.
#[derive(Debug, Clone, Copy)]
pub struct FeeSetup {
    pub management: Address,
    pub performance: Address,
    pub management_rate: U256,
    pub performance_rate: U256,
}

/// Everything needed to begin fund setup, built once per run.
///
/// The exchange and adapter lists are parallel and can only be supplied
/// together as [`ExchangePairs`], so their positional correspondence cannot
/// be broken after construction.
#[derive(Debug, Clone)]
pub struct ProvisioningRequest {
    name: FixedBytes<32>,
    fees: [Address; 2],
    fee_rates: [U256; 2],
    fee_periods: [U256; 2],
    exchanges: Vec<Address>,
    adapters: Vec<Address>,
    denomination_asset: Address,
    default_assets: Vec<Address>,
}

impl ProvisioningRequest {
    /// Build a request.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NameTooLong`] if the fund name does not fit
    /// in 32 bytes.
    pub fn new(
        name: &str,
        fees: FeeSetup,
        fee_period_secs: u64,
        pairs: ExchangePairs,
        denomination_asset: Address,
        default_assets: Vec<Address>,
    ) -> Result<Self, DomainError> {
        let (exchanges, adapters) = pairs.into_parts();
        Ok(Self {
            name: encode_fund_name(name)?,
            fees: [fees.management, fees.performance],
            fee_rates: [fees.management_rate, fees.performance_rate],
            fee_periods: [U256::ZERO, U256::from(fee_period_secs)],
            exchanges,
            adapters,
            denomination_asset,
            default_assets,
        })
    }

    #[must_use]
    pub const fn name(&self) -> FixedBytes<32> {
        self.name
    }

    /// Fee module addresses: management first, performance second.
    #[must_use]
    pub const fn fees(&self) -> &[Address; 2] {
        &self.fees
    }

    /// Scaled fee rates, parallel to [`ProvisioningRequest::fees`].
    #[must_use]
    pub const fn fee_rates(&self) -> &[U256; 2] {
        &self.fee_rates
    }

    /// Fee period bounds: start offset, then duration in seconds.
    #[must_use]
    pub const fn fee_periods(&self) -> &[U256; 2] {
        &self.fee_periods
    }

    #[must_use]
    pub fn exchanges(&self) -> &[Address] {
        &self.exchanges
    }

    #[must_use]
    pub fn adapters(&self) -> &[Address] {
        &self.adapters
    }

    #[must_use]
    pub const fn denomination_asset(&self) -> Address {
        self.denomination_asset
    }

    #[must_use]
    pub fn default_assets(&self) -> &[Address] {
        &self.default_assets
    }
}

/// Encode a fund name as the fixed-width on-chain representation.
///
/// UTF-8 bytes, right-padded with zeros to 32 bytes.
///
/// # Errors
///
/// Returns [`DomainError::NameTooLong`] if the name exceeds 32 bytes.
pub fn encode_fund_name(name: &str) -> Result<FixedBytes<32>, DomainError> {
    let bytes = name.as_bytes();
    if bytes.len() > 32 {
        return Err(DomainError::NameTooLong(bytes.len()));
    }
    let mut buf = [0u8; 32];
    buf[..bytes.len()].copy_from_slice(bytes);
    Ok(FixedBytes::from(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee_setup() -> FeeSetup {
        FeeSetup {
            management: Address::repeat_byte(0xaa),
            performance: Address::repeat_byte(0xbb),
            management_rate: U256::from(20_000_000_000_000_000u64),
            performance_rate: U256::from(200_000_000_000_000_000u64),
        }
    }

    #[test]
    fn encodes_name_zero_padded() {
        let encoded = encode_fund_name("My Fund").unwrap();
        assert_eq!(&encoded[..7], b"My Fund");
        assert!(encoded[7..].iter().all(|b| *b == 0));
    }

    #[test]
    fn encodes_exactly_32_bytes() {
        let name = "abcdefghijklmnopqrstuvwxyz123456";
        let encoded = encode_fund_name(name).unwrap();
        assert_eq!(&encoded[..], name.as_bytes());
    }

    #[test]
    fn rejects_name_over_32_bytes() {
        let result = encode_fund_name("a name well beyond the thirty-two byte limit");
        assert_eq!(result, Err(DomainError::NameTooLong(44)));
    }

    #[test]
    fn name_length_is_counted_in_bytes_not_chars() {
        // 17 chars, 34 bytes
        let result = encode_fund_name("äääääääääääääääää");
        assert_eq!(result, Err(DomainError::NameTooLong(34)));
    }

    #[test]
    fn request_carries_fee_period_bounds() {
        let request = ProvisioningRequest::new(
            "Test Fund",
            fee_setup(),
            FEE_PERIOD_SECS,
            ExchangePairs::new(),
            Address::repeat_byte(0x01),
            vec![Address::repeat_byte(0x01)],
        )
        .unwrap();

        assert_eq!(request.fee_periods()[0], U256::ZERO);
        assert_eq!(request.fee_periods()[1], U256::from(7_776_000u64));
    }

    #[test]
    fn request_keeps_pairs_parallel() {
        let mut pairs = ExchangePairs::new();
        pairs.push(Address::repeat_byte(0x11), Address::repeat_byte(0x21));
        pairs.push(Address::repeat_byte(0x12), Address::repeat_byte(0x22));

        let request = ProvisioningRequest::new(
            "Test Fund",
            fee_setup(),
            FEE_PERIOD_SECS,
            pairs,
            Address::repeat_byte(0x01),
            vec![],
        )
        .unwrap();

        assert_eq!(request.exchanges().len(), request.adapters().len());
        assert_eq!(request.exchanges()[0], Address::repeat_byte(0x11));
        assert_eq!(request.adapters()[0], Address::repeat_byte(0x21));
    }
}
