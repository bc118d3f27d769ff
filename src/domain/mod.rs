//! Exchange-agnostic value types for fund provisioning.

pub mod exchange;
pub mod request;
pub mod units;

pub use exchange::{ExchangeId, ExchangePairs};
pub use request::{ProvisioningRequest, WrapperHandle, FEE_PERIOD_SECS};

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced while building domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("fund name is {0} bytes, the on-chain limit is 32")]
    NameTooLong(usize),

    #[error("amount {0} is negative")]
    Negative(Decimal),

    #[error("fee rate {0} exceeds 1.0")]
    RateAboveOne(Decimal),

    #[error("amount {0} is not representable in 18 decimal places")]
    NotRepresentable(Decimal),

    #[error("amount {0} overflows the fixed-point range")]
    Overflow(Decimal),
}
