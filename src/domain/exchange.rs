//! Exchange identifiers and the paired exchange/adapter address lists.

use std::fmt;

use alloy_primitives::Address;

/// The trading venues a fund can enable.
///
/// Declaration order is the canonical registration order. Adapter
/// registration order is observable by on-chain consumers, so resolution
/// always walks [`ExchangeId::ALL`] rather than the caller's input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeId {
    OasisDex,
    KyberNetwork,
    ZeroExV2,
    ZeroExV3,
    MelonEngine,
}

impl ExchangeId {
    /// Every known exchange, in canonical registration order.
    pub const ALL: [ExchangeId; 5] = [
        ExchangeId::OasisDex,
        ExchangeId::KyberNetwork,
        ExchangeId::ZeroExV2,
        ExchangeId::ZeroExV3,
        ExchangeId::MelonEngine,
    ];

    /// Parse a configured identifier. Unknown names return `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "OasisDex" => Some(Self::OasisDex),
            "KyberNetwork" => Some(Self::KyberNetwork),
            "ZeroExV2" => Some(Self::ZeroExV2),
            "ZeroExV3" => Some(Self::ZeroExV3),
            "MelonEngine" => Some(Self::MelonEngine),
            _ => None,
        }
    }

    /// The canonical identifier string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OasisDex => "OasisDex",
            Self::KyberNetwork => "KyberNetwork",
            Self::ZeroExV2 => "ZeroExV2",
            Self::ZeroExV3 => "ZeroExV3",
            Self::MelonEngine => "MelonEngine",
        }
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parallel exchange and adapter address lists.
///
/// The i-th adapter is the adapter registered for the i-th exchange. The
/// lists can only grow through [`ExchangePairs::push`], which keeps the
/// positional correspondence intact by construction.
#[derive(Debug, Clone, Default)]
pub struct ExchangePairs {
    exchanges: Vec<Address>,
    adapters: Vec<Address>,
}

impl ExchangePairs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one exchange together with its adapter.
    pub fn push(&mut self, exchange: Address, adapter: Address) {
        self.exchanges.push(exchange);
        self.adapters.push(adapter);
    }

    #[must_use]
    pub fn exchanges(&self) -> &[Address] {
        &self.exchanges
    }

    #[must_use]
    pub fn adapters(&self) -> &[Address] {
        &self.adapters
    }

    /// Number of enabled venues. Zero is valid: a fund without trading.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Split into the two parallel lists.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Address>, Vec<Address>) {
        (self.exchanges, self.adapters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrips_canonical_names() {
        for id in ExchangeId::ALL {
            assert_eq!(ExchangeId::parse(id.as_str()), Some(id));
        }
    }

    #[test]
    fn parse_rejects_unknown_and_miscased_names() {
        assert_eq!(ExchangeId::parse("Foo"), None);
        assert_eq!(ExchangeId::parse("oasisdex"), None);
        assert_eq!(ExchangeId::parse(""), None);
    }

    #[test]
    fn pairs_stay_parallel() {
        let mut pairs = ExchangePairs::new();
        pairs.push(Address::repeat_byte(0x01), Address::repeat_byte(0x02));
        pairs.push(Address::repeat_byte(0x03), Address::repeat_byte(0x04));

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.exchanges().len(), pairs.adapters().len());
        assert_eq!(pairs.exchanges()[1], Address::repeat_byte(0x03));
        assert_eq!(pairs.adapters()[1], Address::repeat_byte(0x04));
    }

    #[test]
    fn empty_pairs_are_valid() {
        let pairs = ExchangePairs::new();
        assert!(pairs.is_empty());
        let (exchanges, adapters) = pairs.into_parts();
        assert!(exchanges.is_empty());
        assert!(adapters.is_empty());
    }
}
