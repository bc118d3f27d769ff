//! Resolution of raw configuration into a typed provisioning request.
//!
//! Both resolvers are pure: they read the parsed config and the deployment
//! registry and produce values, with no I/O and no retained state.

use alloy_primitives::Address;
use tracing::warn;

use crate::config::FundConfig;
use crate::deployment::Deployment;
use crate::domain::units::fee_rate_to_fixed_point;
use crate::domain::{ExchangeId, ExchangePairs, ProvisioningRequest, FEE_PERIOD_SECS};
use crate::domain::request::FeeSetup;
use crate::error::Result;

/// Build the provisioning request for a configured fund.
///
/// Token symbols are resolved against the registry; a missing quote or
/// allowed token is fatal. Fee fractions are scaled to the on-chain
/// fixed-point representation exactly.
///
/// # Errors
///
/// Returns an error if a token symbol or required contract is absent from
/// the registry, or a fee rate is out of range.
pub fn resolve_request(fund: &FundConfig, deployment: &Deployment) -> Result<ProvisioningRequest> {
    let denomination_asset = deployment.token(&fund.quote_token)?;
    let default_assets = fund
        .allowed_tokens
        .iter()
        .map(|symbol| deployment.token(symbol))
        .collect::<Result<Vec<Address>>>()?;

    let fees = FeeSetup {
        management: deployment.melon.require("ManagementFee")?,
        performance: deployment.melon.require("PerformanceFee")?,
        management_rate: fee_rate_to_fixed_point(fund.management_fee)
            .map_err(crate::error::Error::Domain)?,
        performance_rate: fee_rate_to_fixed_point(fund.performance_fee)
            .map_err(crate::error::Error::Domain)?,
    };

    let pairs = resolve_exchanges(&fund.exchanges, deployment)?;

    let request = ProvisioningRequest::new(
        &fund.name,
        fees,
        FEE_PERIOD_SECS,
        pairs,
        denomination_asset,
        default_assets,
    )
    .map_err(crate::error::Error::Domain)?;
    Ok(request)
}

/// Resolve selected exchange identifiers to paired exchange and adapter
/// addresses.
///
/// Known identifiers are emitted in canonical order regardless of how the
/// selection lists them; unknown identifiers are skipped with a warning.
/// An empty result is valid and describes a fund with no trading venues.
///
/// # Errors
///
/// Returns an error if a selected exchange is known but its contracts are
/// missing from the registry.
pub fn resolve_exchanges(selection: &[String], deployment: &Deployment) -> Result<ExchangePairs> {
    for name in selection {
        if ExchangeId::parse(name).is_none() {
            warn!(exchange = %name, "ignoring unknown exchange identifier");
        }
    }

    let mut pairs = ExchangePairs::new();
    for id in selected_ids(selection) {
        let (exchange, adapter) = exchange_contracts(id, deployment)?;
        pairs.push(exchange, adapter);
    }
    Ok(pairs)
}

/// Known identifiers present in the selection, in canonical order.
#[must_use]
pub fn selected_ids(selection: &[String]) -> Vec<ExchangeId> {
    ExchangeId::ALL
        .into_iter()
        .filter(|id| selection.iter().any(|name| name == id.as_str()))
        .collect()
}

/// The exchange contract and its adapter for one venue.
fn exchange_contracts(id: ExchangeId, deployment: &Deployment) -> Result<(Address, Address)> {
    let pair = match id {
        ExchangeId::OasisDex => (
            deployment.oasis.require("OasisDexExchange")?,
            deployment.melon.require("OasisDexAdapter")?,
        ),
        ExchangeId::KyberNetwork => (
            deployment.kyber.require("KyberNetworkProxy")?,
            deployment.melon.require("KyberAdapter")?,
        ),
        ExchangeId::ZeroExV2 => (
            deployment.zero_ex_v2.require("ZeroExV2Exchange")?,
            deployment.melon.require("ZeroExV2Adapter")?,
        ),
        ExchangeId::ZeroExV3 => (
            deployment.zero_ex_v3.require("ZeroExV3Exchange")?,
            deployment.melon.require("ZeroExV3Adapter")?,
        ),
        ExchangeId::MelonEngine => (
            deployment.melon.require("Engine")?,
            deployment.melon.require("EngineAdapter")?,
        ),
    };
    Ok(pair)
}
