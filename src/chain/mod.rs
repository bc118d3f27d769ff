//! Ports and adapters for the blockchain boundary.
//!
//! The core never talks to a node directly. It goes through two ports:
//! [`WrapperProvisioner`] creates the fund's governance wrapper, and
//! [`ComponentFactory`] issues one setup transaction per stage and waits
//! for it to reach the required confirmation depth. [`rpc`] provides the
//! production adapter for both, [`wallet`] decrypts the signing account.

pub mod rpc;
pub mod wallet;

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ProvisioningRequest, WrapperHandle};
use crate::provision::stage::SetupStage;

/// Transport and contract-call failures at the chain boundary.
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("transaction submission failed: {0}")]
    Submit(#[source] alloy_contract::Error),

    #[error("confirmation wait failed: {0}")]
    Confirmation(#[source] alloy_provider::PendingTransactionError),

    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: B256 },

    #[error("contract call failed: {0}")]
    Call(#[source] alloy_contract::Error),

    #[error("no wrapper registered for manager {manager}")]
    MissingWrapper { manager: Address },
}

/// Fixed transaction options applied to every setup call.
///
/// Carried explicitly rather than hard-coded so tests and alternate
/// deployments can exercise different values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOptions {
    /// Gas limit for each transaction.
    pub gas_limit: u64,
    /// Protocol surcharge sent as transaction value with privileged calls.
    pub amgu: U256,
    /// Blocks to wait before a transaction counts as final.
    pub confirmations: u64,
}

/// Outcome of one confirmed setup transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReceipt {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
}

/// Creates the fund's governance wrapper.
///
/// The underlying procedure is multi-step and opaque; from the core's
/// perspective it either returns a usable handle or fails as a whole.
#[async_trait]
pub trait WrapperProvisioner: Send + Sync {
    /// Create the wrapper for the given request and return its handle.
    async fn create_wrapper(
        &self,
        sender: Address,
        request: &ProvisioningRequest,
        options: &TxOptions,
    ) -> Result<WrapperHandle, ChainError>;
}

/// Issues one component-setup transaction and waits for confirmation.
#[async_trait]
pub trait ComponentFactory: Send + Sync {
    /// Submit the setup call for `stage` against the wrapper and block
    /// until it reaches the confirmation depth in `options`.
    async fn create_component(
        &self,
        stage: SetupStage,
        sender: Address,
        wrapper: WrapperHandle,
        options: &TxOptions,
    ) -> Result<StepReceipt, ChainError>;
}
