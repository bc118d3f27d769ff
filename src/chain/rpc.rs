//! Alloy-backed adapter for the fund factory contract.

use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::sol;
use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use super::{ChainError, ComponentFactory, StepReceipt, TxOptions, WrapperProvisioner};
use crate::domain::{ProvisioningRequest, WrapperHandle};
use crate::provision::stage::SetupStage;

sol! {
    #[sol(rpc)]
    contract IFundFactory {
        function beginSetup(
            bytes32 name,
            address[] fees,
            uint256[] feeRates,
            uint256[] feePeriods,
            address[] exchanges,
            address[] adapters,
            address denominationAsset,
            address[] defaultInvestmentAssets
        ) external;

        function createAccountingFor(address manager) external payable;
        function createFeeManagerFor(address manager) external payable;
        function createParticipationFor(address manager) external payable;
        function createPolicyManagerFor(address manager) external payable;
        function createSharesFor(address manager) external payable;
        function createTradingFor(address manager) external payable;
        function createVaultFor(address manager) external payable;
        function completeSetupFor(address manager) external payable;

        function managersToHubs(address manager) external view returns (address);
    }
}

/// JSON-RPC client for the fund factory, implementing both chain ports.
pub struct FundFactoryClient {
    rpc_url: Url,
    signer: PrivateKeySigner,
    factory: Address,
    network: String,
}

impl FundFactoryClient {
    /// Create a client for the factory deployed on `network`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL.
    pub fn new(
        endpoint: &str,
        signer: PrivateKeySigner,
        factory: Address,
        network: impl Into<String>,
    ) -> Result<Self, ChainError> {
        let rpc_url = endpoint.parse()?;
        Ok(Self {
            rpc_url,
            signer,
            factory,
            network: network.into(),
        })
    }

    fn provider(&self) -> impl Provider {
        ProviderBuilder::new()
            .wallet(EthereumWallet::from(self.signer.clone()))
            .connect_http(self.rpc_url.clone())
    }
}

#[async_trait]
impl WrapperProvisioner for FundFactoryClient {
    async fn create_wrapper(
        &self,
        sender: Address,
        request: &ProvisioningRequest,
        options: &TxOptions,
    ) -> Result<WrapperHandle, ChainError> {
        info!(network = %self.network, factory = %self.factory, "beginning fund setup");

        let provider = self.provider();
        let factory = IFundFactory::new(self.factory, &provider);

        let pending = factory
            .beginSetup(
                request.name(),
                request.fees().to_vec(),
                request.fee_rates().to_vec(),
                request.fee_periods().to_vec(),
                request.exchanges().to_vec(),
                request.adapters().to_vec(),
                request.denomination_asset(),
                request.default_assets().to_vec(),
            )
            .from(sender)
            .gas(options.gas_limit)
            .send()
            .await
            .map_err(ChainError::Submit)?;

        let receipt = pending
            .with_required_confirmations(options.confirmations)
            .get_receipt()
            .await
            .map_err(ChainError::Confirmation)?;
        if !receipt.status() {
            return Err(ChainError::Reverted {
                tx_hash: receipt.transaction_hash,
            });
        }

        let hub: Address = factory
            .managersToHubs(sender)
            .call()
            .await
            .map_err(ChainError::Call)?;
        if hub == Address::ZERO {
            return Err(ChainError::MissingWrapper { manager: sender });
        }

        debug!(wrapper = %hub, "wrapper registered");
        Ok(WrapperHandle::new(hub))
    }
}

#[async_trait]
impl ComponentFactory for FundFactoryClient {
    async fn create_component(
        &self,
        stage: SetupStage,
        sender: Address,
        wrapper: WrapperHandle,
        options: &TxOptions,
    ) -> Result<StepReceipt, ChainError> {
        let provider = self.provider();
        let factory = IFundFactory::new(self.factory, &provider);
        let manager = wrapper.address();
        let gas = options.gas_limit;
        let amgu = options.amgu;

        let pending = match stage {
            SetupStage::Accounting => {
                factory.createAccountingFor(manager).from(sender).gas(gas).value(amgu).send().await
            }
            SetupStage::FeeManager => {
                factory.createFeeManagerFor(manager).from(sender).gas(gas).value(amgu).send().await
            }
            SetupStage::Participation => {
                factory.createParticipationFor(manager).from(sender).gas(gas).value(amgu).send().await
            }
            SetupStage::PolicyManager => {
                factory.createPolicyManagerFor(manager).from(sender).gas(gas).value(amgu).send().await
            }
            SetupStage::Shares => {
                factory.createSharesFor(manager).from(sender).gas(gas).value(amgu).send().await
            }
            SetupStage::Trading => {
                factory.createTradingFor(manager).from(sender).gas(gas).value(amgu).send().await
            }
            SetupStage::Vault => {
                factory.createVaultFor(manager).from(sender).gas(gas).value(amgu).send().await
            }
            SetupStage::CompleteSetup => {
                factory.completeSetupFor(manager).from(sender).gas(gas).value(amgu).send().await
            }
        }
        .map_err(ChainError::Submit)?;

        let receipt = pending
            .with_required_confirmations(options.confirmations)
            .get_receipt()
            .await
            .map_err(ChainError::Confirmation)?;
        if !receipt.status() {
            return Err(ChainError::Reverted {
                tx_hash: receipt.transaction_hash,
            });
        }

        Ok(StepReceipt {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        })
    }
}
