//! Run orchestration: wiring configuration, resolvers, the wrapper
//! provisioner and the sequencer together.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::chain::rpc::FundFactoryClient;
use crate::chain::{wallet, TxOptions, WrapperProvisioner};
use crate::config::Config;
use crate::deployment::Deployment;
use crate::domain::units::ether_to_wei;
use crate::error::{Error, Result};
use crate::provision::sequencer::{ProvisionError, Sequencer};
use crate::provision::state::{ProvisionState, StateError, StateRecorder};
use crate::resolver;

pub struct App;

impl App {
    /// Provision a fresh fund: create the wrapper, then run all stages.
    ///
    /// # Errors
    ///
    /// Returns the first configuration, collaborator or step failure.
    /// After a step failure the state file holds everything needed for
    /// `resume`.
    pub async fn run(config: Config, deployment_file: Option<PathBuf>) -> Result<()> {
        let deployment = load_deployment(&config, deployment_file)?;
        let request = resolver::resolve_request(&config.fund, &deployment)?;
        let options = tx_options(&config)?;

        let state_path = config.provisioner.state_file.clone();
        if state_path.exists() {
            return Err(StateError::AlreadyExists { path: state_path }.into());
        }

        let sender = config.wallet.sender;
        let signer = wallet::unlock(&config.wallet)?;
        let client = FundFactoryClient::new(
            &config.network.endpoint,
            signer,
            deployment.melon.require("Version")?,
            config.network.name.clone(),
        )?;

        let wrapper = client
            .create_wrapper(sender, &request, &options)
            .await
            .map_err(|e| Error::Provision(ProvisionError::Collaborator(e)))?;
        info!(wrapper = %wrapper, "governance wrapper created");

        let state = ProvisionState::new(config.network.name.clone(), sender, wrapper);
        let mut recorder = StateRecorder::create(state_path, state)?;

        Sequencer::new(&client, options)
            .run(sender, wrapper, &mut recorder)
            .await
            .map_err(Error::Provision)?;

        recorder.finish();
        println!("Fund provisioning complete, wrapper {wrapper} is operational.");
        Ok(())
    }

    /// Resume an interrupted run from the first unconfirmed stage.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no usable state file, it does not
    /// match the configuration, or a stage fails again.
    pub async fn resume(config: Config, deployment_file: Option<PathBuf>) -> Result<()> {
        let deployment = load_deployment(&config, deployment_file)?;
        let options = tx_options(&config)?;

        let state_path = config.provisioner.state_file.clone();
        let state = ProvisionState::load(&state_path)?;
        if state.network != config.network.name {
            return Err(StateError::NetworkMismatch {
                recorded: state.network,
                configured: config.network.name.clone(),
            }
            .into());
        }

        let Some(start) = state.next_stage() else {
            println!("All stages already confirmed, nothing to resume.");
            return Ok(());
        };

        let sender = state.sender;
        let wrapper = state.wrapper;
        info!(wrapper = %wrapper, stage = %start, "resuming provisioning");

        let signer = wallet::unlock(&config.wallet)?;
        let client = FundFactoryClient::new(
            &config.network.endpoint,
            signer,
            deployment.melon.require("Version")?,
            config.network.name.clone(),
        )?;

        let mut recorder = StateRecorder::resume(state_path, state);
        Sequencer::new(&client, options)
            .run_from(start, sender, wrapper, &mut recorder)
            .await
            .map_err(Error::Provision)?;

        recorder.finish();
        println!("Fund provisioning complete, wrapper {wrapper} is operational.");
        Ok(())
    }

    /// Resolve config and registry offline and print the request summary.
    ///
    /// # Errors
    ///
    /// Returns the same resolution errors a live run would hit before
    /// touching the network.
    pub fn check(config: &Config, deployment_file: Option<PathBuf>) -> Result<()> {
        let deployment = load_deployment(config, deployment_file)?;
        let request = resolver::resolve_request(&config.fund, &deployment)?;
        let options = tx_options(config)?;

        // Required for a live run even though the check itself is offline.
        deployment.melon.require("Version")?;

        println!("fund name:       {}", config.fund.name);
        println!(
            "denomination:    {} ({})",
            config.fund.quote_token,
            request.denomination_asset()
        );
        println!("default assets:  {}", request.default_assets().len());
        println!("management fee:  {}", request.fee_rates()[0]);
        println!("performance fee: {}", request.fee_rates()[1]);

        let enabled = resolver::selected_ids(&config.fund.exchanges)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "exchanges:       {} pair(s) enabled ({})",
            request.exchanges().len(),
            if enabled.is_empty() {
                "none"
            } else {
                enabled.as_str()
            }
        );
        println!("gas limit:       {}", options.gas_limit);
        println!("amgu surcharge:  {} wei", options.amgu);
        println!("confirmations:   {}", options.confirmations);
        println!("Configuration OK.");
        Ok(())
    }
}

fn load_deployment(config: &Config, override_path: Option<PathBuf>) -> Result<Deployment> {
    let path: &Path = override_path
        .as_deref()
        .unwrap_or(&config.network.deployment_file);
    Deployment::load(path)
}

fn tx_options(config: &Config) -> Result<TxOptions> {
    let amgu = ether_to_wei(config.provisioner.amgu_ether).map_err(Error::Domain)?;
    Ok(TxOptions {
        gas_limit: config.provisioner.gas_limit,
        amgu,
        confirmations: config.provisioner.confirmations,
    })
}
