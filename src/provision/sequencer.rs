//! The component provisioning sequencer.
//!
//! Drives the setup stages strictly in order. Each stage issues exactly one
//! transaction through the [`ComponentFactory`] port and waits for it to
//! reach the configured confirmation depth before the next stage starts.
//! The first failure aborts the run: earlier stages are already committed
//! on-chain and this sequencer never issues compensating transactions.
//! Recovery is a resume from the failed stage against the same wrapper.

use alloy_primitives::Address;
use thiserror::Error;
use tracing::info;

use super::stage::SetupStage;
use crate::chain::{ChainError, ComponentFactory, StepReceipt, TxOptions};
use crate::domain::WrapperHandle;

/// Failures of the provisioning workflow.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Wrapper creation failed. No handle exists, the whole run is safe to
    /// retry.
    #[error("governance wrapper creation failed: {0}")]
    Collaborator(#[source] ChainError),

    /// A setup stage failed after earlier stages committed. Resume from
    /// `stage` against the existing wrapper.
    #[error("provisioning step '{stage}' failed: {source}")]
    Step {
        stage: SetupStage,
        #[source]
        source: ChainError,
    },
}

impl ProvisionError {
    /// The stage a failed run should resume from, if one failed.
    #[must_use]
    pub fn failed_stage(&self) -> Option<SetupStage> {
        match self {
            Self::Step { stage, .. } => Some(*stage),
            Self::Collaborator(_) => None,
        }
    }
}

/// Notified after each stage reaches its confirmation depth.
///
/// Observers must not fail the run; persistence problems are theirs to
/// report.
pub trait StageObserver {
    fn stage_confirmed(&mut self, stage: SetupStage, receipt: &StepReceipt);
}

/// Observer that records nothing.
pub struct NoopObserver;

impl StageObserver for NoopObserver {
    fn stage_confirmed(&mut self, _stage: SetupStage, _receipt: &StepReceipt) {}
}

/// Drives the ordered setup sequence against a component factory.
///
/// The sequencer is the sole owner of the position in the sequence. The
/// wrapper handle and sender are read-only inputs threaded unchanged
/// through every stage.
pub struct Sequencer<'a> {
    factory: &'a dyn ComponentFactory,
    options: TxOptions,
}

impl<'a> Sequencer<'a> {
    #[must_use]
    pub fn new(factory: &'a dyn ComponentFactory, options: TxOptions) -> Self {
        Self { factory, options }
    }

    /// Run the full sequence from the first stage.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::Step`] naming the first stage that fails.
    pub async fn run(
        &self,
        sender: Address,
        wrapper: WrapperHandle,
        observer: &mut dyn StageObserver,
    ) -> Result<(), ProvisionError> {
        self.run_from(SetupStage::first(), sender, wrapper, observer)
            .await
    }

    /// Run the sequence starting at `start`, for resumed runs.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::Step`] naming the first stage that fails.
    pub async fn run_from(
        &self,
        start: SetupStage,
        sender: Address,
        wrapper: WrapperHandle,
        observer: &mut dyn StageObserver,
    ) -> Result<(), ProvisionError> {
        for &stage in start.remaining() {
            if stage.is_terminal() {
                info!(wrapper = %wrapper, "completing fund setup");
            } else {
                info!(wrapper = %wrapper, "creating {} component", stage);
            }

            let receipt = self
                .factory
                .create_component(stage, sender, wrapper, &self.options)
                .await
                .map_err(|source| ProvisionError::Step { stage, source })?;

            info!(stage = %stage, tx = %receipt.tx_hash, "confirmed");
            observer.stage_confirmed(stage, &receipt);
        }
        Ok(())
    }
}
