//! Test doubles for the chain boundary.
//!
//! Used by the integration suite through the `testkit` feature, so the
//! sequencer and the run flow can be exercised without a node.

use std::sync::Mutex;

use alloy_primitives::{Address, B256};
use async_trait::async_trait;

use crate::chain::{
    ChainError, ComponentFactory, StepReceipt, TxOptions, WrapperProvisioner,
};
use crate::domain::{ProvisioningRequest, WrapperHandle};
use crate::provision::stage::SetupStage;

/// One observed interaction with the [`RecordingFactory`].
///
/// `Issued` is logged when the setup call is submitted, `Confirmed` once
/// the double treats it as final. A correct sequencer never issues a stage
/// before the previous stage's confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryEvent {
    Issued(SetupStage),
    Confirmed(SetupStage),
}

/// Component factory double that records call order.
pub struct RecordingFactory {
    events: Mutex<Vec<FactoryEvent>>,
    options_seen: Mutex<Vec<TxOptions>>,
    fail_at: Option<SetupStage>,
}

impl RecordingFactory {
    /// A factory that confirms every transaction.
    #[must_use]
    pub fn confirming() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            options_seen: Mutex::new(Vec::new()),
            fail_at: None,
        }
    }

    /// A factory whose transaction for `stage` reverts.
    #[must_use]
    pub fn failing_at(stage: SetupStage) -> Self {
        Self {
            fail_at: Some(stage),
            ..Self::confirming()
        }
    }

    /// Everything observed so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<FactoryEvent> {
        self.events.lock().expect("events lock").clone()
    }

    /// The stages whose transactions were submitted, in order.
    #[must_use]
    pub fn issued(&self) -> Vec<SetupStage> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                FactoryEvent::Issued(stage) => Some(stage),
                FactoryEvent::Confirmed(_) => None,
            })
            .collect()
    }

    /// The transaction options seen on each call.
    #[must_use]
    pub fn options_seen(&self) -> Vec<TxOptions> {
        self.options_seen.lock().expect("options lock").clone()
    }
}

#[async_trait]
impl ComponentFactory for RecordingFactory {
    async fn create_component(
        &self,
        stage: SetupStage,
        _sender: Address,
        _wrapper: WrapperHandle,
        options: &TxOptions,
    ) -> Result<StepReceipt, ChainError> {
        self.events
            .lock()
            .expect("events lock")
            .push(FactoryEvent::Issued(stage));
        self.options_seen
            .lock()
            .expect("options lock")
            .push(*options);

        if self.fail_at == Some(stage) {
            return Err(ChainError::Reverted {
                tx_hash: B256::repeat_byte(0xee),
            });
        }

        self.events
            .lock()
            .expect("events lock")
            .push(FactoryEvent::Confirmed(stage));
        Ok(StepReceipt {
            tx_hash: B256::repeat_byte(stage.index() as u8 + 1),
            block_number: Some(stage.index() as u64 + 1),
        })
    }
}

/// Wrapper provisioner double returning a fixed handle.
pub struct StaticProvisioner {
    wrapper: WrapperHandle,
    fail: bool,
}

impl StaticProvisioner {
    #[must_use]
    pub fn returning(wrapper: WrapperHandle) -> Self {
        Self {
            wrapper,
            fail: false,
        }
    }

    /// A provisioner whose creation procedure fails as a whole.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            wrapper: WrapperHandle::new(Address::ZERO),
            fail: true,
        }
    }
}

#[async_trait]
impl WrapperProvisioner for StaticProvisioner {
    async fn create_wrapper(
        &self,
        sender: Address,
        _request: &ProvisioningRequest,
        _options: &TxOptions,
    ) -> Result<WrapperHandle, ChainError> {
        if self.fail {
            return Err(ChainError::MissingWrapper { manager: sender });
        }
        Ok(self.wrapper)
    }
}
