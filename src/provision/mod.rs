//! The component provisioning workflow.
//!
//! [`stage`] defines the linear setup sequence, [`sequencer`] drives it
//! against the chain boundary one confirmed transaction at a time, and
//! [`state`] persists progress so an interrupted run can resume against
//! the existing wrapper instead of starting over.

pub mod sequencer;
pub mod stage;
pub mod state;

pub use sequencer::{ProvisionError, Sequencer, StageObserver};
pub use stage::SetupStage;
pub use state::ProvisionState;
