//! Resume state for interrupted provisioning runs.
//!
//! The wrapper handle and every confirmed stage are persisted to a JSON
//! file as the run progresses. A later `resume` picks up from the first
//! unconfirmed stage against the same wrapper, so a step failure never
//! forces a second wrapper creation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::sequencer::StageObserver;
use super::stage::SetupStage;
use crate::chain::StepReceipt;
use crate::domain::WrapperHandle;

/// Current state file format version.
const STATE_VERSION: &str = "1";

/// Errors around the resume state file.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("state file {path} already exists; resume the run or remove the file")]
    AlreadyExists { path: PathBuf },

    #[error("no state file at {path}; nothing to resume")]
    NotFound { path: PathBuf },

    #[error("failed to read state file: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write state file: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to parse state file: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("state file records stages out of sequence")]
    OutOfSequence,

    #[error("state file is for network '{recorded}', config targets '{configured}'")]
    NetworkMismatch { recorded: String, configured: String },
}

/// Progress of one provisioning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionState {
    /// Schema version for forward compatibility.
    pub version: String,
    /// Network the wrapper lives on.
    pub network: String,
    /// Account driving the setup calls.
    pub sender: Address,
    /// The governance wrapper all stages attach to.
    pub wrapper: WrapperHandle,
    /// Stages confirmed so far, in execution order.
    pub completed: Vec<SetupStage>,
    /// When this file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ProvisionState {
    /// Fresh state for a newly created wrapper.
    #[must_use]
    pub fn new(network: impl Into<String>, sender: Address, wrapper: WrapperHandle) -> Self {
        Self {
            version: STATE_VERSION.to_string(),
            network: network.into(),
            sender,
            wrapper,
            completed: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Load and validate state from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, unparseable,
    /// or records stages out of sequence.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StateError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StateError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path).map_err(StateError::Read)?;
        let state: Self = serde_json::from_str(&content).map_err(StateError::Parse)?;
        state.check_sequence()?;
        Ok(state)
    }

    /// Write state to `path` atomically via a temp file and rename.
    ///
    /// # Errors
    ///
    /// Returns an error on serialization or filesystem failure.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StateError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(StateError::Parse)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(StateError::Write)?;
            }
        }

        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).map_err(StateError::Write)?;

        let cleanup_and_err = |e| {
            let _ = fs::remove_file(&temp_path);
            StateError::Write(e)
        };

        file.write_all(json.as_bytes()).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        fs::rename(&temp_path, path).map_err(cleanup_and_err)?;

        Ok(())
    }

    /// Record one confirmed stage.
    pub fn record(&mut self, stage: SetupStage) {
        self.completed.push(stage);
        self.updated_at = Utc::now();
    }

    /// The first unconfirmed stage, or `None` once setup completed.
    #[must_use]
    pub fn next_stage(&self) -> Option<SetupStage> {
        SetupStage::ALL.get(self.completed.len()).copied()
    }

    /// Setup is strictly linear, so completed stages must be a prefix of
    /// the full sequence.
    fn check_sequence(&self) -> Result<(), StateError> {
        let expected = &SetupStage::ALL[..self.completed.len().min(SetupStage::ALL.len())];
        if self.completed.len() > SetupStage::ALL.len() || self.completed != expected {
            return Err(StateError::OutOfSequence);
        }
        Ok(())
    }
}

/// Observer that persists each confirmed stage to the state file.
///
/// Write failures are reported but never abort the run; the transactions
/// they describe are already confirmed on-chain.
pub struct StateRecorder {
    path: PathBuf,
    state: ProvisionState,
}

impl StateRecorder {
    /// Start recording a fresh run. Refuses to clobber an existing file.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::AlreadyExists`] if a state file is present,
    /// or a write error from the initial save.
    pub fn create(path: PathBuf, state: ProvisionState) -> Result<Self, StateError> {
        if path.exists() {
            return Err(StateError::AlreadyExists { path });
        }
        state.save(&path)?;
        Ok(Self { path, state })
    }

    /// Continue recording a resumed run.
    #[must_use]
    pub fn resume(path: PathBuf, state: ProvisionState) -> Self {
        Self { path, state }
    }

    #[must_use]
    pub fn state(&self) -> &ProvisionState {
        &self.state
    }

    /// Remove the state file after a completed run.
    pub fn finish(self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "could not remove state file");
        }
    }
}

impl StageObserver for StateRecorder {
    fn stage_confirmed(&mut self, stage: SetupStage, _receipt: &StepReceipt) {
        self.state.record(stage);
        if let Err(e) = self.state.save(&self.path) {
            warn!(stage = %stage, error = %e, "could not persist resume state");
        }
    }
}
