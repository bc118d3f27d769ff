//! The linear setup stage machine.
//!
//! Fund setup is a strict sequence: each component-creation call is only
//! valid on-chain once the previous component is registered with the
//! wrapper, and the completion call finalizes the wrapper for operation.
//! The machine is a plain enum with a total ordering and an explicit
//! transition function, so the sequencing logic is testable without a
//! network.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One setup operation against the governance wrapper.
///
/// The seven component creations run in declaration order, followed by the
/// terminal [`SetupStage::CompleteSetup`] call. After completion no further
/// setup calls are valid against the wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupStage {
    Accounting,
    FeeManager,
    Participation,
    PolicyManager,
    Shares,
    Trading,
    Vault,
    CompleteSetup,
}

impl SetupStage {
    /// All stages, in execution order.
    pub const ALL: [SetupStage; 8] = [
        SetupStage::Accounting,
        SetupStage::FeeManager,
        SetupStage::Participation,
        SetupStage::PolicyManager,
        SetupStage::Shares,
        SetupStage::Trading,
        SetupStage::Vault,
        SetupStage::CompleteSetup,
    ];

    /// The first stage of a fresh run.
    #[must_use]
    pub const fn first() -> Self {
        SetupStage::Accounting
    }

    /// Position of this stage in the sequence.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The stage after this one, or `None` after the terminal stage.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Whether this is the terminal completion call.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, SetupStage::CompleteSetup)
    }

    /// The remaining sequence starting at this stage, in order.
    #[must_use]
    pub fn remaining(self) -> &'static [SetupStage] {
        &Self::ALL[self.index()..]
    }
}

impl fmt::Display for SetupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SetupStage::Accounting => "accounting",
            SetupStage::FeeManager => "fee manager",
            SetupStage::Participation => "participation",
            SetupStage::PolicyManager => "policy manager",
            SetupStage::Shares => "shares",
            SetupStage::Trading => "trading",
            SetupStage::Vault => "vault",
            SetupStage::CompleteSetup => "complete setup",
        };
        f.write_str(label)
    }
}
