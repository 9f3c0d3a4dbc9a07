//! Item state machine errors.

use super::{ItemId, ItemState};
use crate::agent::AgentError;
use crate::error::{CoreError, ErrorSeverity};

/// Errors returned by `Item::begin_transfer`. The item is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferError {
    /// Only resting items can start a transfer; this also rejects re-entry on
    /// an item that is already transferring.
    #[error("{item} cannot start a transfer while {state}")]
    InvalidState { item: ItemId, state: ItemState },

    #[error("receiving agent has no interp slots")]
    NoInterpSlots,

    #[error("receiving agent rejected the slot reservation: {0}")]
    Agent(#[from] AgentError),
}

impl CoreError for TransferError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidState { .. } => ErrorSeverity::Validation,
            Self::NoInterpSlots => ErrorSeverity::Fatal,
            Self::Agent(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidState { .. } => "TRANSFER_INVALID_STATE",
            Self::NoInterpSlots => "TRANSFER_NO_INTERP_SLOTS",
            Self::Agent(err) => err.error_code(),
        }
    }
}

/// A requested lifecycle step that is not in the transition table.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{item} cannot go from {from} to {to}")]
pub struct TransitionError {
    pub item: ItemId,
    pub from: ItemState,
    pub to: ItemState,
}

impl CoreError for TransitionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "ITEM_INVALID_TRANSITION"
    }
}
