//! Agent-side errors.

use super::SlotIndex;
use crate::error::{CoreError, ErrorSeverity};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentError {
    #[error("{slot} is out of range (agent has {count} slots)")]
    SlotOutOfRange { slot: SlotIndex, count: usize },

    /// A release without a matching reservation.
    #[error("occupancy of {slot} would drop below zero")]
    OccupancyUnderflow { slot: SlotIndex },

    #[error("inventory slot {slot} is empty")]
    InventorySlotEmpty { slot: usize },

    #[error("inventory slot {slot} is already equipped")]
    AlreadyEquipped { slot: usize },

    #[error("agent has nothing equipped")]
    NothingEquipped,
}

impl CoreError for AgentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OccupancyUnderflow { .. } => ErrorSeverity::Internal,
            Self::SlotOutOfRange { .. }
            | Self::InventorySlotEmpty { .. }
            | Self::AlreadyEquipped { .. }
            | Self::NothingEquipped => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SlotOutOfRange { .. } => "AGENT_SLOT_OUT_OF_RANGE",
            Self::OccupancyUnderflow { .. } => "AGENT_OCCUPANCY_UNDERFLOW",
            Self::InventorySlotEmpty { .. } => "AGENT_INVENTORY_SLOT_EMPTY",
            Self::AlreadyEquipped { .. } => "AGENT_ALREADY_EQUIPPED",
            Self::NothingEquipped => "AGENT_NOTHING_EQUIPPED",
        }
    }
}
