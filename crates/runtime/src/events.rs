//! Events emitted by the world, in the order they happened.

use glam::Vec3;
use pickup_core::{AgentId, ItemId, ItemKind, ItemState, Placement, Rarity, SlotIndex};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    ItemSpawned {
        item: ItemId,
        name: String,
        kind: ItemKind,
        rarity: Rarity,
        location: Vec3,
    },

    AgentSpawned { agent: AgentId },

    /// An item started flying toward an agent and reserved `slot`.
    TransferStarted {
        item: ItemId,
        agent: AgentId,
        slot: SlotIndex,
        sound_played: bool,
    },

    TransferFinished {
        item: ItemId,
        agent: AgentId,
        slot: SlotIndex,
        placement: Placement,
    },

    /// The receiving agent disappeared mid-flight; the item fell back.
    TransferAborted {
        item: ItemId,
        agent: AgentId,
        slot: SlotIndex,
    },

    ItemSettled { item: ItemId },

    ItemStateChanged {
        item: ItemId,
        from: ItemState,
        to: ItemState,
    },

    /// `dropped` items fell out of the agent's hands; `removed` items were
    /// stowed in its inventory and left the world with it.
    AgentDespawned {
        agent: AgentId,
        dropped: Vec<ItemId>,
        removed: Vec<ItemId>,
    },
}

impl WorldEvent {
    /// The item an event is about, if any.
    pub fn item(&self) -> Option<ItemId> {
        match self {
            WorldEvent::ItemSpawned { item, .. }
            | WorldEvent::TransferStarted { item, .. }
            | WorldEvent::TransferFinished { item, .. }
            | WorldEvent::TransferAborted { item, .. }
            | WorldEvent::ItemSettled { item }
            | WorldEvent::ItemStateChanged { item, .. } => Some(*item),
            WorldEvent::AgentSpawned { .. } | WorldEvent::AgentDespawned { .. } => None,
        }
    }
}

/// A [`WorldEvent`] stamped with the frame it was emitted in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameEvent {
    pub frame: u64,
    pub event: WorldEvent,
}

impl FrameEvent {
    /// One JSON object per event, for line-oriented logs.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_as_json_lines() {
        let event = FrameEvent {
            frame: 3,
            event: WorldEvent::ItemStateChanged {
                item: ItemId::new(1, 0),
                from: ItemState::Pickup,
                to: ItemState::TransferringToOwner,
            },
        };
        let line = event.to_json_line().unwrap();
        assert!(!line.contains('\n'));
        let back: FrameEvent = serde_json::from_str(&line).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn item_accessor_ignores_agent_events() {
        let despawned = WorldEvent::AgentDespawned {
            agent: AgentId::new(0, 0),
            dropped: vec![],
            removed: vec![],
        };
        assert_eq!(despawned.item(), None);
        assert_eq!(
            WorldEvent::ItemSettled {
                item: ItemId::new(2, 1)
            }
            .item(),
            Some(ItemId::new(2, 1))
        );
    }
}
