//! The interpolated transfer of an item into a receiving agent's slot.

use glam::Vec3;

use super::{Item, ItemEvent, ItemKind, ItemState, TransferError};
use crate::agent::{AgentId, ReceivingAgent, SlotIndex, SoundKind};
use crate::host::ItemHost;
use crate::math::{self, Rotator};
use crate::timer::Countdown;

/// Bookkeeping of an in-flight transfer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transfer {
    agent: AgentId,
    /// Slot whose occupancy counter this transfer holds.
    slot: SlotIndex,
    /// Slot whose anchor the item flies to.
    anchor: SlotIndex,
    start: Vec3,
    yaw_offset: f32,
    countdown: Countdown,
}

impl Transfer {
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    pub fn slot(&self) -> SlotIndex {
        self.slot
    }

    pub fn anchor(&self) -> SlotIndex {
        self.anchor
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn yaw_offset(&self) -> f32 {
        self.yaw_offset
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }
}

/// Receipt returned by a successful `begin_transfer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferTicket {
    pub agent: AgentId,
    pub slot: SlotIndex,
    pub sound_played: bool,
}

impl Item {
    /// Starts pulling this item toward `agent`.
    ///
    /// Fails without side effects unless the item is resting in `Pickup`.
    pub fn begin_transfer(
        &mut self,
        agent_id: AgentId,
        agent: &mut dyn ReceivingAgent,
        force_sound: bool,
        host: &mut dyn ItemHost,
    ) -> Result<TransferTicket, TransferError> {
        if self.state != ItemState::Pickup {
            return Err(TransferError::InvalidState {
                item: self.id,
                state: self.state,
            });
        }
        let slot = agent.least_loaded_slot().ok_or(TransferError::NoInterpSlots)?;
        agent.adjust_slot_occupancy(slot, 1)?;

        let sound_played = self.play_feedback(SoundKind::Pickup, force_sound, agent, host);

        let anchor = match self.kind {
            ItemKind::Weapon => SlotIndex::WEAPON,
            ItemKind::Ammo => slot,
        };
        self.transfer = Some(Transfer {
            agent: agent_id,
            slot,
            anchor,
            start: self.pose.location,
            yaw_offset: self.pose.rotation.yaw - agent.viewpoint().rotation.yaw,
            countdown: Countdown::new(self.config.transfer_duration_secs),
        });

        self.disable_outline(host);
        self.can_change_outline = false;
        self.enter_state(ItemState::TransferringToOwner, host);

        Ok(TransferTicket {
            agent: agent_id,
            slot,
            sound_played,
        })
    }

    /// Drops an in-flight transfer whose agent no longer exists.
    ///
    /// The agent's counters went away with it, so nothing is released.
    pub fn abort_transfer(&mut self, host: &mut dyn ItemHost) -> Option<ItemEvent> {
        if self.state != ItemState::TransferringToOwner {
            return None;
        }
        let transfer = self.transfer.take()?;
        self.pose.scale = 1.0;
        self.can_change_outline = true;
        self.disable_outline(host);
        self.enter_state(ItemState::Falling, host);
        host.set_pose(self.id, &self.pose);
        Some(ItemEvent::TransferAborted {
            agent: transfer.agent,
            slot: transfer.slot,
        })
    }

    pub(super) fn tick_transfer(
        &mut self,
        dt: f32,
        agent: Option<&mut dyn ReceivingAgent>,
        host: &mut dyn ItemHost,
    ) -> Option<ItemEvent> {
        let Some(agent) = agent else {
            return self.abort_transfer(host);
        };
        let transfer = self.transfer.as_mut()?;
        let expired = transfer.countdown.advance(dt);

        self.update_transfer_pose(dt, &*agent, host);
        self.update_pulse(host);

        if expired {
            return self.finish_transfer(agent, host);
        }
        None
    }

    /// Moves the item one frame along its path. Skipped for the frame when the
    /// vertical curve is missing or the target anchor does not resolve.
    fn update_transfer_pose(&mut self, dt: f32, agent: &dyn ReceivingAgent, host: &mut dyn ItemHost) {
        let Some(transfer) = self.transfer.as_ref() else {
            return;
        };
        let Some(vertical) = self.curves.vertical.as_ref() else {
            return;
        };
        let Some(target) = agent.slot_position(transfer.anchor) else {
            return;
        };

        let t = transfer.countdown.fraction();
        let lateral =
            math::approach_lateral(self.pose.location, target, dt, self.config.lateral_rate);
        let z = math::eased_height(transfer.start, target, vertical.sample(t));

        self.pose.location = Vec3::new(lateral.x, lateral.y, z);
        self.pose.rotation =
            Rotator::from_yaw(agent.viewpoint().rotation.yaw + transfer.yaw_offset);
        if let Some(scale) = self.curves.scale.as_ref() {
            self.pose.scale = scale.sample(t);
        }
        host.set_pose(self.id, &self.pose);
    }

    fn finish_transfer(
        &mut self,
        agent: &mut dyn ReceivingAgent,
        host: &mut dyn ItemHost,
    ) -> Option<ItemEvent> {
        let transfer = self.transfer.take()?;
        let release_error = agent.adjust_slot_occupancy(transfer.slot, -1).err();
        let placement = agent.receive_item(self.id, self.kind, self.count);
        agent.clear_highlight();

        self.pose.scale = 1.0;
        host.set_pose(self.id, &self.pose);
        self.disable_glow(host);
        self.can_change_outline = true;
        self.disable_outline(host);
        self.enter_state(ItemState::Equipped, host);

        Some(ItemEvent::TransferFinished {
            agent: transfer.agent,
            slot: transfer.slot,
            placement,
            release_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Character, Placement, Viewpoint};
    use crate::config::{AgentConfig, ItemConfig};
    use crate::curve::{CurveId, FnCurve, ItemCurves, ScalarCurve};
    use crate::host::{NullHost, SoundCue};
    use crate::item::{ItemId, ItemSpec, Rarity};
    use crate::math::Pose;

    const AGENT: AgentId = AgentId::new(0, 0);
    const DT: f32 = 0.05;

    fn character(yaw: f32) -> Character {
        let viewpoint = Viewpoint::new(Vec3::new(0.0, 0.0, 100.0), Rotator::from_yaw(yaw));
        Character::new(&AgentConfig::default(), viewpoint).unwrap()
    }

    fn curves() -> ItemCurves {
        ItemCurves::empty()
            .with_vertical(ScalarCurve::linear(0.0, 1.0))
            .with_scale(FnCurve(|t: f32| 1.0 + t))
    }

    fn item(spec: ItemSpec, yaw: f32, curves: ItemCurves) -> Item {
        Item::spawn(
            ItemId::new(1, 0),
            spec,
            Pose::new(Vec3::ZERO, Rotator::from_yaw(yaw)),
            ItemConfig::default(),
            curves,
            &mut NullHost,
        )
    }

    fn occupancies(agent: &Character) -> Vec<u32> {
        agent.slots().iter().map(|slot| slot.occupancy).collect()
    }

    /// Ticks until the transfer completes, returning the finishing event.
    fn run_to_completion(item: &mut Item, agent: &mut Character) -> ItemEvent {
        for _ in 0..1000 {
            if let Some(event) = item.tick(DT, Some(&mut *agent), &mut NullHost) {
                return event;
            }
        }
        panic!("transfer never finished");
    }

    #[test]
    fn transfer_finishes_equipped_with_agent_yaw_offset() {
        let mut agent = character(90.0);
        let mut item = item(
            ItemSpec::new("rifle", ItemKind::Weapon).with_rarity(Rarity::Rare),
            100.0,
            curves(),
        );
        let before = occupancies(&agent);

        let ticket = item
            .begin_transfer(AGENT, &mut agent, false, &mut NullHost)
            .unwrap();
        assert_eq!(ticket.slot, SlotIndex(0));
        assert_eq!(item.state(), ItemState::TransferringToOwner);
        assert!(!item.can_change_outline());

        // Turn mid-flight; the item keeps its offset to the final heading.
        item.tick(DT, Some(&mut agent), &mut NullHost);
        agent.set_yaw(45.0);

        let event = run_to_completion(&mut item, &mut agent);
        assert!(matches!(
            event,
            ItemEvent::TransferFinished {
                placement: Placement::Equipped { slot: 0 },
                release_error: None,
                ..
            }
        ));
        assert_eq!(item.state(), ItemState::Equipped);
        assert!((item.pose().rotation.yaw - 55.0).abs() < 1e-4);
        assert_eq!(item.pose().scale, 1.0);
        assert!(item.can_change_outline());
        assert!(!item.outline_enabled());
        assert_eq!(item.material().glow_blend_alpha, 1.0);
        assert_eq!(item.active_stars().active_count(), 4);
        assert_eq!(occupancies(&agent), before);
        assert!(item.transfer().is_none());
    }

    #[test]
    fn missing_vertical_curve_skips_pose_but_still_completes() {
        let mut agent = character(0.0);
        let mut item = item(ItemSpec::new("rifle", ItemKind::Weapon), 0.0, curves());
        item.begin_transfer(AGENT, &mut agent, false, &mut NullHost)
            .unwrap();
        item.tick(DT, Some(&mut agent), &mut NullHost);
        let moved = *item.pose();
        assert_ne!(moved.location, Vec3::ZERO);

        item.curves_mut().clear(CurveId::VerticalEasing);
        let frames = (ItemConfig::DEFAULT_TRANSFER_DURATION_SECS / DT).ceil() as usize;
        let mut finished = None;
        for _ in 0..frames + 1 {
            if finished.is_none() {
                assert_eq!(item.state(), ItemState::TransferringToOwner);
            }
            if let Some(event) = item.tick(DT, Some(&mut agent), &mut NullHost) {
                finished = Some(event);
                break;
            }
            assert_eq!(item.pose().location, moved.location);
        }
        assert!(matches!(finished, Some(ItemEvent::TransferFinished { .. })));
        assert_eq!(item.state(), ItemState::Equipped);
        assert_eq!(occupancies(&agent), vec![0; agent.slot_count()]);
    }

    #[test]
    fn missing_scale_curve_leaves_scale_alone() {
        let mut agent = character(0.0);
        let curves = ItemCurves::empty().with_vertical(ScalarCurve::linear(0.0, 1.0));
        let mut item = item(ItemSpec::new("rifle", ItemKind::Weapon), 0.0, curves);
        item.begin_transfer(AGENT, &mut agent, false, &mut NullHost)
            .unwrap();
        item.tick(DT, Some(&mut agent), &mut NullHost);
        assert_eq!(item.pose().scale, 1.0);
        assert_ne!(item.pose().location, Vec3::ZERO);
    }

    #[test]
    fn scale_curve_applies_during_transfer() {
        let mut agent = character(0.0);
        let mut item = item(ItemSpec::new("rifle", ItemKind::Weapon), 0.0, curves());
        item.begin_transfer(AGENT, &mut agent, false, &mut NullHost)
            .unwrap();
        item.tick(0.35, Some(&mut agent), &mut NullHost);
        assert!((item.pose().scale - 1.5).abs() < 1e-4);
    }

    #[test]
    fn reentry_is_rejected_without_side_effects() {
        let mut agent = character(0.0);
        let mut item = item(ItemSpec::new("rifle", ItemKind::Weapon), 0.0, curves());
        item.begin_transfer(AGENT, &mut agent, false, &mut NullHost)
            .unwrap();
        let before = occupancies(&agent);
        let transfer = *item.transfer().unwrap();

        let err = item
            .begin_transfer(AGENT, &mut agent, true, &mut NullHost)
            .unwrap_err();
        assert_eq!(
            err,
            TransferError::InvalidState {
                item: item.id(),
                state: ItemState::TransferringToOwner,
            }
        );
        assert_eq!(occupancies(&agent), before);
        assert_eq!(*item.transfer().unwrap(), transfer);
    }

    #[test]
    fn concurrent_pickups_spread_across_slots() {
        let mut agent = character(0.0);
        let mut items: Vec<_> = (0..3)
            .map(|_| item(ItemSpec::new("shells", ItemKind::Ammo).with_count(10), 0.0, curves()))
            .collect();
        let slots: Vec<_> = items
            .iter_mut()
            .map(|item| {
                item.begin_transfer(AGENT, &mut agent, false, &mut NullHost)
                    .unwrap()
                    .slot
            })
            .collect();
        assert_eq!(slots, vec![SlotIndex(0), SlotIndex(1), SlotIndex(2)]);
        assert_eq!(items[2].transfer().unwrap().anchor(), SlotIndex(2));

        for item in &mut items {
            run_to_completion(item, &mut agent);
        }
        assert_eq!(agent.ammo(), 30);
        assert_eq!(occupancies(&agent), vec![0; agent.slot_count()]);
    }

    #[test]
    fn weapons_fly_to_the_weapon_anchor() {
        let mut agent = character(0.0);
        agent.adjust_slot_occupancy(SlotIndex(0), 1).unwrap();
        let mut item = item(ItemSpec::new("rifle", ItemKind::Weapon), 0.0, curves());
        let ticket = item
            .begin_transfer(AGENT, &mut agent, false, &mut NullHost)
            .unwrap();
        assert_eq!(ticket.slot, SlotIndex(1));
        assert_eq!(item.transfer().unwrap().anchor(), SlotIndex::WEAPON);

        for _ in 0..10 {
            item.tick(DT, Some(&mut agent), &mut NullHost);
        }
        let anchor = agent.slot_position(SlotIndex::WEAPON).unwrap();
        let location = item.pose().location;
        assert!((location.x - anchor.x).abs() < 1.0);
        assert!((location.y - anchor.y).abs() < 1.0);
    }

    #[test]
    fn same_inputs_give_same_trajectory() {
        let run = || {
            let mut agent = character(30.0);
            let mut item = item(ItemSpec::new("rifle", ItemKind::Weapon), 12.0, curves());
            item.begin_transfer(AGENT, &mut agent, false, &mut NullHost)
                .unwrap();
            let mut poses = Vec::new();
            for _ in 0..20 {
                item.tick(0.033, Some(&mut agent), &mut NullHost);
                poses.push(*item.pose());
            }
            poses
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn height_follows_vertical_curve() {
        let mut agent = character(0.0);
        let mut item = item(ItemSpec::new("rifle", ItemKind::Weapon), 0.0, curves());
        item.begin_transfer(AGENT, &mut agent, false, &mut NullHost)
            .unwrap();
        item.tick(0.35, Some(&mut agent), &mut NullHost);
        let target = agent.slot_position(SlotIndex::WEAPON).unwrap();
        assert!((item.pose().location.z - 0.5 * target.z).abs() < 1e-3);
    }

    #[test]
    fn pickup_sound_respects_cooldown_unless_forced() {
        let spec = ItemSpec::new("rifle", ItemKind::Weapon)
            .with_sounds(Some(SoundCue::new("pickup")), None);
        let mut agent = character(0.0);

        let mut first = item(spec.clone(), 0.0, curves());
        let mut second = item(spec.clone(), 0.0, curves());
        let mut third = item(spec, 0.0, curves());

        let a = first
            .begin_transfer(AGENT, &mut agent, false, &mut NullHost)
            .unwrap();
        let b = second
            .begin_transfer(AGENT, &mut agent, false, &mut NullHost)
            .unwrap();
        let c = third
            .begin_transfer(AGENT, &mut agent, true, &mut NullHost)
            .unwrap();
        assert!(a.sound_played);
        assert!(!b.sound_played);
        assert!(c.sound_played);
    }

    #[test]
    fn agent_loss_rolls_back_to_falling() {
        let mut agent = character(0.0);
        let mut item = item(ItemSpec::new("rifle", ItemKind::Weapon), 0.0, curves());
        item.begin_transfer(AGENT, &mut agent, false, &mut NullHost)
            .unwrap();
        item.tick(DT, Some(&mut agent), &mut NullHost);

        let event = item.tick(DT, None, &mut NullHost);
        assert_eq!(
            event,
            Some(ItemEvent::TransferAborted {
                agent: AGENT,
                slot: SlotIndex(0),
            })
        );
        assert_eq!(item.state(), ItemState::Falling);
        assert!(item.can_change_outline());
        assert!(item.receiving_agent().is_none());
        assert_eq!(item.pose().scale, 1.0);
    }
}
