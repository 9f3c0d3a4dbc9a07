//! In-memory [`ItemHost`] that remembers what items asked for.
//!
//! Used by tests and the simulator in place of an engine.

use std::collections::{BTreeMap, HashMap};

use pickup_core::{ItemHost, ItemId, ItemState, MaterialParam, Pose, Presentation, SoundCue};

/// Last values an item pushed to the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemRecord {
    pub state: Option<ItemState>,
    pub presentation: Option<Presentation>,
    /// Number of presentation records applied so far.
    pub presentation_changes: usize,
    pub materials: BTreeMap<MaterialParam, f32>,
    pub outline: bool,
    pub pose: Option<Pose>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    items: HashMap<ItemId, ItemRecord>,
    sounds: Vec<(ItemId, SoundCue)>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, item: ItemId) -> Option<&ItemRecord> {
        self.items.get(&item)
    }

    pub fn material(&self, item: ItemId, param: MaterialParam) -> Option<f32> {
        self.record(item)
            .and_then(|record| record.materials.get(&param).copied())
    }

    /// Every sound played, oldest first.
    pub fn sounds(&self) -> &[(ItemId, SoundCue)] {
        &self.sounds
    }

    pub fn sounds_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = ItemId> + 'a {
        self.sounds
            .iter()
            .filter(move |(_, cue)| cue.name() == name)
            .map(|(item, _)| *item)
    }

    pub fn clear_sounds(&mut self) {
        self.sounds.clear();
    }

    /// Drops everything recorded for an item that left the world.
    pub fn forget(&mut self, item: ItemId) {
        self.items.remove(&item);
    }

    fn entry(&mut self, item: ItemId) -> &mut ItemRecord {
        self.items.entry(item).or_default()
    }
}

impl ItemHost for RecordingHost {
    fn apply_presentation(&mut self, item: ItemId, state: ItemState, presentation: &Presentation) {
        let record = self.entry(item);
        record.state = Some(state);
        record.presentation = Some(*presentation);
        record.presentation_changes += 1;
    }

    fn set_material_scalar(&mut self, item: ItemId, param: MaterialParam, value: f32) {
        self.entry(item).materials.insert(param, value);
    }

    fn set_outline(&mut self, item: ItemId, enabled: bool) {
        self.entry(item).outline = enabled;
    }

    fn play_sound(&mut self, item: ItemId, cue: &SoundCue) {
        self.sounds.push((item, cue.clone()));
    }

    fn set_pose(&mut self, item: ItemId, pose: &Pose) {
        self.entry(item).pose = Some(*pose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_last_values_per_item() {
        let mut host = RecordingHost::new();
        let item = ItemId::new(0, 0);
        host.set_material_scalar(item, MaterialParam::GlowAmount, 10.0);
        host.set_material_scalar(item, MaterialParam::GlowAmount, 20.0);
        host.apply_presentation(item, ItemState::Falling, ItemState::Falling.presentation());
        host.play_sound(item, &SoundCue::new("thud"));

        assert_eq!(host.material(item, MaterialParam::GlowAmount), Some(20.0));
        let record = host.record(item).unwrap();
        assert_eq!(record.state, Some(ItemState::Falling));
        assert_eq!(record.presentation_changes, 1);
        assert_eq!(host.sounds_named("thud").collect::<Vec<_>>(), vec![item]);

        host.forget(item);
        assert!(host.record(item).is_none());
        assert_eq!(host.sounds().len(), 1);
    }
}
