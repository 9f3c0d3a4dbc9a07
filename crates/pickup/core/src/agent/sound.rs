//! Cooldown gates that keep feedback sounds from stacking.

use crate::timer::Countdown;

/// Which feedback sound a gate guards.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SoundKind {
    Pickup,
    Equip,
}

/// Allows one trigger per cooldown window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundGate {
    cooldown: Countdown,
    open: bool,
}

impl SoundGate {
    pub fn new(cooldown_secs: f32) -> Self {
        Self {
            cooldown: Countdown::new(cooldown_secs),
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Closes the gate and starts the cooldown if it was open.
    pub fn try_trigger(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.cooldown.restart();
        true
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.open && self.cooldown.advance(dt) {
            self.open = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_allows_one_trigger_per_window() {
        let mut gate = SoundGate::new(0.2);
        assert!(gate.try_trigger());
        assert!(!gate.try_trigger());

        gate.tick(0.1);
        assert!(!gate.try_trigger());

        gate.tick(0.1);
        assert!(gate.is_open());
        assert!(gate.try_trigger());
    }
}
