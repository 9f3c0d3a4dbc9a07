//! Tunable parameters for items and receiving agents.

use glam::Vec3;

use crate::error::{CoreError, ErrorSeverity};

/// Complete configuration, as loaded from a TOML file with `[item]` and
/// `[agent]` sections.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PickupConfig {
    pub item: ItemConfig,
    pub agent: AgentConfig,
}

impl PickupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.item.validate()?;
        self.agent.validate()
    }
}

/// Per-item timing and material parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemConfig {
    /// Length of the transfer into the agent's hand slot.
    pub transfer_duration_secs: f32,
    /// Closing rate of the lateral (X/Y) approach, per second.
    pub lateral_rate: f32,
    /// Period of the idle glow pulse.
    pub pulse_period_secs: f32,
    pub glow_amount: f32,
    pub fresnel_exponent: f32,
    pub fresnel_reflect_fraction: f32,
    /// Time a dropped item spends falling before it becomes pickup-able again.
    pub fall_settle_secs: f32,
}

impl ItemConfig {
    pub const DEFAULT_TRANSFER_DURATION_SECS: f32 = 0.7;
    pub const DEFAULT_LATERAL_RATE: f32 = 30.0;
    pub const DEFAULT_PULSE_PERIOD_SECS: f32 = 5.0;
    pub const DEFAULT_GLOW_AMOUNT: f32 = 150.0;
    pub const DEFAULT_FRESNEL_EXPONENT: f32 = 3.0;
    pub const DEFAULT_FRESNEL_REFLECT_FRACTION: f32 = 4.0;
    pub const DEFAULT_FALL_SETTLE_SECS: f32 = 0.7;

    pub const fn new() -> Self {
        Self {
            transfer_duration_secs: Self::DEFAULT_TRANSFER_DURATION_SECS,
            lateral_rate: Self::DEFAULT_LATERAL_RATE,
            pulse_period_secs: Self::DEFAULT_PULSE_PERIOD_SECS,
            glow_amount: Self::DEFAULT_GLOW_AMOUNT,
            fresnel_exponent: Self::DEFAULT_FRESNEL_EXPONENT,
            fresnel_reflect_fraction: Self::DEFAULT_FRESNEL_REFLECT_FRACTION,
            fall_settle_secs: Self::DEFAULT_FALL_SETTLE_SECS,
        }
    }

    pub const fn with_transfer_duration(mut self, secs: f32) -> Self {
        self.transfer_duration_secs = secs;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("transfer_duration_secs", self.transfer_duration_secs),
            ("pulse_period_secs", self.pulse_period_secs),
            ("fall_settle_secs", self.fall_settle_secs),
        ];
        for (field, value) in durations {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        let non_negative = [
            ("lateral_rate", self.lateral_rate),
            ("glow_amount", self.glow_amount),
            ("fresnel_exponent", self.fresnel_exponent),
            ("fresnel_reflect_fraction", self.fresnel_reflect_fraction),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving-agent parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    pub pickup_sound_cooldown_secs: f32,
    pub equip_sound_cooldown_secs: f32,
    /// Weapons the agent can carry, the equipped one included.
    pub inventory_capacity: usize,
    /// Interp slot anchors relative to the viewpoint (X forward, Z up).
    /// Slot 0 is the weapon anchor.
    pub slot_offsets: Vec<Vec3>,
}

impl AgentConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_INVENTORY_SLOTS: usize = 16;
    pub const MAX_INTERP_SLOTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SOUND_COOLDOWN_SECS: f32 = 0.2;
    pub const DEFAULT_INVENTORY_CAPACITY: usize = 6;
    pub const DEFAULT_INTERP_DISTANCE: f32 = 250.0;
    pub const DEFAULT_INTERP_ELEVATION: f32 = 65.0;

    pub fn new() -> Self {
        Self {
            pickup_sound_cooldown_secs: Self::DEFAULT_SOUND_COOLDOWN_SECS,
            equip_sound_cooldown_secs: Self::DEFAULT_SOUND_COOLDOWN_SECS,
            inventory_capacity: Self::DEFAULT_INVENTORY_CAPACITY,
            slot_offsets: Self::default_slot_offsets(),
        }
    }

    /// Weapon anchor straight ahead, then six anchors in two rows of three.
    pub fn default_slot_offsets() -> Vec<Vec3> {
        let distance = Self::DEFAULT_INTERP_DISTANCE;
        let elevation = Self::DEFAULT_INTERP_ELEVATION;
        let mut offsets = vec![Vec3::new(distance, 0.0, elevation)];
        for row in [elevation - 20.0, elevation - 60.0] {
            for lateral in [-60.0, 0.0, 60.0] {
                offsets.push(Vec3::new(distance * 0.8, lateral, row));
            }
        }
        offsets
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_offsets.is_empty() {
            return Err(ConfigError::NoInterpSlots);
        }
        if self.slot_offsets.len() > Self::MAX_INTERP_SLOTS {
            return Err(ConfigError::TooManyInterpSlots {
                count: self.slot_offsets.len(),
                max: Self::MAX_INTERP_SLOTS,
            });
        }
        if self.inventory_capacity == 0 || self.inventory_capacity > Self::MAX_INVENTORY_SLOTS {
            return Err(ConfigError::InventoryCapacity {
                capacity: self.inventory_capacity,
                max: Self::MAX_INVENTORY_SLOTS,
            });
        }
        let cooldowns = [
            ("pickup_sound_cooldown_secs", self.pickup_sound_cooldown_secs),
            ("equip_sound_cooldown_secs", self.equip_sound_cooldown_secs),
        ];
        for (field, value) in cooldowns {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration values the simulation refuses to run with.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("agent needs at least one interp slot")]
    NoInterpSlots,

    #[error("agent has {count} interp slots, at most {max} are supported")]
    TooManyInterpSlots { count: usize, max: usize },

    #[error("inventory capacity {capacity} must be within 1..={max}")]
    InventoryCapacity { capacity: usize, max: usize },
}

impl CoreError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositive { .. } => "CONFIG_NON_POSITIVE",
            Self::Negative { .. } => "CONFIG_NEGATIVE",
            Self::NoInterpSlots => "CONFIG_NO_INTERP_SLOTS",
            Self::TooManyInterpSlots { .. } => "CONFIG_TOO_MANY_INTERP_SLOTS",
            Self::InventoryCapacity { .. } => "CONFIG_INVENTORY_CAPACITY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PickupConfig::default();
        config.validate().unwrap();
        assert_eq!(config.item.transfer_duration_secs, 0.7);
        assert_eq!(config.agent.slot_offsets.len(), 7);
    }

    #[test]
    fn rejects_zero_transfer_duration() {
        let config = PickupConfig {
            item: ItemConfig::new().with_transfer_duration(0.0),
            ..PickupConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "transfer_duration_secs",
                ..
            })
        ));
    }

    #[test]
    fn rejects_agent_without_slots() {
        let agent = AgentConfig {
            slot_offsets: Vec::new(),
            ..AgentConfig::default()
        };
        assert_eq!(agent.validate(), Err(ConfigError::NoInterpSlots));
        assert_eq!(ConfigError::NoInterpSlots.severity(), ErrorSeverity::Fatal);
    }
}
