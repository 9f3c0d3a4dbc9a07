//! Content compiled into the binary, used when no data file is supplied.

use std::sync::Arc;

use pickup_core::{
    ItemCurves, ItemKind, ItemSpec, Rarity, ScalarCurve, SoundCue, VectorCurve,
};

/// Keys are literals; a malformed table is a programming error caught by the
/// tests below, so fall back to a flat curve rather than panic.
fn keys(pairs: &[(f32, f32)]) -> ScalarCurve {
    ScalarCurve::from_pairs(pairs).unwrap_or_else(|_| ScalarCurve::constant(0.0))
}

/// Rises past the anchor and eases back, like a toss into the hand.
pub fn vertical_easing() -> ScalarCurve {
    keys(&[(0.0, 0.0), (0.35, 0.55), (0.7, 1.08), (1.0, 1.0)])
}

/// Swells slightly mid-flight and lands at rest size.
pub fn transfer_scale() -> ScalarCurve {
    keys(&[(0.0, 1.0), (0.5, 1.25), (1.0, 1.0)])
}

/// Slow breathing glow while an item waits on the ground.
pub fn idle_pulse() -> VectorCurve {
    VectorCurve::new(
        keys(&[(0.0, 0.2), (0.5, 1.0), (1.0, 0.2)]),
        keys(&[(0.0, 1.0), (0.5, 0.6), (1.0, 1.0)]),
        keys(&[(0.0, 0.1), (0.5, 0.4), (1.0, 0.1)]),
    )
}

/// Glow that flares and fades over one transfer.
pub fn transfer_pulse() -> VectorCurve {
    VectorCurve::new(
        keys(&[(0.0, 1.0), (0.2, 2.0), (1.0, 0.0)]),
        keys(&[(0.0, 0.5), (1.0, 1.0)]),
        keys(&[(0.0, 0.5), (1.0, 0.0)]),
    )
}

/// All four curves bundled for an item.
pub fn default_curves() -> ItemCurves {
    ItemCurves {
        vertical: Some(Arc::new(vertical_easing())),
        scale: Some(Arc::new(transfer_scale())),
        idle_pulse: Some(Arc::new(idle_pulse())),
        transfer_pulse: Some(Arc::new(transfer_pulse())),
    }
}

/// A small catalog covering both item kinds and every rarity.
pub fn default_catalog() -> Vec<ItemSpec> {
    let weapon = |name: &str, rarity: Rarity, sound: &str| {
        ItemSpec::new(name, ItemKind::Weapon)
            .with_rarity(rarity)
            .with_sounds(
                Some(SoundCue::new(format!("{sound}_pickup"))),
                Some(SoundCue::new(format!("{sound}_equip"))),
            )
    };
    vec![
        weapon("Rusty Pistol", Rarity::Damaged, "pistol"),
        weapon("Submachine Gun", Rarity::Common, "smg"),
        weapon("Pump Shotgun", Rarity::Uncommon, "shotgun"),
        weapon("Assault Rifle", Rarity::Rare, "rifle"),
        weapon("Golden Rifle", Rarity::Legendary, "rifle"),
        ItemSpec::new("9mm Rounds", ItemKind::Ammo)
            .with_count(30)
            .with_sounds(Some(SoundCue::new("ammo_pickup")), None),
        ItemSpec::new("Rifle Rounds", ItemKind::Ammo)
            .with_count(20)
            .with_sounds(Some(SoundCue::new("ammo_pickup")), None),
    ]
}
