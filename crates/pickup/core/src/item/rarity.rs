//! Rarity tiers and the star rating derived from them.

use bitflags::bitflags;

/// Ordered item quality.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    Damaged,
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    /// Number of lit stars, 1 for `Damaged` up to 5 for `Legendary`.
    pub const fn star_count(self) -> u8 {
        match self {
            Rarity::Damaged => 1,
            Rarity::Common => 2,
            Rarity::Uncommon => 3,
            Rarity::Rare => 4,
            Rarity::Legendary => 5,
        }
    }

    pub const fn stars(self) -> StarFlags {
        StarFlags::for_rarity(self)
    }
}

bitflags! {
    /// Lit stars of the pickup widget. Bit `i` is star `i`; bit 0 is never used.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct StarFlags: u8 {
        const STAR_1 = 1 << 1;
        const STAR_2 = 1 << 2;
        const STAR_3 = 1 << 3;
        const STAR_4 = 1 << 4;
        const STAR_5 = 1 << 5;
    }
}

impl StarFlags {
    /// Length of the flag sequence handed to widgets, index 0 included.
    pub const LEN: usize = 6;

    /// Stars 1..=n lit for a rarity with `n` stars.
    pub const fn for_rarity(rarity: Rarity) -> Self {
        let n = rarity.star_count();
        Self::from_bits_truncate(((1u8 << (n + 1)) - 1) & !1)
    }

    pub fn is_active(&self, index: usize) -> bool {
        index < Self::LEN && self.bits() & (1 << index) != 0
    }

    pub fn active_count(&self) -> u32 {
        self.bits().count_ones()
    }

    pub fn to_array(&self) -> [bool; Self::LEN] {
        core::array::from_fn(|index| self.is_active(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn star_prefix_matches_rarity() {
        for rarity in Rarity::iter() {
            let stars = rarity.stars().to_array();
            let n = rarity.star_count() as usize;
            assert!(!stars[0], "{rarity}: flag 0 must stay off");
            for (index, lit) in stars.iter().enumerate().skip(1) {
                assert_eq!(*lit, index <= n, "{rarity}: star {index}");
            }
        }
    }

    #[test]
    fn rare_lights_four_stars() {
        let stars = Rarity::Rare.stars();
        assert_eq!(stars.active_count(), 4);
        assert_eq!(stars.to_array(), [false, true, true, true, true, false]);
        assert_eq!(Rarity::Legendary.stars(), StarFlags::all());
    }

    #[test]
    fn rarity_is_ordered() {
        let tiers: Vec<_> = Rarity::iter().collect();
        assert!(tiers.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!("legendary".parse::<Rarity>().unwrap(), Rarity::Legendary);
        assert_eq!("RARE".parse::<Rarity>().unwrap(), Rarity::Rare);
    }
}
