use std::fmt;

use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

const LUMINANCE_THRESHOLD: f32 = 0.179;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[rkyv(compare(PartialEq), derive(Debug))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn luminance(&self) -> f32 {
        fn channel(value: u8) -> f32 {
            let c = value as f32 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    pub fn contrasting_font(&self) -> Self {
        if self.luminance() > LUMINANCE_THRESHOLD {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColor {
    pub background: Rgb,
    pub font: Rgb,
}

impl Default for BoardColor {
    fn default() -> Self {
        Self {
            background: Rgb::BLACK,
            font: Rgb::WHITE,
        }
    }
}

pub fn derive_colors(seed: u64) -> BoardColor {
    let mixed = splitmix64(seed);
    let background = Rgb::new(mixed as u8, (mixed >> 8) as u8, (mixed >> 16) as u8);

    BoardColor {
        background,
        font: background.contrasting_font(),
    }
}

#[derive(Debug, Clone)]
pub struct SeedSequence {
    state: u64,
}

impl SeedSequence {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_seed(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        self.state
    }
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        assert_eq!(derive_colors(42), derive_colors(42));

        let mut seeds = SeedSequence::new(7);
        let first = seeds.next_seed();
        let second = seeds.next_seed();
        assert_ne!(first, second);
    }

    #[test]
    fn test_font_contrasts_background() {
        assert_eq!(Rgb::WHITE.contrasting_font(), Rgb::BLACK);
        assert_eq!(Rgb::BLACK.contrasting_font(), Rgb::WHITE);
        assert_eq!(Rgb::new(255, 255, 0).contrasting_font(), Rgb::BLACK);
        assert_eq!(Rgb::new(0, 0, 128).contrasting_font(), Rgb::WHITE);

        for seed in 0..64 {
            let colors = derive_colors(seed);
            assert_eq!(colors.font, colors.background.contrasting_font());
        }
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(Rgb::new(255, 16, 0).to_string(), "#ff1000");
    }
}
