//! Color palettes with fixed selection weights

use glam::Vec3;
use rand::Rng;

use crate::hex_rgb;

/// A small categorical palette sampled with fixed probabilities
#[derive(Debug, Clone, Copy)]
pub struct WeightedPalette<const N: usize> {
    entries: [(u32, f32); N],
}

impl<const N: usize> WeightedPalette<N> {
    /// Build from `(0xRRGGBB, weight)` pairs. Weights need not sum to 1.
    pub const fn new(entries: [(u32, f32); N]) -> Self {
        Self { entries }
    }

    /// Equal-weight palette
    pub const fn uniform(colors: [u32; N]) -> Self {
        let mut entries = [(0, 1.0); N];
        let mut i = 0;
        while i < N {
            entries[i].0 = colors[i];
            i += 1;
        }
        Self { entries }
    }

    fn total_weight(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Map a roll in [0, 1) to a packed color
    pub fn pick_hex(&self, roll: f32) -> u32 {
        let mut threshold = roll * self.total_weight();
        for (hex, weight) in &self.entries {
            if threshold < *weight {
                return *hex;
            }
            threshold -= weight;
        }
        // Rounding can carry the roll past the last bucket
        self.entries[N - 1].0
    }

    /// Sample a packed color
    pub fn sample_hex<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.pick_hex(rng.random::<f32>())
    }

    /// Sample a color as linear RGB
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        Vec3::from_array(hex_rgb(self.sample_hex(rng)))
    }

    /// Whether `rgb` is one of this palette's colors
    pub fn contains(&self, rgb: Vec3) -> bool {
        self.hexes().any(|hex| Vec3::from_array(hex_rgb(hex)) == rgb)
    }

    pub fn hexes(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|(hex, _)| *hex)
    }
}

/// Love colors of the heart field: hot pink, deep pink, gold
pub const LOVE: WeightedPalette<3> =
    WeightedPalette::new([(0xff69b4, 0.4), (0xff1493, 0.3), (0xffd700, 0.3)]);

/// Warm friendship colors of the fireworks
pub const FRIENDSHIP: WeightedPalette<5> =
    WeightedPalette::uniform([0xff69b4, 0xffd700, 0xff6347, 0x98fb98, 0x87ceeb]);

/// Format a packed color as a CSS hex string
pub fn css_hex(hex: u32) -> String {
    format!("#{:06x}", hex & 0xff_ffff)
}
