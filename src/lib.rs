//! Cosmic Birthday - a personalized birthday card universe and party quest
//!
//! Core modules:
//! - `story`: Party quest screens, choices and outcomes
//! - `cosmos`: Particle field, fireworks, scenery and the per-frame animator
//! - `effects`: Short-lived confetti and sparks
//! - `card`: Birthday card form validation and derived content
//! - `session`: Launch/teardown lifecycle of the card universe
//! - `settings`: Quality presets and effect toggles

pub mod card;
pub mod cosmos;
pub mod effects;
pub mod error;
pub mod session;
pub mod settings;
pub mod story;

pub use card::{Card, CardField, CardForm};
pub use error::{CardError, StoryError};
pub use session::Experience;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Scene configuration constants
pub mod consts {
    /// Default number of particles in the heart field
    pub const FIELD_PARTICLES: usize = 3000;
    /// Heart field radial scale range (particles are scaled by radius / 100)
    pub const FIELD_RADIUS_MIN: f32 = 150.0;
    pub const FIELD_RADIUS_MAX: f32 = 450.0;
    /// Uniform jitter applied to the heart curve before scaling (+/- half)
    pub const FIELD_JITTER: f32 = 100.0;
    /// Depth of the heart field on the z axis (+/- half)
    pub const FIELD_DEPTH: f32 = 400.0;
    /// Particle point size range
    pub const FIELD_SIZE_MIN: f32 = 2.0;
    pub const FIELD_SIZE_MAX: f32 = 10.0;

    /// Firework bursts per universe
    pub const FIREWORK_BURSTS: usize = 15;
    /// Particles per firework burst
    pub const FIREWORK_PARTICLES: usize = 150;
    /// Velocity multiplier applied each frame
    pub const FIREWORK_STEP: f32 = 0.5;
    /// A particle past this distance on any axis respawns
    pub const FIREWORK_BOUND: f32 = 300.0;
    /// Respawn span (particles land uniformly in +/- span / 2)
    pub const FIREWORK_RESPAWN_SPAN: f32 = 600.0;

    /// Placement span for portals and burst centers (+/- half)
    pub const SCENERY_SPAN: f32 = 400.0;
    pub const PORTAL_COUNT: usize = 8;
    pub const WAVE_COUNT: usize = 5;
    pub const ORNAMENT_COUNT: usize = 25;
    /// Ornaments below this index are hearts, the rest stars
    pub const ORNAMENT_HEARTS: usize = 15;

    /// Confetti pieces per celebration
    pub const CONFETTI_COUNT: usize = 50;
    /// Delay between consecutive confetti pieces (ms)
    pub const CONFETTI_STAGGER_MS: f64 = 100.0;
    /// Interval of the continuous spark emitter (ms)
    pub const SPARK_INTERVAL_MS: f64 = 200.0;
    /// Grace period after an effect's animation before it is removed (ms)
    pub const REMOVAL_MARGIN_MS: f64 = 50.0;
    /// Maximum spawns a continuous emitter catches up in one advance
    pub const MAX_CATCHUP_SPAWNS: u32 = 8;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Point on the classic heart curve for parameter `t`
///
/// `x = 16 sin³t`, `y = 13 cos t − 5 cos 2t − 2 cos 3t − cos 4t`
#[inline]
pub fn heart_curve(t: f32) -> Vec2 {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    Vec2::new(x, y)
}

/// Convert a packed 0xRRGGBB color into linear 0-1 RGB components
#[inline]
pub const fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
