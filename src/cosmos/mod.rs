//! The card universe: particle field, fireworks, scenery and camera
//!
//! Generation happens once per launch; afterwards only [`Universe::animate`]
//! touches the buffers.

pub mod animator;
pub mod camera;
pub mod field;
pub mod fireworks;
pub mod palette;
pub mod scenery;

pub use animator::{FrameStats, Universe, UniverseLayout};
pub use camera::{Camera, CameraJourney, Projection};
pub use field::{Glyph, ParticleField};
pub use fireworks::FireworkBurst;
pub use palette::WeightedPalette;
pub use scenery::{EnergyWave, FloatingOrnament, OrnamentKind, Portal};
