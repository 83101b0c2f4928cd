//! Heart-shaped particle field
//!
//! Buffers are built once per universe; the animator only touches the
//! field's transform and time uniform afterwards.

use glam::{Mat4, Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::palette::LOVE;
use crate::consts::*;
use crate::heart_curve;

/// Sprite drawn for a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Glyph {
    Heart,
    Star,
    Sparkle,
}

impl Glyph {
    const ALL: [Glyph; 3] = [Glyph::Heart, Glyph::Star, Glyph::Sparkle];
}

/// Particle buffers plus the field's transform and shader time
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub sizes: Vec<f32>,
    pub glyphs: Vec<Glyph>,
    /// Shader time uniform (seconds)
    pub time: f32,
    /// Slow spin about the y axis
    pub rotation_y: f32,
    /// Uniform pulse scale
    pub scale: f32,
}

impl ParticleField {
    /// Generate `count` particles scattered around the heart curve
    pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        let mut sizes = Vec::with_capacity(count);
        let mut glyphs = Vec::with_capacity(count);

        for _ in 0..count {
            let t = rng.random_range(0.0..std::f32::consts::TAU);
            let heart = heart_curve(t);
            let radius = rng.random_range(FIELD_RADIUS_MIN..FIELD_RADIUS_MAX);
            let jitter_x = (rng.random::<f32>() - 0.5) * FIELD_JITTER;
            let jitter_y = (rng.random::<f32>() - 0.5) * FIELD_JITTER;
            let z = (rng.random::<f32>() - 0.5) * FIELD_DEPTH;

            positions.push(Vec3::new(
                (heart.x + jitter_x) * (radius / 100.0),
                (heart.y + jitter_y) * (radius / 100.0),
                z,
            ));
            colors.push(LOVE.sample(rng));
            sizes.push(rng.random_range(FIELD_SIZE_MIN..FIELD_SIZE_MAX));
            glyphs.push(Glyph::ALL[rng.random_range(0..Glyph::ALL.len())]);
        }

        Self {
            positions,
            colors,
            sizes,
            glyphs,
            time: 0.0,
            rotation_y: 0.0,
            scale: 1.0,
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Positions as a flat `[x, y, z, x, y, z, ...]` buffer (3N floats)
    pub fn position_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors as a flat `[r, g, b, ...]` buffer (3N floats)
    pub fn color_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Model matrix for the current spin and pulse
    pub fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.rotation_y),
            Vec3::ZERO,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_buffers_are_consistent() {
        let mut rng = Pcg32::seed_from_u64(12345);
        let field = ParticleField::generate(500, &mut rng);

        assert_eq!(field.len(), 500);
        assert_eq!(field.positions.len(), 500);
        assert_eq!(field.colors.len(), 500);
        assert_eq!(field.glyphs.len(), 500);
        assert_eq!(field.position_buffer().len(), 1500);
        assert_eq!(field.color_buffer().len(), 1500);
        assert!(field.position_buffer().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_colors_and_sizes_in_range() {
        let mut rng = Pcg32::seed_from_u64(99);
        let field = ParticleField::generate(1000, &mut rng);

        assert!(field.colors.iter().all(|c| LOVE.contains(*c)));
        assert!(
            field
                .sizes
                .iter()
                .all(|s| (FIELD_SIZE_MIN..FIELD_SIZE_MAX).contains(s))
        );
    }

    #[test]
    fn test_particles_stay_inside_the_heart_envelope() {
        let mut rng = Pcg32::seed_from_u64(3);
        let field = ParticleField::generate(1000, &mut rng);

        // |heart| <= 17 per axis, jitter <= 50, scale <= 4.5
        let max_xy = (17.0 + FIELD_JITTER / 2.0) * FIELD_RADIUS_MAX / 100.0;
        for p in &field.positions {
            assert!(p.x.abs() <= max_xy && p.y.abs() <= max_xy);
            assert!(p.z.abs() <= FIELD_DEPTH / 2.0);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = ParticleField::generate(64, &mut Pcg32::seed_from_u64(42));
        let b = ParticleField::generate(64, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.colors, b.colors);
        assert_eq!(a.sizes, b.sizes);
    }

    #[test]
    fn test_empty_field() {
        let field = ParticleField::generate(0, &mut Pcg32::seed_from_u64(1));
        assert!(field.is_empty());
        assert!(field.position_buffer().is_empty());
    }
}
