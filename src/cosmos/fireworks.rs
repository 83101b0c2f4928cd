//! Continuous firework bursts
//!
//! Particles fly out at constant velocity and respawn somewhere random once
//! they leave the bounding cube, so a burst never finishes.

use glam::Vec3;
use rand::Rng;

use super::palette::FRIENDSHIP;
use crate::consts::*;

/// One burst of `FIREWORK_PARTICLES` points
#[derive(Debug, Clone)]
pub struct FireworkBurst {
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    pub colors: Vec<Vec3>,
}

/// Uniform point in the cube of side `span` centred on the origin
fn random_in_cube<R: Rng + ?Sized>(rng: &mut R, span: f32) -> Vec3 {
    Vec3::new(
        (rng.random::<f32>() - 0.5) * span,
        (rng.random::<f32>() - 0.5) * span,
        (rng.random::<f32>() - 0.5) * span,
    )
}

impl FireworkBurst {
    /// Ring burst of `count` particles from a random center
    pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let center = random_in_cube(rng, SCENERY_SPAN);
        let mut velocities = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);

        for j in 0..count {
            let angle = (j as f32 / count as f32) * std::f32::consts::TAU;
            let speed = rng.random_range(3.0..11.0);
            let vz = (rng.random::<f32>() - 0.5) * 6.0;
            velocities.push(Vec3::new(angle.cos() * speed, angle.sin() * speed, vz));
            colors.push(FRIENDSHIP.sample(rng));
        }

        Self {
            positions: vec![center; count],
            velocities,
            colors,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions as a flat 3N buffer
    pub fn position_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Advance every particle one frame, respawning the ones out of bounds
    ///
    /// Returns the number of respawned particles.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let mut respawned = 0;
        for (pos, vel) in self.positions.iter_mut().zip(&self.velocities) {
            *pos += *vel * FIREWORK_STEP;
            if out_of_bounds(*pos) {
                *pos = random_in_cube(rng, FIREWORK_RESPAWN_SPAN);
                respawned += 1;
            }
        }
        respawned
    }
}

/// Whether any axis is past the firework bound
#[inline]
pub fn out_of_bounds(pos: Vec3) -> bool {
    pos.abs().max_element() > FIREWORK_BOUND
}
