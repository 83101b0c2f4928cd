//! Portals, energy waves and floating ornaments

use glam::Vec3;
use rand::Rng;

use crate::consts::*;
use crate::wrap_angle;

/// Shader-driven ring that spins about its own axis
#[derive(Debug, Clone)]
pub struct Portal {
    pub position: Vec3,
    /// Euler rotation (radians)
    pub rotation: Vec3,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Gradient endpoints (0xRRGGBB)
    pub colors: (u32, u32),
    /// Spin about z per frame
    pub spin: f32,
    /// Shader time uniform
    pub time: f32,
}

impl Portal {
    pub fn generate<R: Rng + ?Sized>(index: usize, rng: &mut R) -> Self {
        let pi = std::f32::consts::PI;
        Self {
            position: Vec3::new(
                (rng.random::<f32>() - 0.5) * SCENERY_SPAN,
                (rng.random::<f32>() - 0.5) * SCENERY_SPAN,
                (rng.random::<f32>() - 0.5) * SCENERY_SPAN,
            ),
            rotation: Vec3::new(
                rng.random::<f32>() * pi,
                rng.random::<f32>() * pi,
                rng.random::<f32>() * pi,
            ),
            inner_radius: 20.0,
            outer_radius: 25.0,
            colors: (0xff0080, 0x00ffff),
            spin: 0.01 + index as f32 * 0.002,
            time: 0.0,
        }
    }

    pub fn drift(&mut self, rate: f32) {
        self.rotation.z = wrap_angle(self.rotation.z + self.spin * rate);
    }

    /// Gradient mix factor the portal shader uses at its current time
    pub fn glow(&self) -> f32 {
        (self.time * 2.0).sin() * 0.5 + 0.5
    }
}

/// Wireframe sphere rippling with the shader time
#[derive(Debug, Clone)]
pub struct EnergyWave {
    pub radius: f32,
    pub rotation: Vec3,
    pub time: f32,
}

impl EnergyWave {
    pub fn new(index: usize) -> Self {
        Self {
            radius: 50.0 + index as f32 * 30.0,
            rotation: Vec3::ZERO,
            time: 0.0,
        }
    }

    pub fn drift(&mut self, rate: f32) {
        self.rotation.x = wrap_angle(self.rotation.x + 0.005 * rate);
        self.rotation.y = wrap_angle(self.rotation.y + 0.003 * rate);
    }

    /// Radial displacement of the surface at height `y`
    pub fn ripple(&self, y: f32) -> f32 {
        (self.time + y * 0.1).sin() * 5.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrnamentKind {
    Heart,
    Star,
}

impl OrnamentKind {
    pub fn color(&self) -> u32 {
        match self {
            OrnamentKind::Heart => 0xff69b4,
            OrnamentKind::Star => 0xffd700,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self {
            OrnamentKind::Heart => 0.8,
            OrnamentKind::Star => 0.7,
        }
    }
}

/// Small mesh bobbing up and down around its origin height
#[derive(Debug, Clone)]
pub struct FloatingOrnament {
    pub kind: OrnamentKind,
    pub position: Vec3,
    pub origin_y: f32,
    pub float_speed: f32,
    pub rotation: Vec3,
}

impl FloatingOrnament {
    pub fn generate<R: Rng + ?Sized>(index: usize, rng: &mut R) -> Self {
        let kind = if index < ORNAMENT_HEARTS {
            OrnamentKind::Heart
        } else {
            OrnamentKind::Star
        };
        let position = Vec3::new(
            (rng.random::<f32>() - 0.5) * 300.0,
            (rng.random::<f32>() - 0.5) * 300.0,
            (rng.random::<f32>() - 0.5) * 300.0,
        );
        Self {
            kind,
            position,
            origin_y: position.y,
            float_speed: rng.random_range(0.01..0.03),
            rotation: Vec3::ZERO,
        }
    }

    pub fn float(&mut self, time: f32, rate: f32) {
        self.position.y = self.origin_y + (time * self.float_speed).sin() * 15.0;
        self.rotation = Vec3::new(
            wrap_angle(self.rotation.x + 0.005 * rate),
            wrap_angle(self.rotation.y + 0.008 * rate),
            wrap_angle(self.rotation.z + 0.003 * rate),
        );
    }
}
