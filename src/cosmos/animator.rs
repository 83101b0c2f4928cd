//! Per-frame animation of the card universe
//!
//! Called once per rendered frame. Field, portal, wave, ornament and firework
//! updates share no state; a frame finishes all of them before the next one
//! starts since every buffer is mutated in place.

use rand::Rng;

use super::field::ParticleField;
use super::fireworks::FireworkBurst;
use super::scenery::{EnergyWave, FloatingOrnament, Portal};
use crate::consts::*;
use crate::wrap_angle;

/// How many of each decoration a universe gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniverseLayout {
    pub field_particles: usize,
    pub firework_bursts: usize,
    /// Portals, waves and ornaments
    pub scenery: bool,
}

impl Default for UniverseLayout {
    fn default() -> Self {
        Self {
            field_particles: FIELD_PARTICLES,
            firework_bursts: FIREWORK_BURSTS,
            scenery: true,
        }
    }
}

/// Everything drawn in the 3D card scene
#[derive(Debug, Clone)]
pub struct Universe {
    pub field: ParticleField,
    pub portals: Vec<Portal>,
    pub waves: Vec<EnergyWave>,
    pub ornaments: Vec<FloatingOrnament>,
    pub fireworks: Vec<FireworkBurst>,
    /// Wall-clock time the universe was built (ms)
    started_ms: f64,
    /// Seconds since start; never decreases
    time: f32,
    /// Drift multiplier (1.0 = full motion)
    drift_rate: f32,
    frames: u64,
}

/// Per-frame bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub time: f32,
    pub respawned: usize,
}

impl Universe {
    /// Build every buffer for a new universe
    pub fn generate<R: Rng + ?Sized>(layout: UniverseLayout, now_ms: f64, rng: &mut R) -> Self {
        let field = ParticleField::generate(layout.field_particles, rng);

        let (portals, waves, ornaments) = if layout.scenery {
            (
                (0..PORTAL_COUNT).map(|i| Portal::generate(i, rng)).collect(),
                (0..WAVE_COUNT).map(EnergyWave::new).collect(),
                (0..ORNAMENT_COUNT)
                    .map(|i| FloatingOrnament::generate(i, rng))
                    .collect(),
            )
        } else {
            (Vec::new(), Vec::new(), Vec::new())
        };

        let fireworks = (0..layout.firework_bursts)
            .map(|_| FireworkBurst::generate(FIREWORK_PARTICLES, rng))
            .collect();

        log::info!(
            "Universe generated: {} field particles, {} bursts, {} portals",
            field.len(),
            layout.firework_bursts,
            PORTAL_COUNT * layout.scenery as usize
        );

        Self {
            field,
            portals,
            waves,
            ornaments,
            fireworks,
            started_ms: now_ms,
            time: 0.0,
            drift_rate: 1.0,
            frames: 0,
        }
    }

    pub fn set_drift_rate(&mut self, rate: f32) {
        self.drift_rate = rate.max(0.0);
    }

    /// Current animation time (seconds)
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance one frame at wall-clock `now_ms`
    pub fn animate<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> FrameStats {
        let elapsed = ((now_ms - self.started_ms) / 1000.0) as f32;
        self.time = self.time.max(elapsed);
        let time = self.time;
        let rate = self.drift_rate;

        // Shader uniforms
        self.field.time = time;
        for portal in &mut self.portals {
            portal.time = time;
        }
        for wave in &mut self.waves {
            wave.time = time;
        }

        // Drift
        self.field.rotation_y = wrap_angle(self.field.rotation_y + 0.002 * rate);
        self.field.scale = 1.0 + (time * 2.0).sin() * 0.1 * rate;
        for portal in &mut self.portals {
            portal.drift(rate);
        }
        for wave in &mut self.waves {
            wave.drift(rate);
        }
        for ornament in &mut self.ornaments {
            ornament.float(time, rate);
        }

        let respawned = self
            .fireworks
            .iter_mut()
            .map(|burst| burst.step(rng))
            .sum();

        self.frames += 1;
        FrameStats { time, respawned }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosmos::fireworks::out_of_bounds;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn small_layout() -> UniverseLayout {
        UniverseLayout {
            field_particles: 200,
            firework_bursts: 3,
            scenery: true,
        }
    }

    #[test]
    fn test_generate_counts() {
        let mut rng = Pcg32::seed_from_u64(1);
        let universe = Universe::generate(UniverseLayout::default(), 0.0, &mut rng);
        assert_eq!(universe.field.len(), FIELD_PARTICLES);
        assert_eq!(universe.fireworks.len(), FIREWORK_BURSTS);
        assert_eq!(universe.portals.len(), PORTAL_COUNT);
        assert_eq!(universe.waves.len(), WAVE_COUNT);
        assert_eq!(universe.ornaments.len(), ORNAMENT_COUNT);
    }

    #[test]
    fn test_no_scenery() {
        let mut rng = Pcg32::seed_from_u64(1);
        let layout = UniverseLayout {
            scenery: false,
            ..small_layout()
        };
        let universe = Universe::generate(layout, 0.0, &mut rng);
        assert!(universe.portals.is_empty());
        assert!(universe.waves.is_empty());
        assert!(universe.ornaments.is_empty());
    }

    #[test]
    fn test_time_written_to_every_uniform() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut universe = Universe::generate(small_layout(), 10_000.0, &mut rng);
        let stats = universe.animate(12_500.0, &mut rng);

        assert!((stats.time - 2.5).abs() < 1e-6);
        assert_eq!(universe.field.time, stats.time);
        assert!(universe.portals.iter().all(|p| p.time == stats.time));
        assert!(universe.waves.iter().all(|w| w.time == stats.time));
    }

    #[test]
    fn test_time_never_goes_backwards() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut universe = Universe::generate(small_layout(), 0.0, &mut rng);
        universe.animate(5_000.0, &mut rng);
        let stats = universe.animate(4_000.0, &mut rng);
        assert_eq!(stats.time, 5.0);
        assert_eq!(universe.frames(), 2);
    }

    #[test]
    fn test_drift_applied_per_frame() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut universe = Universe::generate(small_layout(), 0.0, &mut rng);
        let portal_z = universe.portals[0].rotation.z;
        universe.animate(16.0, &mut rng);

        assert!((universe.field.rotation_y - 0.002).abs() < 1e-6);
        assert!((universe.waves[0].rotation.x - 0.005).abs() < 1e-6);
        assert!((universe.waves[0].rotation.y - 0.003).abs() < 1e-6);
        let spun = wrap_angle(portal_z + 0.01);
        assert!((universe.portals[0].rotation.z - spun).abs() < 1e-5);
    }

    #[test]
    fn test_reduced_drift() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut universe = Universe::generate(small_layout(), 0.0, &mut rng);
        universe.set_drift_rate(0.5);
        universe.animate(16.0, &mut rng);
        assert!((universe.field.rotation_y - 0.001).abs() < 1e-6);
    }

    #[test]
    fn test_pulse_scale_bounds() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut universe = Universe::generate(small_layout(), 0.0, &mut rng);
        for frame in 0..300 {
            universe.animate(frame as f64 * 16.7, &mut rng);
            assert!((0.9..=1.1).contains(&universe.field.scale));
        }
    }

    #[test]
    fn test_fireworks_run_forever_within_bounds() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut universe = Universe::generate(small_layout(), 0.0, &mut rng);
        let mut respawned = 0;
        for frame in 0..500 {
            respawned += universe.animate(frame as f64 * 16.7, &mut rng).respawned;
            for burst in &universe.fireworks {
                assert!(burst.positions.iter().all(|p| !out_of_bounds(*p)));
            }
        }
        // Fastest particles cross the cube in well under 500 frames
        assert!(respawned > 0);
        assert_eq!(universe.fireworks[0].len(), FIREWORK_PARTICLES);
    }
}
