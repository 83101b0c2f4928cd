//! Card experience session
//!
//! Owns everything the launched card needs: universe, camera, spark emitter
//! and the random source. `launch` builds it, `teardown` drops it; a frame
//! against a torn-down session is a no-op that tells the caller to stop.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::card::Card;
use crate::cosmos::{Camera, CameraJourney, FrameStats, Universe};
use crate::effects::{EffectChanges, EffectEmitter, EffectId, EffectKind};
use crate::settings::Settings;

/// Live scene state, present only between launch and teardown
struct Scene {
    card: Card,
    universe: Universe,
    camera: Camera,
    journey: CameraJourney,
    started_ms: f64,
}

/// Session context for the birthday card universe
pub struct Experience {
    settings: Settings,
    rng: Pcg32,
    scene: Option<Scene>,
    sparks: EffectEmitter,
}

impl Experience {
    /// Create an idle session; `seed` drives every random choice
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            settings,
            rng: Pcg32::seed_from_u64(seed),
            scene: None,
            sparks: EffectEmitter::new(EffectKind::Spark),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether a scene is live (the frame loop should keep running)
    pub fn is_live(&self) -> bool {
        self.scene.is_some()
    }

    pub fn card(&self) -> Option<&Card> {
        self.scene.as_ref().map(|s| &s.card)
    }

    pub fn universe(&self) -> Option<&Universe> {
        self.scene.as_ref().map(|s| &s.universe)
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.scene.as_ref().map(|s| &s.camera)
    }

    pub fn sparks(&self) -> &EffectEmitter {
        &self.sparks
    }

    /// Build the universe for `card` and start the spark emitter
    ///
    /// Launching over a live scene tears the old one down first; the ids it
    /// returns are effects the page must remove.
    pub fn launch(&mut self, card: Card, viewport: (f32, f32), now_ms: f64) -> Vec<EffectId> {
        let stale = if self.is_live() {
            log::warn!("Relaunching over a live universe");
            self.teardown()
        } else {
            Vec::new()
        };

        let mut universe = Universe::generate(self.settings.layout(), now_ms, &mut self.rng);
        universe.set_drift_rate(self.settings.drift_rate());

        let mut camera = Camera::new(viewport.0, viewport.1);
        let journey = CameraJourney;
        journey.apply(&mut camera, 0.0);

        if self.settings.effective_sparks() {
            self.sparks
                .start_continuous(now_ms, self.settings.spark_interval_ms());
        }

        log::info!("Launched universe for {}", card.name);
        self.scene = Some(Scene {
            card,
            universe,
            camera,
            journey,
            started_ms: now_ms,
        });
        stale
    }

    /// Animate one frame; returns `false` once the session is torn down
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let Some(scene) = self.scene.as_mut() else {
            return false;
        };

        let stats: FrameStats = scene.universe.animate(now_ms, &mut self.rng);
        let elapsed = ((now_ms - scene.started_ms) / 1000.0).max(0.0) as f32;
        scene.journey.apply(&mut scene.camera, elapsed);

        if stats.respawned > 0 {
            log::trace!(
                "Frame {}: {} firework particles respawned",
                scene.universe.frames(),
                stats.respawned
            );
        }
        true
    }

    /// Spawn and expire sparks
    pub fn advance_effects(&mut self, now_ms: f64) -> EffectChanges {
        self.sparks.advance(now_ms, &mut self.rng)
    }

    /// Track a new viewport size
    pub fn resize(&mut self, width: f32, height: f32) {
        if let Some(scene) = self.scene.as_mut() {
            scene.camera.resize(width, height);
        }
    }

    /// Drop the scene and cancel every pending effect
    ///
    /// Returns the ids of effects still on screen.
    pub fn teardown(&mut self) -> Vec<EffectId> {
        if self.scene.take().is_some() {
            log::info!("Universe torn down");
        }
        self.sparks.teardown()
    }
}
