//! Short-lived confetti and sparks
//!
//! The emitter keeps its own due times instead of registering browser
//! timers: the page calls [`EffectEmitter::advance`] every frame and mirrors
//! the returned changes into DOM nodes. Tearing down clears every pending
//! spawn, so nothing can fire against a page that is gone.

use rand::Rng;

use crate::consts::*;
use crate::cosmos::palette::{WeightedPalette, css_hex};

/// Identity of a spawned effect (unique per emitter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Falling paper dot
    Confetti,
    /// Exploding firework spark
    Spark,
}

const CONFETTI_COLORS: WeightedPalette<5> =
    WeightedPalette::uniform([0xff6b6b, 0xffd700, 0xff69b4, 0x00ffff, 0x98fb98]);

const SPARK_COLORS: WeightedPalette<8> = WeightedPalette::uniform([
    0xff6b6b, 0xffd700, 0x00ff88, 0xff69b4, 0x00bfff, 0xff4757, 0x7bed9f, 0x70a1ff,
]);

impl EffectKind {
    /// CSS class of the element
    pub fn class_name(&self) -> &'static str {
        match self {
            EffectKind::Confetti => "confetti",
            EffectKind::Spark => "particle",
        }
    }

    /// CSS keyframes the element runs
    pub fn animation(&self) -> &'static str {
        match self {
            EffectKind::Confetti => "fall",
            EffectKind::Spark => "explode",
        }
    }

    fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Look {
        match self {
            EffectKind::Confetti => Look {
                delay_ms: 0.0,
                duration_ms: 3000.0,
                x_pct: rng.random_range(0.0..100.0),
                y_pct: 0.0,
                size_px: 10.0,
                color: CONFETTI_COLORS.sample_hex(rng),
            },
            EffectKind::Spark => Look {
                x_pct: rng.random_range(0.0..100.0),
                y_pct: rng.random_range(0.0..100.0),
                duration_ms: rng.random_range(1000.0..3000.0),
                size_px: rng.random_range(2.0..8.0),
                color: SPARK_COLORS.sample_hex(rng),
                delay_ms: rng.random_range(0.0..2000.0),
            },
        }
    }
}

struct Look {
    delay_ms: f64,
    duration_ms: f64,
    x_pct: f32,
    y_pct: f32,
    size_px: f32,
    color: u32,
}

/// A self-removing visual element
#[derive(Debug, Clone, PartialEq)]
pub struct EphemeralEffect {
    pub id: EffectId,
    pub kind: EffectKind,
    pub spawned_at_ms: f64,
    /// Animation start delay
    pub delay_ms: f64,
    /// Animation length
    pub duration_ms: f64,
    /// Horizontal position in percent of the container
    pub x_pct: f32,
    /// Vertical position in percent of the container
    pub y_pct: f32,
    pub size_px: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl EphemeralEffect {
    /// Time from spawn until the animation has finished
    pub fn lifetime_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms
    }

    /// Wall-clock time at which the effect is removed
    pub fn expires_at_ms(&self) -> f64 {
        self.spawned_at_ms + self.lifetime_ms() + REMOVAL_MARGIN_MS
    }

    pub fn css_color(&self) -> String {
        css_hex(self.color)
    }

    /// Inline style for the effect's element
    pub fn css(&self) -> String {
        match self.kind {
            EffectKind::Confetti => format!(
                "position: fixed; left: {:.2}vw; top: -10px; width: {size}px; height: {size}px; \
                 background-color: {color}; border-radius: 50%; pointer-events: none; z-index: 1000; \
                 animation: {anim} {dur}s linear forwards;",
                self.x_pct,
                anim = self.kind.animation(),
                size = self.size_px,
                color = self.css_color(),
                dur = self.duration_ms / 1000.0,
            ),
            EffectKind::Spark => format!(
                "position: absolute; left: {:.2}%; top: {:.2}%; width: {size:.2}px; height: {size:.2}px; \
                 background: {color}; border-radius: 50%; box-shadow: 0 0 {glow:.2}px {color}; \
                 animation: {anim} {dur:.3}s ease-out forwards; animation-delay: {delay:.3}s;",
                self.x_pct,
                self.y_pct,
                anim = self.kind.animation(),
                size = self.size_px,
                glow = self.size_px * 2.0,
                color = self.css_color(),
                dur = self.duration_ms / 1000.0,
                delay = self.delay_ms / 1000.0,
            ),
        }
    }
}

/// What changed during one [`EffectEmitter::advance`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectChanges {
    pub spawned: Vec<EphemeralEffect>,
    pub expired: Vec<EffectId>,
}

impl EffectChanges {
    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty() && self.expired.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Continuous {
    interval_ms: f64,
    next_at_ms: f64,
}

/// Spawns effects of one kind and expires them on schedule
#[derive(Debug, Clone)]
pub struct EffectEmitter {
    kind: EffectKind,
    active: Vec<EphemeralEffect>,
    /// Scheduled spawn times, not yet reached
    pending: Vec<f64>,
    continuous: Option<Continuous>,
    next_id: u64,
}

impl EffectEmitter {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            active: Vec::new(),
            pending: Vec::new(),
            continuous: None,
            next_id: 1,
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn active(&self) -> &[EphemeralEffect] {
        &self.active
    }

    pub fn is_active(&self, id: EffectId) -> bool {
        self.active.iter().any(|e| e.id == id)
    }

    /// Spawns scheduled but not yet made
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_running(&self) -> bool {
        self.continuous.is_some()
    }

    fn make<R: Rng + ?Sized>(&mut self, at_ms: f64, rng: &mut R) -> EphemeralEffect {
        let look = self.kind.roll(rng);
        let id = EffectId(self.next_id);
        self.next_id += 1;
        EphemeralEffect {
            id,
            kind: self.kind,
            spawned_at_ms: at_ms,
            delay_ms: look.delay_ms,
            duration_ms: look.duration_ms,
            x_pct: look.x_pct,
            y_pct: look.y_pct,
            size_px: look.size_px,
            color: look.color,
        }
    }

    /// Create one effect now
    pub fn spawn<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> EphemeralEffect {
        let effect = self.make(now_ms, rng);
        self.active.push(effect.clone());
        effect
    }

    /// Schedule `count` spawns, `stagger_ms` apart, starting at `now_ms`
    pub fn burst(&mut self, now_ms: f64, count: usize, stagger_ms: f64) {
        self.pending
            .extend((0..count).map(|i| now_ms + i as f64 * stagger_ms));
    }

    /// Spawn one effect every `interval_ms`, first one at `now_ms`
    pub fn start_continuous(&mut self, now_ms: f64, interval_ms: f64) {
        self.continuous = Some(Continuous {
            interval_ms: interval_ms.max(1.0),
            next_at_ms: now_ms,
        });
    }

    pub fn stop_continuous(&mut self) {
        self.continuous = None;
    }

    /// Make due spawns and drop expired effects
    pub fn advance<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> EffectChanges {
        let mut changes = EffectChanges::default();

        let mut due: Vec<f64> = Vec::new();
        self.pending.retain(|&at| {
            if at <= now_ms {
                due.push(at);
                false
            } else {
                true
            }
        });

        if let Some(mut schedule) = self.continuous {
            let behind = ((now_ms - schedule.next_at_ms) / schedule.interval_ms).floor();
            if behind >= MAX_CATCHUP_SPAWNS as f64 {
                // Stalled (hidden tab): skip ahead instead of flooding
                log::debug!("{:?} emitter skipped {} spawns", self.kind, behind as u64);
                schedule.next_at_ms +=
                    (behind - (MAX_CATCHUP_SPAWNS - 1) as f64) * schedule.interval_ms;
            }
            while schedule.next_at_ms <= now_ms {
                due.push(schedule.next_at_ms);
                schedule.next_at_ms += schedule.interval_ms;
            }
            self.continuous = Some(schedule);
        }

        self.active.retain(|effect| {
            if effect.expires_at_ms() <= now_ms {
                changes.expired.push(effect.id);
                false
            } else {
                true
            }
        });

        due.sort_by(f64::total_cmp);
        for at in due {
            let effect = self.make(at, rng);
            // Spawns from a long stall may already be over
            if effect.expires_at_ms() > now_ms {
                self.active.push(effect.clone());
                changes.spawned.push(effect);
            }
        }

        changes
    }

    /// Cancel every pending spawn and return the ids still on screen
    pub fn teardown(&mut self) -> Vec<EffectId> {
        self.pending.clear();
        self.continuous = None;
        self.active.drain(..).map(|effect| effect.id).collect()
    }
}
