use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::StdRng;

const STEP_INTERVAL: Duration = Duration::from_millis(150);
const FADE_DURATION: Duration = Duration::from_millis(500);
/// Progress never passes this until the asset prefetch is done.
const WAITING_CAP: f32 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Loading,
    FadingOut { since: Instant },
    Done,
}

/// Simulated loading screen shown while background images warm up.
pub struct Loader {
    progress: f32,
    phase: Phase,
    next_step: Instant,
    rng: StdRng,
}

impl Loader {
    pub fn new(rng: StdRng, now: Instant) -> Self {
        Self {
            progress: 0.0,
            phase: Phase::Loading,
            next_step: now + STEP_INTERVAL,
            rng,
        }
    }

    /// A loader that has already finished (loading screen disabled).
    pub fn finished(rng: StdRng, now: Instant) -> Self {
        Self {
            progress: 100.0,
            phase: Phase::Done,
            next_step: now,
            rng,
        }
    }

    pub fn tick(&mut self, now: Instant, assets_ready: bool) {
        match self.phase {
            Phase::Loading => {
                while now >= self.next_step && self.progress < 100.0 {
                    let increment: f32 = self.rng.gen_range(5.0..15.0);
                    let cap = if assets_ready { 100.0 } else { WAITING_CAP };
                    self.progress = (self.progress + increment).min(cap);
                    self.next_step += STEP_INTERVAL;
                    if !assets_ready && self.progress >= WAITING_CAP {
                        break;
                    }
                }
                if self.next_step <= now {
                    self.next_step = now + STEP_INTERVAL;
                }
                if self.progress >= 100.0 {
                    log::debug!("loading screen complete");
                    self.phase = Phase::FadingOut { since: now };
                }
            }
            Phase::FadingOut { since } => {
                if now.saturating_duration_since(since) >= FADE_DURATION {
                    self.phase = Phase::Done;
                }
            }
            Phase::Done => {}
        }
    }

    /// Percentage shown on the loading bar.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Overlay opacity: opaque while loading, fading to zero afterwards.
    pub fn opacity(&self, now: Instant) -> f32 {
        match self.phase {
            Phase::Loading => 1.0,
            Phase::FadingOut { since } => {
                let t = now.saturating_duration_since(since).as_secs_f32()
                    / FADE_DURATION.as_secs_f32();
                (1.0 - t).clamp(0.0, 1.0)
            }
            Phase::Done => 0.0,
        }
    }

    /// The deck is covered and does not take input.
    pub fn is_blocking(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }
}
