//! Decorative floating particles behind the deck.
//!
//! Each particle floats up once and is then replaced by a fresh one. All
//! particles share a single timer queue driven by the host frame tick.

use std::ops::Range;
use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::StdRng;

#[derive(Debug, Clone)]
pub struct ParticleRanges {
    /// Diameter in points.
    pub size: Range<f32>,
    /// Horizontal position as a fraction of viewport width.
    pub x: Range<f32>,
    pub opacity: Range<f32>,
    pub duration: Range<Duration>,
    pub delay: Range<Duration>,
    /// Extra time after the animation before the particle is replaced.
    pub margin: Duration,
}

impl Default for ParticleRanges {
    fn default() -> Self {
        Self {
            size: 2.0..6.0,
            x: 0.0..1.0,
            opacity: 0.1..0.5,
            duration: Duration::from_secs(10)..Duration::from_secs(20),
            delay: Duration::ZERO..Duration::from_secs(5),
            margin: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub size: f32,
    pub x: f32,
    pub opacity: f32,
    pub duration: Duration,
    pub delay: Duration,
    pub spawned: Instant,
}

impl Particle {
    /// Animation progress, `None` while still waiting out the delay.
    pub fn progress(&self, now: Instant) -> Option<f32> {
        let elapsed = now.saturating_duration_since(self.spawned);
        let running = elapsed.checked_sub(self.delay)?;
        let t = running.as_secs_f32() / self.duration.as_secs_f32().max(f32::EPSILON);
        Some(t.clamp(0.0, 1.0))
    }

    /// Opacity along the float-up: fade in, hold, fade out.
    pub fn opacity_at(&self, now: Instant) -> f32 {
        let Some(t) = self.progress(now) else {
            return 0.0;
        };
        let envelope = if t < 0.1 {
            t / 0.1
        } else if t > 0.9 {
            (1.0 - t) / 0.1
        } else {
            1.0
        };
        self.opacity * envelope
    }

    fn expires_at(&self, margin: Duration) -> Instant {
        self.spawned + self.delay + self.duration + margin
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
    ranges: ParticleRanges,
    rng: StdRng,
}

fn sample_duration(rng: &mut StdRng, range: &Range<Duration>) -> Duration {
    if range.start >= range.end {
        return range.start;
    }
    rng.gen_range(range.clone())
}

fn sample_f32(rng: &mut StdRng, range: &Range<f32>) -> f32 {
    if range.start >= range.end {
        return range.start;
    }
    rng.gen_range(range.clone())
}

impl ParticleField {
    pub fn new(ranges: ParticleRanges, rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            ranges,
            rng,
        }
    }

    pub fn spawn(&mut self, now: Instant) -> Particle {
        let r = &self.ranges;
        Particle {
            size: sample_f32(&mut self.rng, &r.size),
            x: sample_f32(&mut self.rng, &r.x),
            opacity: sample_f32(&mut self.rng, &r.opacity),
            duration: sample_duration(&mut self.rng, &r.duration),
            delay: sample_duration(&mut self.rng, &r.delay),
            spawned: now,
        }
    }

    pub fn initialize(&mut self, count: usize, now: Instant) {
        let particles = (0..count).map(|_| self.spawn(now)).collect();
        self.particles = particles;
    }

    /// Replace every particle whose animation and margin have elapsed.
    /// Returns how many were respawned.
    pub fn tick(&mut self, now: Instant) -> usize {
        let margin = self.ranges.margin;
        let mut respawned = 0;
        for i in 0..self.particles.len() {
            if now >= self.particles[i].expires_at(margin) {
                self.particles[i] = self.spawn(now);
                respawned += 1;
            }
        }
        respawned
    }

    /// Cancel all pending respawns.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn field() -> ParticleField {
        ParticleField::new(ParticleRanges::default(), StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_spawn_within_ranges() {
        let mut f = field();
        let now = Instant::now();
        let r = ParticleRanges::default();
        for _ in 0..200 {
            let p = f.spawn(now);
            assert!(r.size.contains(&p.size));
            assert!(r.x.contains(&p.x));
            assert!(r.opacity.contains(&p.opacity));
            assert!(r.duration.contains(&p.duration));
            assert!(r.delay.contains(&p.delay));
        }
    }

    #[test]
    fn test_initialize_count() {
        let mut f = field();
        f.initialize(25, Instant::now());
        assert_eq!(f.len(), 25);
        f.initialize(3, Instant::now());
        assert_eq!(f.len(), 3);
    }

    #[test]
    fn test_tick_respawns_expired_only() {
        let mut f = field();
        let start = Instant::now();
        f.initialize(10, start);
        assert_eq!(f.tick(start + Duration::from_secs(1)), 0);

        // Longest possible lifetime: delay 5s + duration 20s + margin 1s.
        let later = start + Duration::from_secs(26);
        assert_eq!(f.tick(later), 10);
        assert_eq!(f.len(), 10);
        assert!(f.particles().iter().all(|p| p.spawned == later));
    }

    #[test]
    fn test_progress_waits_for_delay() {
        let now = Instant::now();
        let p = Particle {
            size: 3.0,
            x: 0.5,
            opacity: 0.4,
            duration: Duration::from_secs(10),
            delay: Duration::from_secs(2),
            spawned: now,
        };
        assert_eq!(p.progress(now + Duration::from_secs(1)), None);
        assert_eq!(p.opacity_at(now + Duration::from_secs(1)), 0.0);
        let mid = p.progress(now + Duration::from_secs(7)).unwrap();
        assert!((mid - 0.5).abs() < 1e-4);
        assert!((p.opacity_at(now + Duration::from_secs(7)) - 0.4).abs() < 1e-4);
        assert_eq!(p.progress(now + Duration::from_secs(30)), Some(1.0));
    }

    #[test]
    fn test_clear_cancels() {
        let mut f = field();
        let now = Instant::now();
        f.initialize(5, now);
        f.clear();
        assert!(f.is_empty());
        assert_eq!(f.tick(now + Duration::from_secs(60)), 0);
    }

    #[test]
    fn test_seeded_fields_match() {
        let now = Instant::now();
        let mut a = field();
        let mut b = field();
        assert_eq!(a.spawn(now), b.spawn(now));
    }
}
