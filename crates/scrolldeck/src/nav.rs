use std::time::{Duration, Instant};

/// How the host should bring a slide into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

impl ScrollBehavior {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "smooth" => Some(Self::Smooth),
            "instant" => Some(Self::Instant),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Instant => "instant",
        }
    }
}

/// A request for the host to scroll slide `index` into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub index: usize,
    pub behavior: ScrollBehavior,
}

/// Owns "which slide is current".
///
/// Two input channels change the index: explicit transition requests
/// (`go_to` and its wrappers) and visibility observations
/// (`observe_visible`). Requests are dropped while a transition is in
/// flight; observations always win.
#[derive(Debug)]
pub struct Navigator {
    len: usize,
    current: usize,
    in_flight: Option<Instant>,
    behavior: ScrollBehavior,
    settle_timeout: Duration,
}

pub const DEFAULT_SETTLE_TIMEOUT: Duration = Duration::from_millis(1000);

impl Navigator {
    pub fn new(len: usize, behavior: ScrollBehavior) -> Self {
        Self {
            len,
            current: 0,
            in_flight: None,
            behavior,
            settle_timeout: DEFAULT_SETTLE_TIMEOUT,
        }
    }

    pub fn with_settle_timeout(mut self, timeout: Duration) -> Self {
        self.settle_timeout = timeout;
        self
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_transitioning(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn go_to(&mut self, index: usize, now: Instant) -> Option<ScrollRequest> {
        if index >= self.len || self.in_flight.is_some() {
            return None;
        }

        self.in_flight = Some(now);
        self.current = index;
        log::debug!("navigate to slide {} ({})", index + 1, self.behavior.name());

        Some(ScrollRequest {
            index,
            behavior: self.behavior,
        })
    }

    /// Move by `delta` slides. Never wraps.
    pub fn step(&mut self, delta: isize, now: Instant) -> Option<ScrollRequest> {
        let target = self.current.checked_add_signed(delta)?;
        self.go_to(target, now)
    }

    pub fn next(&mut self, now: Instant) -> Option<ScrollRequest> {
        self.step(1, now)
    }

    pub fn prev(&mut self, now: Instant) -> Option<ScrollRequest> {
        self.step(-1, now)
    }

    pub fn first(&mut self, now: Instant) -> Option<ScrollRequest> {
        self.go_to(0, now)
    }

    pub fn last(&mut self, now: Instant) -> Option<ScrollRequest> {
        self.go_to(self.len.saturating_sub(1), now)
    }

    /// Jump by 1-based ordinal (digit keys 1-9).
    pub fn ordinal(&mut self, digit: u8, now: Instant) -> Option<ScrollRequest> {
        if !(1..=9).contains(&digit) {
            return None;
        }
        self.go_to(usize::from(digit - 1), now)
    }

    /// Record the slide the viewport actually shows. Bypasses the in-flight
    /// guard. Returns true when the current index changed.
    pub fn observe_visible(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        let changed = self.current != index;
        if changed {
            log::trace!(
                "visible slide {} overrides current {}",
                index + 1,
                self.current + 1
            );
        }
        self.current = index;
        changed
    }

    /// The host's scroll came to rest.
    pub fn settle(&mut self) {
        self.in_flight = None;
    }

    /// Clears a guard whose settle event never arrived.
    pub fn tick(&mut self, now: Instant) {
        if let Some(started) = self.in_flight {
            if now.saturating_duration_since(started) >= self.settle_timeout {
                log::debug!("transition settle timed out, releasing guard");
                self.in_flight = None;
            }
        }
    }

    /// Put the index back into range after the deck was replaced.
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        self.current = self.current.min(len.saturating_sub(1));
        self.in_flight = None;
    }
}
