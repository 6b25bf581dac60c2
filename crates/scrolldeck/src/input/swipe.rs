/// Minimum horizontal travel, in points, for a touch to count as a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeStep {
    Next,
    Prev,
}

/// Turns a touch start/end pair into at most one navigation step.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Finish the gesture. A mostly-horizontal swipe past the threshold
    /// moves opposite the finger: dragging left reveals the next slide.
    pub fn end(&mut self, x: f32, y: f32) -> Option<SwipeStep> {
        let (sx, sy) = self.start.take()?;
        classify(x - sx, y - sy)
    }
}

pub fn classify(dx: f32, dy: f32) -> Option<SwipeStep> {
    if dx.abs() <= dy.abs() || dx.abs() <= SWIPE_THRESHOLD {
        return None;
    }
    if dx < 0.0 {
        Some(SwipeStep::Next)
    } else {
        Some(SwipeStep::Prev)
    }
}
