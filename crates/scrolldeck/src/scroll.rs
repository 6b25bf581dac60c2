//! Horizontal scroller for the slide strip.
//!
//! Emulates a browser scroll container with mandatory snapping: programmatic
//! scrolls are smooth or instant, manual scrolling snaps to the nearest slide
//! once input stops, and a single `Settled` is reported when motion ends.

use std::time::Duration;

use crate::nav::ScrollBehavior;

/// Quiet period after manual scrolling before snapping.
pub const SNAP_DELAY: Duration = Duration::from_millis(120);
/// Fraction of the remaining distance covered per 60 Hz frame.
const EASE_PER_FRAME: f32 = 0.15;
const SETTLE_EPSILON: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    /// Slide nearest to the resting offset.
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct ScrollView {
    count: usize,
    width: f32,
    offset: f32,
    target: f32,
    moving: bool,
    /// Time since the last manual scroll input, while a snap is pending.
    manual_idle: Option<Duration>,
}

impl ScrollView {
    pub fn new(count: usize, width: f32) -> Self {
        Self {
            count,
            width,
            offset: 0.0,
            target: 0.0,
            moving: false,
            manual_idle: None,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    fn max_offset(&self) -> f32 {
        self.count.saturating_sub(1) as f32 * self.width
    }

    pub fn nearest_index(&self) -> usize {
        if self.width <= 0.0 {
            return 0;
        }
        let i = (self.offset / self.width).round().max(0.0) as usize;
        i.min(self.count.saturating_sub(1))
    }

    pub fn scroll_to(&mut self, index: usize, behavior: ScrollBehavior) {
        let index = index.min(self.count.saturating_sub(1));
        self.target = index as f32 * self.width;
        self.manual_idle = None;
        if behavior == ScrollBehavior::Instant {
            self.offset = self.target;
        }
        self.moving = true;
    }

    /// Manual scroll by `dx` points (wheel, trackpad).
    pub fn scroll_by(&mut self, dx: f32) {
        self.offset = (self.offset + dx).clamp(0.0, self.max_offset());
        self.target = self.offset;
        self.manual_idle = Some(Duration::ZERO);
        self.moving = true;
    }

    pub fn resize(&mut self, width: f32) {
        if (width - self.width).abs() < f32::EPSILON {
            return;
        }
        let anchor = if self.moving {
            if self.width > 0.0 {
                (self.target / self.width).round() as usize
            } else {
                0
            }
        } else {
            self.nearest_index()
        };
        self.width = width;
        self.target = anchor as f32 * width;
        self.offset = self.target;
        self.manual_idle = None;
    }

    pub fn resize_count(&mut self, count: usize) {
        self.count = count;
        let max = self.max_offset();
        self.offset = self.offset.min(max);
        self.target = self.target.min(max);
    }

    /// Advance by `dt`. Returns `Some` exactly once when motion comes to rest.
    pub fn step(&mut self, dt: Duration) -> Option<Settled> {
        if !self.moving {
            return None;
        }

        if let Some(idle) = self.manual_idle.as_mut() {
            *idle += dt;
            if *idle < SNAP_DELAY {
                return None;
            }
            self.manual_idle = None;
            self.target = self.nearest_index() as f32 * self.width;
        }

        let diff = self.target - self.offset;
        if diff.abs() < SETTLE_EPSILON {
            self.offset = self.target;
            self.moving = false;
            return Some(Settled {
                index: self.nearest_index(),
            });
        }

        // Frame-rate independent version of "move 15% per frame".
        let frames = dt.as_secs_f32() * 60.0;
        let keep = (1.0 - EASE_PER_FRAME).powf(frames);
        self.offset = self.target - diff * keep;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run_until_settled(view: &mut ScrollView) -> Settled {
        for _ in 0..1000 {
            if let Some(s) = view.step(FRAME) {
                return s;
            }
        }
        panic!("scroll never settled");
    }

    #[test]
    fn test_instant_scroll_settles_next_step() {
        let mut v = ScrollView::new(5, 100.0);
        v.scroll_to(3, ScrollBehavior::Instant);
        assert_eq!(v.offset(), 300.0);
        assert_eq!(v.step(FRAME), Some(Settled { index: 3 }));
        assert_eq!(v.step(FRAME), None);
    }

    #[test]
    fn test_smooth_scroll_eases() {
        let mut v = ScrollView::new(5, 100.0);
        v.scroll_to(2, ScrollBehavior::Smooth);
        assert!(v.step(FRAME).is_none());
        assert!(v.offset() > 0.0 && v.offset() < 200.0);
        let settled = run_until_settled(&mut v);
        assert_eq!(settled.index, 2);
        assert_eq!(v.offset(), 200.0);
    }

    #[test]
    fn test_manual_scroll_snaps_to_nearest() {
        let mut v = ScrollView::new(5, 100.0);
        v.scroll_by(130.0);
        assert_eq!(v.offset(), 130.0);
        // Still within the quiet period.
        assert!(v.step(FRAME).is_none());
        assert_eq!(v.offset(), 130.0);
        let settled = run_until_settled(&mut v);
        assert_eq!(settled.index, 1);
        assert_eq!(v.offset(), 100.0);
    }

    #[test]
    fn test_manual_scroll_clamped() {
        let mut v = ScrollView::new(3, 100.0);
        v.scroll_by(-50.0);
        assert_eq!(v.offset(), 0.0);
        v.scroll_by(1000.0);
        assert_eq!(v.offset(), 200.0);
    }

    #[test]
    fn test_resize_keeps_slide_aligned() {
        let mut v = ScrollView::new(4, 100.0);
        v.scroll_to(2, ScrollBehavior::Instant);
        v.step(FRAME);
        v.resize(250.0);
        assert_eq!(v.offset(), 500.0);
        assert_eq!(v.nearest_index(), 2);
    }

    #[test]
    fn test_scroll_to_clamps_index() {
        let mut v = ScrollView::new(3, 100.0);
        v.scroll_to(10, ScrollBehavior::Instant);
        assert_eq!(v.offset(), 200.0);
    }
}
