/// Visible-area ratio at which a slide becomes the dominant one.
pub const THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityChange {
    Entered(usize),
    Left(usize),
}

/// Visible-area ratio of each viewport-wide slide on a horizontal strip
/// scrolled to `offset`.
pub fn visible_ratios(offset: f32, viewport_width: f32, count: usize) -> Vec<f32> {
    if viewport_width <= 0.0 {
        return vec![0.0; count];
    }
    let view_start = offset;
    let view_end = offset + viewport_width;
    (0..count)
        .map(|i| {
            let start = i as f32 * viewport_width;
            let end = start + viewport_width;
            let overlap = (end.min(view_end) - start.max(view_start)).max(0.0);
            (overlap / viewport_width).clamp(0.0, 1.0)
        })
        .collect()
}

/// Tracks which slides are past the visibility threshold and reports
/// threshold crossings, the way an intersection observer does.
#[derive(Debug, Clone)]
pub struct VisibilitySync {
    active: Vec<bool>,
}

impl VisibilitySync {
    pub fn new(count: usize) -> Self {
        Self {
            active: vec![false; count],
        }
    }

    /// Compare the latest ratios against the previous state. Only slides
    /// that crossed the threshold produce a change.
    pub fn observe(&mut self, ratios: &[f32]) -> Vec<VisibilityChange> {
        let mut changes = Vec::new();
        for (i, (&ratio, active)) in ratios.iter().zip(self.active.iter_mut()).enumerate() {
            let dominant = ratio >= THRESHOLD;
            if dominant && !*active {
                *active = true;
                changes.push(VisibilityChange::Entered(i));
            } else if !dominant && *active {
                *active = false;
                changes.push(VisibilityChange::Left(i));
            }
        }
        changes
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    pub fn resize(&mut self, count: usize) {
        self.active = vec![false; count];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios_aligned() {
        let r = visible_ratios(200.0, 100.0, 4);
        assert_eq!(r, vec![0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_ratios_between_slides() {
        let r = visible_ratios(130.0, 100.0, 3);
        assert!((r[1] - 0.7).abs() < 1e-4);
        assert!((r[2] - 0.3).abs() < 1e-4);
        assert_eq!(r[0], 0.0);
    }

    #[test]
    fn test_zero_width_viewport() {
        assert_eq!(visible_ratios(0.0, 0.0, 2), vec![0.0, 0.0]);
    }

    #[test]
    fn test_reports_only_crossings() {
        let mut sync = VisibilitySync::new(3);
        let first = sync.observe(&visible_ratios(0.0, 100.0, 3));
        assert_eq!(first, vec![VisibilityChange::Entered(0)]);

        // Still mostly on slide 0: nothing new.
        assert!(sync.observe(&visible_ratios(40.0, 100.0, 3)).is_empty());

        let moved = sync.observe(&visible_ratios(60.0, 100.0, 3));
        assert_eq!(
            moved,
            vec![VisibilityChange::Left(0), VisibilityChange::Entered(1)]
        );
        assert!(sync.is_active(1));
        assert!(!sync.is_active(0));
        assert!(!sync.is_active(2));
    }

    #[test]
    fn test_exact_half_counts_as_dominant() {
        let mut sync = VisibilitySync::new(2);
        let changes = sync.observe(&[0.5, 0.5]);
        assert_eq!(
            changes,
            vec![VisibilityChange::Entered(0), VisibilityChange::Entered(1)]
        );
    }
}
