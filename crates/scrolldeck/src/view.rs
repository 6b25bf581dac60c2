/// Zero-padding rule for the page counter: `Always` pads every deck to two
/// digits, `DoubleDigitDecks` pads only decks of ten or more slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagePadding {
    /// Always at least two digits: "01" .. "09", "10".
    #[default]
    Always,
    /// Two digits only when the deck has ten or more slides.
    DoubleDigitDecks,
}

impl PagePadding {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "always" => Some(Self::Always),
            "double-digit" => Some(Self::DoubleDigitDecks),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::DoubleDigitDecks => "double-digit",
        }
    }
}

pub fn format_page(number: usize, total: usize, padding: PagePadding) -> String {
    let pad = match padding {
        PagePadding::Always => true,
        PagePadding::DoubleDigitDecks => total >= 10,
    };
    if pad {
        format!("{number:02}")
    } else {
        number.to_string()
    }
}

/// Everything the chrome shows, derived from the current index alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub current: usize,
    pub page_label: String,
    pub total_label: String,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub progress: Vec<bool>,
    pub timeline: Vec<bool>,
}

impl ViewModel {
    pub fn project(current: usize, count: usize, padding: PagePadding) -> Self {
        let markers: Vec<bool> = (0..count).map(|i| i == current).collect();
        Self {
            current,
            page_label: format_page(current + 1, count, padding),
            total_label: format_page(count, count, padding),
            prev_disabled: current == 0,
            next_disabled: current + 1 >= count,
            progress: markers.clone(),
            timeline: markers,
        }
    }

    pub fn counter_text(&self) -> String {
        format!("{} / {}", self.page_label, self.total_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_labels_always_padded() {
        let p = PagePadding::Always;
        assert_eq!(format_page(1, 3, p), "01");
        assert_eq!(format_page(9, 12, p), "09");
        assert_eq!(format_page(10, 12, p), "10");
        assert_eq!(format_page(100, 120, p), "100");
    }

    #[test]
    fn test_page_labels_double_digit_decks() {
        let p = PagePadding::DoubleDigitDecks;
        assert_eq!(ViewModel::project(0, 12, p).page_label, "01");
        assert_eq!(ViewModel::project(0, 5, p).page_label, "1");
        assert_eq!(ViewModel::project(8, 12, p).page_label, "09");
        assert_eq!(ViewModel::project(9, 12, p).page_label, "10");
        assert_eq!(ViewModel::project(0, 5, p).total_label, "5");
    }

    #[test]
    fn test_button_disabled_states() {
        let n = 5;
        for i in 0..n {
            let v = ViewModel::project(i, n, PagePadding::Always);
            assert_eq!(v.prev_disabled, i == 0);
            assert_eq!(v.next_disabled, i == n - 1);
        }
    }

    #[test]
    fn test_single_slide_disables_both() {
        let v = ViewModel::project(0, 1, PagePadding::Always);
        assert!(v.prev_disabled && v.next_disabled);
    }

    #[test]
    fn test_exactly_one_active_marker() {
        let v = ViewModel::project(3, 6, PagePadding::Always);
        assert_eq!(v.progress.iter().filter(|a| **a).count(), 1);
        assert_eq!(v.timeline.iter().filter(|a| **a).count(), 1);
        assert!(v.progress[3] && v.timeline[3]);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let a = ViewModel::project(2, 4, PagePadding::Always);
        let b = ViewModel::project(2, 4, PagePadding::Always);
        assert_eq!(a, b);
        assert_eq!(a.counter_text(), "03 / 04");
    }
}
