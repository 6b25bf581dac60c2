use std::collections::HashSet;
use std::path::Path;

use super::{Deck, parse_hex_color};

const RECT_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    fn error(message: String) -> Self {
        Self {
            severity: Severity::Error,
            message,
        }
    }

    fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
        }
    }
}

/// Check a deck for structural problems. File existence checks run only
/// when `base_path` is given.
pub fn validate(deck: &Deck, base_path: Option<&Path>) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    if deck.slides.is_empty() {
        out.push(Diagnostic::error("Deck has no slides".to_string()));
    }

    let mut modal_ids = HashSet::new();
    for modal in &deck.modals {
        if !modal_ids.insert(modal.id.as_str()) {
            out.push(Diagnostic::error(format!(
                "Duplicate modal id '{}'",
                modal.id
            )));
        }
    }

    let mut hotspot_ids = HashSet::new();
    let mut opened = HashSet::new();
    for (index, slide) in deck.slides.iter().enumerate() {
        let n = index + 1;

        if let Some(accent) = &slide.accent {
            if parse_hex_color(accent).is_none() {
                out.push(Diagnostic::error(format!(
                    "Slide {n}: accent '{accent}' is not a #RRGGBB colour"
                )));
            }
        }

        for hotspot in &slide.hotspots {
            if !hotspot_ids.insert(hotspot.id.as_str()) {
                out.push(Diagnostic::error(format!(
                    "Slide {n}: duplicate hotspot id '{}'",
                    hotspot.id
                )));
            }

            let [x, y, w, h] = hotspot.rect;
            let in_unit = |v: f32| (0.0..=1.0 + RECT_EPSILON).contains(&v);
            let inside = [x, y, w, h].into_iter().all(in_unit)
                && in_unit(x + w)
                && in_unit(y + h);
            if w <= 0.0 || h <= 0.0 || !inside {
                out.push(Diagnostic::error(format!(
                    "Slide {n}: hotspot '{}' rect {:?} must lie within the slide (fractions 0..1)",
                    hotspot.id, hotspot.rect
                )));
            }

            if modal_ids.contains(hotspot.modal.as_str()) {
                opened.insert(hotspot.modal.as_str());
            } else {
                out.push(Diagnostic::warning(format!(
                    "Slide {n}: hotspot '{}' opens unknown modal '{}'",
                    hotspot.id, hotspot.modal
                )));
            }
        }
    }

    for modal in &deck.modals {
        if !opened.contains(modal.id.as_str()) {
            out.push(Diagnostic::warning(format!(
                "Modal '{}' is not opened by any hotspot",
                modal.id
            )));
        }
    }

    if let Some(base) = base_path {
        for image in deck.image_paths() {
            if !base.join(image).exists() {
                out.push(Diagnostic::warning(format!("Image not found: {image}")));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(diags: &[Diagnostic]) -> Vec<&str> {
        diags
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| d.message.as_str())
            .collect()
    }

    fn warnings(diags: &[Diagnostic]) -> Vec<&str> {
        diags
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| d.message.as_str())
            .collect()
    }

    #[test]
    fn test_demo_deck_is_clean() {
        let deck = Deck::parse(include_str!("../../../../sample-decks/demo.yaml")).unwrap();
        let diags = validate(&deck, None);
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
    }

    #[test]
    fn test_empty_deck_is_error() {
        let deck = Deck::parse("title: x\n").unwrap();
        assert_eq!(errors(&validate(&deck, None)), vec!["Deck has no slides"]);
    }

    #[test]
    fn test_duplicate_ids() {
        let yaml = "\
slides:
  - title: A
    hotspots:
      - { id: h, modal: m, rect: [0.1, 0.1, 0.2, 0.2] }
      - { id: h, modal: m, rect: [0.5, 0.5, 0.2, 0.2] }
modals:
  - { id: m, title: M }
  - { id: m, title: Again }
";
        let diags = validate(&Deck::parse(yaml).unwrap(), None);
        let errs = errors(&diags);
        assert_eq!(errs.len(), 2, "{errs:?}");
        assert!(errs.iter().any(|e| e.contains("Duplicate modal id 'm'")));
        assert!(errs.iter().any(|e| e.contains("duplicate hotspot id 'h'")));
    }

    #[test]
    fn test_rect_out_of_bounds() {
        let yaml = "\
slides:
  - title: A
    hotspots:
      - { id: wide, modal: m, rect: [0.8, 0.1, 0.4, 0.2] }
      - { id: flat, modal: m, rect: [0.1, 0.1, 0.2, 0.0] }
modals:
  - { id: m, title: M }
";
        let diags = validate(&Deck::parse(yaml).unwrap(), None);
        assert_eq!(errors(&diags).len(), 2);
    }

    #[test]
    fn test_dangling_references_are_warnings() {
        let yaml = "\
slides:
  - title: A
    hotspots:
      - { id: h, modal: missing, rect: [0.1, 0.1, 0.2, 0.2] }
modals:
  - { id: lonely, title: L }
";
        let diags = validate(&Deck::parse(yaml).unwrap(), None);
        assert!(errors(&diags).is_empty());
        let warns = warnings(&diags);
        assert!(warns.iter().any(|w| w.contains("unknown modal 'missing'")));
        assert!(warns.iter().any(|w| w.contains("'lonely' is not opened")));
    }

    #[test]
    fn test_bad_accent() {
        let yaml = "slides:\n  - title: A\n    accent: blue\n";
        let diags = validate(&Deck::parse(yaml).unwrap(), None);
        assert_eq!(errors(&diags).len(), 1);
    }

    #[test]
    fn test_missing_image_warns_with_base_path() {
        let yaml = "slides:\n  - title: A\n    background: nowhere/bg.png\n";
        let deck = Deck::parse(yaml).unwrap();
        assert!(validate(&deck, None).is_empty());
        let diags = validate(&deck, Some(Path::new(".")));
        assert_eq!(warnings(&diags), vec!["Image not found: nowhere/bg.png"]);
    }
}
