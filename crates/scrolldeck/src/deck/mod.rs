pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub use validate::{Diagnostic, Severity};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Deck {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub scroll: Option<String>,
    /// Extra images to warm the cache with at startup.
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub slides: Vec<Slide>,
    #[serde(default)]
    pub modals: Vec<ModalPanel>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub accent: Option<String>,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

/// A clickable region on a slide that opens a modal panel.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hotspot {
    pub id: String,
    pub modal: String,
    #[serde(default)]
    pub label: Option<String>,
    /// `[x, y, w, h]` as fractions of the slide.
    pub rect: [f32; 4],
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModalPanel {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl Slide {
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.body
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    pub fn accent_rgb(&self) -> Option<[u8; 3]> {
        self.accent.as_deref().and_then(parse_hex_color)
    }
}

impl Deck {
    pub fn parse(content: &str) -> Result<Self> {
        let deck: Deck = serde_yaml::from_str(content)?;
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn modal(&self, id: &str) -> Option<&ModalPanel> {
        self.modals.iter().find(|m| m.id == id)
    }

    /// Every image the deck references, backgrounds first, without duplicates.
    pub fn image_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = Vec::new();
        let backgrounds = self.slides.iter().filter_map(|s| s.background.as_deref());
        for path in backgrounds.chain(self.assets.iter().map(String::as_str)) {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }
}

/// A parsed deck together with the directory its relative paths resolve from.
#[derive(Debug, Clone)]
pub struct LoadedDeck {
    pub deck: Deck,
    pub path: PathBuf,
    pub base_path: PathBuf,
}

/// Read and parse a deck file and collect its diagnostics without
/// judging them.
pub fn read(path: &Path) -> Result<(LoadedDeck, Vec<Diagnostic>)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let deck =
        Deck::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    let base_path = path.parent().unwrap_or(Path::new(".")).to_path_buf();
    let diagnostics = validate::validate(&deck, Some(&base_path));
    Ok((
        LoadedDeck {
            deck,
            path: path.to_path_buf(),
            base_path,
        },
        diagnostics,
    ))
}

/// Read, parse and validate a deck file. Errors fail the load, warnings
/// are logged and returned.
pub fn load(path: &Path) -> Result<(LoadedDeck, Vec<Diagnostic>)> {
    let (loaded, diagnostics) = read(path)?;

    if loaded.deck.is_empty() {
        anyhow::bail!("No slides found in {}", path.display());
    }

    let errors: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    if !errors.is_empty() {
        let listing = errors
            .iter()
            .map(|d| format!("  - {}", d.message))
            .collect::<Vec<_>>()
            .join("\n");
        anyhow::bail!("Invalid deck {}:\n{listing}", path.display());
    }

    for d in diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
    {
        log::warn!("{}", d.message);
    }

    Ok((loaded, diagnostics))
}

/// Parse `#RRGGBB` (leading `#` optional).
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_deck_parses() {
        let content = include_str!("../../../../sample-decks/demo.yaml");
        let deck = Deck::parse(content).expect("demo deck parses");
        assert!(deck.len() >= 10, "expected a double-digit deck");
        assert!(!deck.modals.is_empty());
        assert!(deck.slides.iter().any(|s| !s.hotspots.is_empty()));
    }

    #[test]
    fn test_minimal_deck() {
        let deck = Deck::parse("slides:\n  - title: Only\n").unwrap();
        assert_eq!(deck.len(), 1);
        assert!(deck.slides[0].hotspots.is_empty());
        assert_eq!(deck.slides[0].paragraphs().count(), 0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Deck::parse("slides:\n  - title: A\n    colour: red\n");
        assert!(err.is_err());
    }

    #[test]
    fn test_paragraph_split() {
        let deck = Deck::parse("slides:\n  - title: A\n    body: \"one\\n\\n two \\n\\n\\n\"\n")
            .unwrap();
        let paras: Vec<&str> = deck.slides[0].paragraphs().collect();
        assert_eq!(paras, vec!["one", "two"]);
    }

    #[test]
    fn test_image_paths_deduplicated() {
        let yaml = "assets: [a.png, c.png]\nslides:\n  - title: A\n    background: a.png\n  - title: B\n    background: b.png\n";
        let deck = Deck::parse(yaml).unwrap();
        assert_eq!(deck.image_paths(), vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(parse_hex_color("#5294E2"), Some([0x52, 0x94, 0xE2]));
        assert_eq!(parse_hex_color("ffffff"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }

    #[test]
    fn test_load_rejects_empty_deck() {
        let dir = std::env::temp_dir().join(format!("scrolldeck-empty-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("empty.yaml");
        std::fs::write(&path, "title: Nothing\nslides: []\n").unwrap();
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("No slides found"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_read_keeps_diagnostics_without_failing() {
        let dir = std::env::temp_dir().join(format!("scrolldeck-read-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("deck.yaml");
        std::fs::write(&path, "slides:
  - title: A
    background: missing.png
").unwrap();
        let (loaded, diagnostics) = read(&path).unwrap();
        assert_eq!(loaded.base_path, dir);
        assert_eq!(loaded.deck.len(), 1);
        assert!(!diagnostics.is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }
}
