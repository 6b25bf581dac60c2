use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::deck::{self, Deck, Diagnostic, Severity};

/// Parse and validate without failing on diagnostics.
pub fn inspect(path: &Path) -> Result<(Deck, Vec<Diagnostic>)> {
    let (loaded, mut diagnostics) = deck::read(path)?;
    diagnostics.sort_by(|a, b| b.severity.cmp(&a.severity));
    Ok((loaded.deck, diagnostics))
}

pub fn run(path: &Path) -> Result<()> {
    let (deck, diagnostics) = inspect(path)?;

    let hotspots: usize = deck.slides.iter().map(|s| s.hotspots.len()).sum();
    println!("{} {}", "Deck:".bold(), path.display());
    if let Some(ref title) = deck.title {
        println!("  {:<10} {}", "title".cyan(), title);
    }
    println!("  {:<10} {}", "slides".cyan(), deck.len());
    println!("  {:<10} {}", "hotspots".cyan(), hotspots);
    println!("  {:<10} {}", "modals".cyan(), deck.modals.len());
    println!("  {:<10} {}", "images".cyan(), deck.image_paths().len());

    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();

    if diagnostics.is_empty() {
        println!("{}", "No problems found.".green());
        return Ok(());
    }

    println!();
    for d in &diagnostics {
        let tag = match d.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        println!("  {tag}: {}", d.message);
    }

    if errors > 0 {
        anyhow::bail!("{} has {errors} error(s)", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_deck_is_clean() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../sample-decks/demo.yaml");
        let (deck, diagnostics) = inspect(&path).unwrap();
        assert!(deck.len() >= 10);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        run(&path).unwrap();
    }

    #[test]
    fn test_errors_fail_the_check() {
        let dir = std::env::temp_dir().join(format!("scrolldeck-check-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.yaml");
        std::fs::write(
            &path,
            "slides:\n  - title: A\n    accent: nope\nmodals:\n  - { id: m, title: M }\n",
        )
        .unwrap();

        let (_, diagnostics) = inspect(&path).unwrap();
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert!(run(&path).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }
}
