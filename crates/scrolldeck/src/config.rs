use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::nav::ScrollBehavior;
use crate::view::PagePadding;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "scrolldeck";

pub const DEFAULT_PARTICLES: usize = 30;

pub const VALID_KEYS: &str = "defaults.theme, defaults.scroll, defaults.page_padding, \
     defaults.particles, defaults.loader, defaults.settle_timeout_ms";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_padding: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particles: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loader: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_timeout_ms: Option<u64>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `scrolldeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = format!("# scrolldeck configuration\n{}", self.to_yaml()?);
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn defaults(&self) -> Option<&DefaultsConfig> {
        self.defaults.as_ref()
    }

    pub fn theme(&self) -> Option<&str> {
        self.defaults().and_then(|d| d.theme.as_deref())
    }

    pub fn scroll(&self) -> Option<ScrollBehavior> {
        self.defaults()
            .and_then(|d| d.scroll.as_deref())
            .and_then(ScrollBehavior::from_name)
    }

    pub fn page_padding(&self) -> PagePadding {
        self.defaults()
            .and_then(|d| d.page_padding.as_deref())
            .and_then(PagePadding::from_name)
            .unwrap_or_default()
    }

    pub fn particles(&self) -> usize {
        self.defaults()
            .and_then(|d| d.particles)
            .unwrap_or(DEFAULT_PARTICLES)
    }

    pub fn loader_enabled(&self) -> bool {
        self.defaults()
            .and_then(|d| d.loader.as_deref())
            .is_none_or(|v| v != "off")
    }

    pub fn settle_timeout(&self) -> Duration {
        self.defaults()
            .and_then(|d| d.settle_timeout_ms)
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(crate::nav::DEFAULT_SETTLE_TIMEOUT)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let defaults = self.defaults.get_or_insert_with(DefaultsConfig::default);
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                defaults.theme = Some(value.to_string());
            }
            "defaults.scroll" => {
                if ScrollBehavior::from_name(value).is_none() {
                    anyhow::bail!("Invalid scroll: {value}. Must be 'smooth' or 'instant'.");
                }
                defaults.scroll = Some(value.to_string());
            }
            "defaults.page_padding" => {
                if PagePadding::from_name(value).is_none() {
                    anyhow::bail!(
                        "Invalid page_padding: {value}. Must be 'always' or 'double-digit'."
                    );
                }
                defaults.page_padding = Some(value.to_string());
            }
            "defaults.particles" => {
                let count = value.parse::<usize>().map_err(|_| {
                    anyhow::anyhow!("Invalid particles: {value}. Must be a number (0 disables).")
                })?;
                defaults.particles = Some(count);
            }
            "defaults.loader" => {
                match value {
                    "on" | "off" => {}
                    _ => anyhow::bail!("Invalid loader: {value}. Must be 'on' or 'off'."),
                }
                defaults.loader = Some(value.to_string());
            }
            "defaults.settle_timeout_ms" => {
                let ms = value.parse::<u64>().ok().filter(|ms| *ms > 0).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Invalid settle_timeout_ms: {value}. Must be a positive number."
                    )
                })?;
                defaults.settle_timeout_ms = Some(ms);
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {VALID_KEYS}"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let c = Config::default();
        assert_eq!(c.theme(), None);
        assert_eq!(c.scroll(), None);
        assert_eq!(c.page_padding(), PagePadding::Always);
        assert_eq!(c.particles(), DEFAULT_PARTICLES);
        assert!(c.loader_enabled());
        assert_eq!(c.settle_timeout(), crate::nav::DEFAULT_SETTLE_TIMEOUT);
    }

    #[test]
    fn test_set_valid_values() {
        let mut c = Config::default();
        c.set("defaults.theme", "dark").unwrap();
        c.set("defaults.scroll", "instant").unwrap();
        c.set("defaults.page_padding", "double-digit").unwrap();
        c.set("defaults.particles", "0").unwrap();
        c.set("defaults.loader", "off").unwrap();
        c.set("defaults.settle_timeout_ms", "250").unwrap();
        assert_eq!(c.theme(), Some("dark"));
        assert_eq!(c.scroll(), Some(ScrollBehavior::Instant));
        assert_eq!(c.page_padding(), PagePadding::DoubleDigitDecks);
        assert_eq!(c.particles(), 0);
        assert!(!c.loader_enabled());
        assert_eq!(c.settle_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_set_rejects_invalid() {
        let mut c = Config::default();
        assert!(c.set("defaults.theme", "sepia").is_err());
        assert!(c.set("defaults.scroll", "bouncy").is_err());
        assert!(c.set("defaults.particles", "many").is_err());
        assert!(c.set("defaults.settle_timeout_ms", "0").is_err());
        let err = c.set("defaults.colour", "red").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }

    #[test]
    fn test_zero_settle_timeout_in_file_falls_back() {
        let c = Config::parse("defaults:\n  settle_timeout_ms: 0\n").unwrap();
        assert_eq!(c.settle_timeout(), crate::nav::DEFAULT_SETTLE_TIMEOUT);
    }

    #[test]
    fn test_yaml_round_trip_skips_unset() {
        let mut c = Config::default();
        c.set("defaults.scroll", "smooth").unwrap();
        let yaml = c.to_yaml().unwrap();
        assert!(yaml.contains("scroll: smooth"));
        assert!(!yaml.contains("theme"));
        let back = Config::parse(&yaml).unwrap();
        assert_eq!(back.scroll(), Some(ScrollBehavior::Smooth));
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = std::env::temp_dir().join(format!("scrolldeck-config-{}", std::process::id()));
        let path = dir.join("config.yaml");
        let mut c = Config::default();
        c.set("defaults.particles", "12").unwrap();
        c.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.particles(), 12);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_message() {
        let err = Config::load_from(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }
}
