use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::autoscroll;
use crate::color::{self, Rgb};
use crate::render::Alignment;

pub const MAX_LINE_SPACING: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scroll_speed: f64,
    pub line_spacing: usize,
    pub alignment: Alignment,
    pub text_color: Rgb,
    pub background_color: Rgb,
    pub wheel_lines: usize,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scroll_speed: 2.0,
            line_spacing: 0,
            alignment: Alignment::Left,
            text_color: color::WHITE,
            background_color: color::BLACK,
            wheel_lines: 3,
            log_file: dirs::data_dir().map(|dir| dir.join("prompter-tui").join("prompter.log")),
        }
    }
}

impl Config {
    /// Brings out-of-range values back into the ranges the controls allow.
    pub fn sanitized(mut self) -> Self {
        self.scroll_speed = self
            .scroll_speed
            .clamp(autoscroll::MIN_SPEED, autoscroll::MAX_SPEED);
        if self.scroll_speed.is_nan() {
            self.scroll_speed = Config::default().scroll_speed;
        }
        self.line_spacing = self.line_spacing.min(MAX_LINE_SPACING);
        self.wheel_lines = self.wheel_lines.max(1);
        self
    }
}

pub fn config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("prompter-tui").join("config.toml"))
}

pub fn ensure_config_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}

/// Reads the config at `path`, writing the defaults there first if the file
/// doesn't exist yet.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        let cfg = Config::default();
        write_config_to(path, &cfg)?;
        return Ok(cfg);
    }

    let raw =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(cfg.sanitized())
}

pub fn write_config_to(path: &Path, cfg: &Config) -> Result<()> {
    ensure_config_dir(path)?;
    let text = toml::to_string_pretty(cfg).context("Failed to serialize config")?;
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let cfg = load_config_from(&path).unwrap();

        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "scroll_speed = 4.5\nalignment = \"center\"\ntext_color = \"#FFCC00\"\n",
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();

        assert_eq!(cfg.scroll_speed, 4.5);
        assert_eq!(cfg.alignment, Alignment::Center);
        assert_eq!(cfg.text_color, Rgb::new(0xFF, 0xCC, 0x00));
        assert_eq!(cfg.background_color, color::BLACK);
        assert_eq!(cfg.wheel_lines, 3);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "scroll_speed = 40.0\nline_spacing = 9\nwheel_lines = 0\n").unwrap();

        let cfg = load_config_from(&path).unwrap();

        assert_eq!(cfg.scroll_speed, autoscroll::MAX_SPEED);
        assert_eq!(cfg.line_spacing, MAX_LINE_SPACING);
        assert_eq!(cfg.wheel_lines, 1);
    }

    #[test]
    fn bad_colour_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "text_color = \"#12\"\n").unwrap();

        let err = load_config_from(&path).unwrap_err();

        assert!(format!("{err:#}").contains("not a hex colour"));
    }
}
