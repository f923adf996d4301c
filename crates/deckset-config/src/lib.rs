//! Configuration management for Deckset slide styling.
//!
//! Parses `deckset.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Every section is optional. An empty file (or no file at all) yields the
//! defaults, which reproduce the stock Deckset look:
//!
//! ```toml
//! [text]
//! base_font_size = 16.0
//!
//! [images]
//! blend_color = "rgba(48, 85, 165, 0.5)"
//! blend_mode = "screen"
//!
//! [lists]
//! build_class = "fragment"
//!
//! [audio]
//! controls_list = "nodownload"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "deckset.toml";

/// Slide styling configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text directive configuration.
    pub text: TextConfig,
    /// Background image configuration.
    pub images: ImagesConfig,
    /// List directive configuration.
    pub lists: ListsConfig,
    /// Inline audio configuration.
    pub audio: AudioConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Text directive configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Font size in pixels that `text-scale(n)` multiplies.
    pub base_font_size: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            base_font_size: 16.0,
        }
    }
}

/// Background image configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Overlay color blended over background images when the slide has text.
    pub blend_color: String,
    /// `background-blend-mode` used with the overlay color.
    pub blend_mode: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            blend_color: "rgba(48, 85, 165, 0.5)".to_owned(),
            blend_mode: "screen".to_owned(),
        }
    }
}

/// List directive configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListsConfig {
    /// Class added to list items by `[.build-lists: true]`.
    pub build_class: String,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            build_class: "fragment".to_owned(),
        }
    }
}

/// Inline audio configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Value of the `controlsList` attribute added to every audio tag.
    pub controls_list: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            controls_list: "nodownload".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `deckset.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the loaded values don't pass [`validate`](Self::validate).
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        match Self::discover_config() {
            Some(discovered) => Self::load_from_file(&discovered),
            None => Ok(Self::default()),
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file starting at `dir` and walking up.
    fn discover_from(dir: &Path) -> Option<PathBuf> {
        let mut current = dir.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_text()?;
        require_non_empty(&self.images.blend_color, "images.blend_color")?;
        require_non_empty(&self.images.blend_mode, "images.blend_mode")?;
        self.validate_lists()?;
        require_non_empty(&self.audio.controls_list, "audio.controls_list")?;
        Ok(())
    }

    fn validate_text(&self) -> Result<(), ConfigError> {
        let size = self.text.base_font_size;
        if !size.is_finite() || size <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "text.base_font_size must be a positive number, got {size}"
            )));
        }
        Ok(())
    }

    fn validate_lists(&self) -> Result<(), ConfigError> {
        let class = &self.lists.build_class;
        require_non_empty(class, "lists.build_class")?;
        if class
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '\'' || c == '<' || c == '>')
        {
            return Err(ConfigError::Validation(format!(
                "lists.build_class must be a single class name, got {class:?}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!((config.text.base_font_size - 16.0).abs() < f64::EPSILON);
        assert_eq!(config.images.blend_color, "rgba(48, 85, 165, 0.5)");
        assert_eq!(config.images.blend_mode, "screen");
        assert_eq!(config.lists.build_class, "fragment");
        assert_eq!(config.audio.controls_list, "nodownload");
        assert!(config.config_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.lists.build_class, "fragment");
        assert_eq!(config.images.blend_mode, "screen");
    }

    #[test]
    fn test_parse_partial_section() {
        let toml = r#"
[images]
blend_color = "rgba(0, 0, 0, 0.4)"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.images.blend_color, "rgba(0, 0, 0, 0.4)");
        assert_eq!(config.images.blend_mode, "screen");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[text]
base_font_size = 20.0

[images]
blend_color = "black"
blend_mode = "multiply"

[lists]
build_class = "step"

[audio]
controls_list = "nodownload noplaybackrate"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!((config.text.base_font_size - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.images.blend_color, "black");
        assert_eq!(config.images.blend_mode, "multiply");
        assert_eq!(config.lists.build_class, "step");
        assert_eq!(config.audio.controls_list, "nodownload noplaybackrate");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_font_size() {
        let mut config = Config::default();
        config.text.base_font_size = 0.0;

        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("text.base_font_size"));
    }

    #[test]
    fn test_validate_rejects_nan_font_size() {
        let mut config = Config::default();
        config.text.base_font_size = f64::NAN;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_blend_color() {
        let mut config = Config::default();
        config.images.blend_color = "  ".to_owned();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("images.blend_color"));
    }

    #[test]
    fn test_validate_rejects_multi_token_build_class() {
        let mut config = Config::default();
        config.lists.build_class = "fragment fade-in".to_owned();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("lists.build_class"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[lists]\nbuild_class = \"reveal\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.lists.build_class, "reveal");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[lists\nbuild_class = ").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_runs_validation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[text]\nbase_font_size = -4.0\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_discover_from_parent_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("talks/2024");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_from(&nested).unwrap();
        assert_eq!(found, temp_dir.path().join(CONFIG_FILENAME));
    }
}
