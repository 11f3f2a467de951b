//! Configuration management for the slides toolchain.
//!
//! Parses `slides.toml` with serde and discovers it in the current directory
//! or any parent. Every section is optional and falls back to defaults.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `store.dir` supports `${VAR}`, `${VAR:-default}` and a leading `~`.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "slides.toml";

/// Default document store directory, relative to the project.
const DEFAULT_STORE_DIR: &str = ".slides";

/// Upper bound for the watch debounce window.
const MAX_DEBOUNCE_MS: u64 = 10_000;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override document store directory.
    pub store_dir: Option<PathBuf>,
    /// Override presenter theme.
    pub theme: Option<Theme>,
    /// Override GFM extensions flag.
    pub gfm: Option<bool>,
    /// Override watch debounce window.
    pub debounce_ms: Option<u64>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markdown rendering options.
    pub render: RenderConfig,
    /// Presenter defaults.
    pub presentation: PresentationConfig,
    /// Document store location (raw string from TOML).
    store: StoreConfigRaw,
    /// PDF page geometry.
    pub export: ExportConfig,
    /// File watcher options.
    pub watch: WatchConfig,

    /// Resolved store configuration (set after loading).
    #[serde(skip)]
    pub store_resolved: StoreConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Markdown rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Enable tables, strikethrough and task lists.
    pub gfm: bool,
    /// Wrap code blocks in `<div class="code-wrapper">`.
    pub wrap_code_blocks: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            wrap_code_blocks: true,
        }
    }
}

/// Presenter color theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub theme: Theme,
    pub show_slide_numbers: bool,
    pub auto_advance: bool,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            show_slide_numbers: true,
            auto_advance: false,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct StoreConfigRaw {
    dir: Option<String>,
}

/// Resolved document store configuration.
#[derive(Debug, Default)]
pub struct StoreConfig {
    /// Directory holding `documents.json`.
    pub dir: PathBuf,
}

/// PDF page geometry in points.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        // A4 landscape
        Self {
            page_width: 842.0,
            page_height: 595.0,
            margin: 40.0,
        }
    }
}

/// File watcher configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Quiet period before a change triggers a rebuild.
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 200 }
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`store.dir`").
        field: String,
        /// Error message (e.g., "${`SLIDES_HOME`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `slides.toml` in current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value does not validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(dir) = &settings.store_dir {
            self.store_resolved.dir.clone_from(dir);
        }
        if let Some(theme) = settings.theme {
            self.presentation.theme = theme;
        }
        if let Some(gfm) = settings.gfm {
            self.render.gfm = gfm;
        }
        if let Some(debounce_ms) = settings.debounce_ms {
            self.watch.debounce_ms = debounce_ms;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            render: RenderConfig::default(),
            presentation: PresentationConfig::default(),
            store: StoreConfigRaw::default(),
            export: ExportConfig::default(),
            watch: WatchConfig::default(),
            store_resolved: StoreConfig {
                dir: base.join(DEFAULT_STORE_DIR),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any check fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_export()?;

        if self.watch.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::Validation(format!(
                "watch.debounce_ms cannot exceed {MAX_DEBOUNCE_MS}"
            )));
        }

        if self.store_resolved.dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "store.dir cannot be empty".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_export(&self) -> Result<(), ConfigError> {
        let ExportConfig {
            page_width,
            page_height,
            margin,
        } = self.export;

        if !margin.is_finite() || margin < 0.0 {
            return Err(ConfigError::Validation(
                "export.margin must be a non-negative number".to_owned(),
            ));
        }
        for (value, field) in [(page_width, "export.page_width"), (page_height, "export.page_height")] {
            if !value.is_finite() || value <= 2.0 * margin {
                return Err(ConfigError::Validation(format!(
                    "{field} must be greater than twice export.margin"
                )));
            }
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.store.dir {
            self.store.dir = Some(expand::expand_env(dir, "store.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config file directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let dir = match self.store.dir.as_deref() {
            Some("") => {
                return Err(ConfigError::Validation(
                    "store.dir cannot be empty".to_owned(),
                ));
            }
            Some(dir) => config_dir.join(dir),
            None => config_dir.join(DEFAULT_STORE_DIR),
        };
        self.store_resolved = StoreConfig { dir };
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/deck"));
        assert!(config.render.gfm);
        assert!(config.render.wrap_code_blocks);
        assert_eq!(config.presentation.theme, Theme::Light);
        assert!(config.presentation.show_slide_numbers);
        assert!(!config.presentation.auto_advance);
        assert_eq!(config.store_resolved.dir, PathBuf::from("/deck/.slides"));
        assert_eq!(config.export, ExportConfig::default());
        assert_eq!(config.watch.debounce_ms, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.render.gfm);
        assert_eq!(config.export.page_width, 842.0);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[render]
gfm = false
wrap_code_blocks = false

[presentation]
theme = "dark"
show_slide_numbers = false
auto_advance = true

[store]
dir = "decks"

[export]
page_width = 1000
page_height = 600
margin = 20

[watch]
debounce_ms = 50
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();

        assert!(!config.render.gfm);
        assert!(!config.render.wrap_code_blocks);
        assert_eq!(config.presentation.theme, Theme::Dark);
        assert!(config.presentation.auto_advance);
        assert_eq!(config.store_resolved.dir, PathBuf::from("/project/decks"));
        assert_eq!(config.export.page_width, 1000.0);
        assert_eq!(config.export.margin, 20.0);
        assert_eq!(config.watch.debounce_ms, 50);
    }

    #[test]
    fn test_unknown_theme_rejected() {
        let result: Result<Config, _> = toml::from_str("[presentation]\ntheme = \"neon\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_absolute_store_dir_kept() {
        let mut config: Config = toml::from_str("[store]\ndir = \"/var/slides\"").unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();
        assert_eq!(config.store_resolved.dir, PathBuf::from("/var/slides"));
    }

    #[test]
    fn test_empty_store_dir_rejected() {
        let mut config: Config = toml::from_str("[store]\ndir = \"\"").unwrap();
        let err = config.resolve_paths(Path::new("/project")).unwrap_err();
        assert!(err.to_string().contains("store.dir"));
    }

    #[test]
    fn test_validate_page_smaller_than_margins() {
        let mut config = Config::default_with_base(Path::new("/deck"));
        config.export.page_height = 80.0;
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("export.page_height"));
    }

    #[test]
    fn test_validate_negative_margin() {
        let mut config = Config::default_with_base(Path::new("/deck"));
        config.export.margin = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_debounce_limit() {
        let mut config = Config::default_with_base(Path::new("/deck"));
        config.watch.debounce_ms = 10_000;
        assert!(config.validate().is_ok());
        config.watch.debounce_ms = 10_001;
        assert!(config.validate().unwrap_err().to_string().contains("debounce_ms"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/deck"));
        let overrides = CliSettings {
            store_dir: Some(PathBuf::from("/elsewhere")),
            theme: Some(Theme::Dark),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.store_resolved.dir, PathBuf::from("/elsewhere"));
        assert_eq!(config.presentation.theme, Theme::Dark);
        assert!(config.render.gfm); // Unchanged
        assert_eq!(config.watch.debounce_ms, 200); // Unchanged
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.toml");
        std::fs::write(&path, "[store]\ndir = \"saved\"\n[watch]\ndebounce_ms = 100\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.store_resolved.dir, dir.path().join("saved"));
        assert_eq!(config.watch.debounce_ms, 100);
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.toml");
        std::fs::write(&path, "[render\ngfm = ").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_rejects_invalid_cli_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.toml");
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            debounce_ms: Some(60_000),
            ..Default::default()
        };
        assert!(Config::load(Some(&path), Some(&overrides)).is_err());
    }

    #[test]
    fn test_discover_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("slides.toml"), "").unwrap();

        let found = Config::discover_from(&nested).unwrap();
        assert_eq!(found, dir.path().join("slides.toml"));
    }

    #[test]
    fn test_expand_store_dir_with_default() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("SLIDES_CONFIG_TEST_HOME");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.toml");
        std::fs::write(&path, "[store]\ndir = \"${SLIDES_CONFIG_TEST_HOME:-/opt/slides}\"").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.store_resolved.dir, PathBuf::from("/opt/slides"));
    }
}
