use config::{Case, Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};

use crate::options::TimeField;

/// User configuration for listing defaults.
///
/// Command-line flags always take precedence over these values.
///
/// # Examples
///
/// ```toml
/// # Spacing between entries in grid mode
/// margin-width = 3
///
/// # Round human-readable sizes to whole units (`2K` instead of `1.5K`)
/// compact-sizes = true
///
/// # Skip all git queries
/// vcs = false
///
/// # Show access times in long format
/// time-field = "accessed"
/// ```
///
/// Config file location:
/// - Linux: `$XDG_CONFIG_HOME/statls/config.toml` or `~/.config/statls/config.toml`
/// - macOS: `$XDG_CONFIG_HOME/statls/config.toml` or `~/.config/statls/config.toml`
/// - Windows: `%APPDATA%\statls\config.toml`
///
/// Environment variables: `STATLS_MARGIN_WIDTH`, `STATLS_VCS`, ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StatlsConfig {
    pub margin_width: usize,
    pub compact_sizes: bool,
    /// Append ` -> target` to symlinks in long format
    pub show_link_targets: bool,
    pub vcs: bool,
    pub time_field: TimeField,
}

impl Default for StatlsConfig {
    fn default() -> Self {
        Self {
            margin_width: 2,
            compact_sizes: false,
            show_link_targets: true,
            vcs: true,
            time_field: TimeField::Modified,
        }
    }
}

impl StatlsConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Later sources override earlier ones:
    /// 1. Default values
    /// 2. Config file (see struct documentation for platform-specific paths)
    /// 3. Environment variables (STATLS_*)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(get_config_path().as_deref())
    }

    /// Same as [`StatlsConfig::load`] with an explicit config file.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("margin-width", defaults.margin_width as u64)?
            .set_default("compact-sizes", defaults.compact_sizes)?
            .set_default("show-link-targets", defaults.show_link_targets)?
            .set_default("vcs", defaults.vcs)?
            .set_default("time-field", defaults.time_field.to_string())?;

        if let Some(config_path) = config_path
            && config_path.exists()
        {
            log::debug!("Loading config from {}", config_path.display());
            builder = builder.add_source(File::from(config_path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("STATLS")
                .prefix_separator("_")
                .convert_case(Case::Kebab)
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;

        if config.margin_width == 0 {
            return Err(ConfigError::Message(
                "margin-width must be at least 1".into(),
            ));
        }

        Ok(config)
    }
}

fn get_config_path() -> Option<PathBuf> {
    // Test override first
    if let Ok(path) = std::env::var("STATLS_CONFIG_PATH") {
        return Some(PathBuf::from(path));
    }

    // choose_base_strategy uses:
    // - XDG on Linux (respects XDG_CONFIG_HOME, falls back to ~/.config)
    // - XDG on macOS (~/.config instead of ~/Library/Application Support)
    // - Windows conventions on Windows (%APPDATA%)
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("statls").join("config.toml"))
}
