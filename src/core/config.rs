//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.folio/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The saved language preference sits between the two: an explicit `--lang`
//! or `FOLIO_LANG` beats it, `general.default_lang` loses to it.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::lang::Lang;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_lang: Option<Lang>,
    pub fragment_ext: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Base URL (`https://…`) or local directory holding `fr/` and `en/`.
    pub location: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TimingConfig {
    pub swap_delay_ms: Option<u64>,
    pub loader_delay_ms: Option<u64>,
    pub bar_delay_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SITE_LOCATION: &str = "./site";
pub const DEFAULT_FRAGMENT_EXT: &str = "md";
pub const DEFAULT_SWAP_DELAY_MS: u64 = 150;
pub const DEFAULT_LOADER_DELAY_MS: u64 = 250;
pub const DEFAULT_BAR_DELAY_MS: u64 = 120;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Where fragments are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteLocation {
    Remote(String),
    Local(PathBuf),
}

impl SiteLocation {
    pub fn parse(value: &str) -> SiteLocation {
        if value.starts_with("http://") || value.starts_with("https://") {
            SiteLocation::Remote(value.trim_end_matches('/').to_string())
        } else {
            SiteLocation::Local(PathBuf::from(value))
        }
    }
}

impl fmt::Display for SiteLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteLocation::Remote(url) => f.write_str(url),
            SiteLocation::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Delays of the visual transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Fade-out before the new content is swapped in.
    pub swap_delay: Duration,
    /// Delay before the loading indicator is cleared.
    pub loader_delay: Duration,
    /// Delay before skill bars start filling.
    pub bar_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            swap_delay: Duration::from_millis(DEFAULT_SWAP_DELAY_MS),
            loader_delay: Duration::from_millis(DEFAULT_LOADER_DELAY_MS),
            bar_delay: Duration::from_millis(DEFAULT_BAR_DELAY_MS),
        }
    }
}

impl Timing {
    /// No delays at all.
    pub fn immediate() -> Self {
        Self {
            swap_delay: Duration::ZERO,
            loader_delay: Duration::ZERO,
            bar_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub site: SiteLocation,
    /// Language forced by CLI or env; beats the saved preference.
    pub lang_override: Option<Lang>,
    /// Language used when neither an override nor a saved preference exists.
    pub default_lang: Lang,
    pub fragment_ext: String,
    /// Location to open, e.g. `#skills`.
    pub location: String,
    pub timing: Timing,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub site: Option<String>,
    pub lang: Option<Lang>,
    pub fragment_ext: Option<String>,
    pub location: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.folio/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".folio").join("config.toml"))
}

/// Load config from `~/.folio/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FolioConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FolioConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FolioConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(FolioConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: FolioConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Folio Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_lang = "fr"                # "fr" or "en"; a saved choice wins over this
# fragment_ext = "md"

# [site]
# location = "./site"                # or "https://me.dev/pages"; or set FOLIO_SITE

# [timing]
# swap_delay_ms = 150                # fade-out before content swap
# loader_delay_ms = 250              # loader stays up this long after a response
# bar_delay_ms = 120                 # skill bars start filling after this
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &FolioConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &FolioConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Site: CLI → env → config → default
    let site = cli
        .site
        .clone()
        .or_else(|| env("FOLIO_SITE"))
        .or_else(|| config.site.location.clone())
        .unwrap_or_else(|| DEFAULT_SITE_LOCATION.to_string());

    // Language override: CLI → env (config default is applied after prefs)
    let lang_override = cli.lang.or_else(|| {
        env("FOLIO_LANG").and_then(|code| {
            let lang = Lang::from_code(&code);
            if lang.is_none() {
                warn!("Ignoring unknown FOLIO_LANG={code:?}");
            }
            lang
        })
    });

    // Fragment extension: CLI → env → config → default
    let fragment_ext = cli
        .fragment_ext
        .clone()
        .or_else(|| env("FOLIO_EXT"))
        .or_else(|| config.general.fragment_ext.clone())
        .unwrap_or_else(|| DEFAULT_FRAGMENT_EXT.to_string())
        .trim_start_matches('.')
        .to_string();

    let timing = Timing {
        swap_delay: Duration::from_millis(
            config.timing.swap_delay_ms.unwrap_or(DEFAULT_SWAP_DELAY_MS),
        ),
        loader_delay: Duration::from_millis(
            config.timing.loader_delay_ms.unwrap_or(DEFAULT_LOADER_DELAY_MS),
        ),
        bar_delay: Duration::from_millis(
            config.timing.bar_delay_ms.unwrap_or(DEFAULT_BAR_DELAY_MS),
        ),
    };

    ResolvedConfig {
        site: SiteLocation::parse(&site),
        lang_override,
        default_lang: config.general.default_lang.unwrap_or_default(),
        fragment_ext,
        location: cli.location.clone().unwrap_or_default(),
        timing,
    }
}
