//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.dream-recorder/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::generation::download::DEFAULT_FILE_NAME;
use crate::generation::http::DEFAULT_ENDPOINT;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DreamConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    /// Diagnostics from loading, replayed once the logger is up.
    #[serde(skip)]
    pub notices: Vec<Notice>,
}

/// A diagnostic raised before logging is configured.
///
/// Loading and resolving run before the log file is known, so anything they
/// would log is collected here and replayed by `main` after logger setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub endpoint: Option<String>,
    /// 0 or absent means wait forever.
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DownloadConfig {
    pub dir: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PlayerConfig {
    pub command: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_LOG_FILE: &str = "dream-recorder.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

fn default_player_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub endpoint: String,
    pub request_timeout: Option<Duration>,
    pub download_dir: PathBuf,
    pub download_file_name: String,
    pub player_command: String,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    /// Load and resolve diagnostics, in the order they happened.
    pub notices: Vec<Notice>,
}

/// Values from CLI flags. `None` means the flag was not given.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides<'a> {
    pub base_url: Option<&'a str>,
    pub request_timeout_secs: Option<u64>,
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

/// Returns the path to `~/.dream-recorder/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".dream-recorder").join("config.toml"))
}

/// Load config from `~/.dream-recorder/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DreamConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DreamConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            return Ok(DreamConfig {
                notices: vec![Notice::new(
                    Level::Warn,
                    "Could not determine home directory, using default config",
                )],
                ..Default::default()
            });
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<DreamConfig, ConfigError> {
    if !path.exists() {
        let mut notices = vec![Notice::new(
            Level::Info,
            format!("No config file found, generating default at {}", path.display()),
        )];
        if let Err(e) = generate_default_config(path) {
            notices.push(Notice::new(
                Level::Warn,
                format!("Failed to write default config: {e}"),
            ));
        }
        return Ok(DreamConfig {
            notices,
            ..Default::default()
        });
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: DreamConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    let dump = format!("Config: {:?}", config);
    config.notices = vec![
        Notice::new(Level::Info, format!("Loaded config from {}", path.display())),
        Notice::new(Level::Debug, dump),
    ];
    Ok(config)
}

fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# Dream Recorder Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_file = "dream-recorder.log"
# log_level = "debug"                  # "error", "warn", "info", "debug", "trace", "off"

# [service]
# base_url = "http://localhost:8080"   # Or DREAM_SERVICE_URL / --url
# endpoint = "/generate-video"         # Or DREAM_SERVICE_ENDPOINT
# request_timeout_secs = 0             # 0 waits forever. Or DREAM_REQUEST_TIMEOUT_SECS / --timeout

# [download]
# dir = "."
# file_name = "dream_video.mp4"

# [player]
# command = "xdg-open"                 # Or DREAM_PLAYER. The video URL is appended.
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &DreamConfig, cli: CliOverrides<'_>) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &DreamConfig,
    cli: CliOverrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let mut notices = config.notices.clone();

    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(|s| s.to_string())
        .or_else(|| env("DREAM_SERVICE_URL"))
        .or_else(|| config.service.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Endpoint: env → config → default
    let endpoint = env("DREAM_SERVICE_ENDPOINT")
        .or_else(|| config.service.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    // Timeout: CLI → env → config. Unparseable env values are ignored.
    let timeout_secs = cli
        .request_timeout_secs
        .or_else(|| {
            env("DREAM_REQUEST_TIMEOUT_SECS").and_then(|v| match v.trim().parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(_) => {
                    notices.push(Notice::new(
                        Level::Warn,
                        format!("Ignoring invalid DREAM_REQUEST_TIMEOUT_SECS: {v:?}"),
                    ));
                    None
                }
            })
        })
        .or(config.service.request_timeout_secs);
    let request_timeout = timeout_secs
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    let player_command = env("DREAM_PLAYER")
        .or_else(|| config.player.command.clone())
        .unwrap_or_else(|| default_player_command().to_string());

    let log_level = match config.general.log_level.as_deref() {
        Some(level) => level.parse::<LevelFilter>().unwrap_or_else(|_| {
            notices.push(Notice::new(
                Level::Warn,
                format!("Unknown log level {level:?}, using {DEFAULT_LOG_LEVEL}"),
            ));
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    ResolvedConfig {
        base_url,
        endpoint,
        request_timeout,
        download_dir: PathBuf::from(config.download.dir.as_deref().unwrap_or(".")),
        download_file_name: config
            .download
            .file_name
            .clone()
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
        player_command,
        log_file: PathBuf::from(
            config
                .general
                .log_file
                .as_deref()
                .unwrap_or(DEFAULT_LOG_FILE),
        ),
        log_level,
        notices,
    }
}
