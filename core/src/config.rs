//! Configuration management (config.toml)
//!
//! Handles loading, saving, and providing defaults for cabinet settings.
//! Settings are stored in TOML format in the platform-specific config directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::input::MenuKey;

/// Cabinet configuration.
///
/// Contains all user-configurable settings organized into sections.
/// Serialized to/from TOML format for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Window settings
    #[serde(default)]
    pub video: VideoConfig,
    /// Where games and artwork come from
    #[serde(default)]
    pub library: LibraryConfig,
    /// Key bindings
    #[serde(default)]
    pub input: InputConfig,
    /// Tooltip settings
    #[serde(default)]
    pub tips: TipsConfig,
}

/// Video configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Run fullscreen (default: true, it's a cabinet)
    #[serde(default = "default_true")]
    pub fullscreen: bool,
    /// Window width when not fullscreen (default: 1920)
    #[serde(default = "default_width")]
    pub width: u32,
    /// Window height when not fullscreen (default: 1080)
    #[serde(default = "default_height")]
    pub height: u32,
}

/// Game library configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LibraryConfig {
    /// Directory holding one folder per game (default: `<data_dir>/games`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub games_dir: Option<PathBuf>,
    /// Menu background image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<PathBuf>,
}

/// Key bindings, by egui key name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_left")]
    pub left: String,
    #[serde(default = "default_right")]
    pub right: String,
    #[serde(default = "default_up")]
    pub up: String,
    #[serde(default = "default_down")]
    pub down: String,
    #[serde(default = "default_confirm")]
    pub confirm: String,
    #[serde(default = "default_cancel")]
    pub cancel: String,
    /// Read gamepads as well as the keyboard (default: true)
    #[serde(default = "default_true")]
    pub gamepad: bool,
}

/// Tooltip configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipsConfig {
    /// Show the controls tip on startup (default: true)
    #[serde(default = "default_true")]
    pub show_controls: bool,
    /// How long a tip stays up (default: 3000)
    #[serde(default = "default_tip_duration")]
    pub duration_ms: u64,
    /// Characters per tip line (default: 30)
    #[serde(default = "default_chars_per_line")]
    pub chars_per_line: usize,
    /// Icon shown in tips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,
    /// When set, the icon is a horizontal strip of cells this wide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_cell_width: Option<u32>,
}

fn default_true() -> bool {
    true
}
fn default_width() -> u32 {
    1920
}
fn default_height() -> u32 {
    1080
}

fn default_left() -> String {
    "ArrowLeft".to_string()
}
fn default_right() -> String {
    "ArrowRight".to_string()
}
fn default_up() -> String {
    "ArrowUp".to_string()
}
fn default_down() -> String {
    "ArrowDown".to_string()
}
fn default_confirm() -> String {
    "Enter".to_string()
}
fn default_cancel() -> String {
    "Escape".to_string()
}

fn default_tip_duration() -> u64 {
    3000
}
fn default_chars_per_line() -> usize {
    30
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            fullscreen: default_true(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            left: default_left(),
            right: default_right(),
            up: default_up(),
            down: default_down(),
            confirm: default_confirm(),
            cancel: default_cancel(),
            gamepad: default_true(),
        }
    }
}

impl InputConfig {
    /// The key name bound to `key`.
    pub fn binding(&self, key: MenuKey) -> &str {
        match key {
            MenuKey::Left => &self.left,
            MenuKey::Right => &self.right,
            MenuKey::Up => &self.up,
            MenuKey::Down => &self.down,
            MenuKey::Confirm => &self.confirm,
            MenuKey::Cancel => &self.cancel,
        }
    }
}

impl Default for TipsConfig {
    fn default() -> Self {
        Self {
            show_controls: default_true(),
            duration_ms: default_tip_duration(),
            chars_per_line: default_chars_per_line(),
            icon: None,
            icon_cell_width: None,
        }
    }
}

impl Config {
    /// The configured games directory, or `<data_dir>/games`.
    pub fn games_dir(&self) -> Option<PathBuf> {
        self.library
            .games_dir
            .clone()
            .or_else(|| data_dir().map(|dir| dir.join("games")))
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\ArcadeMachine\config`
/// On macOS: `~/Library/Application Support/io.arcade-machine.ArcadeMachine`
/// On Linux: `~/.config/ArcadeMachine`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.arcade-machine", "", "ArcadeMachine")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Returns the platform-specific data directory where games are installed.
pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.arcade-machine", "", "ArcadeMachine")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Loads the configuration from disk.
///
/// Reads `config.toml` from the platform's configuration directory.
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> Config {
    config_dir()
        .map(|dir| load_from(&dir.join("config.toml")))
        .unwrap_or_default()
}

/// Loads the configuration from a specific file, falling back to defaults.
pub fn load_from(path: &std::path::Path) -> Config {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Config::default();
    };
    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Saves the configuration to disk.
///
/// Writes `config.toml` to the platform's configuration directory.
/// Creates the directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file
/// cannot be written.
pub fn save(config: &Config) -> std::io::Result<()> {
    if let Some(dir) = config_dir() {
        save_to(config, &dir.join("config.toml"))?;
    }
    Ok(())
}

/// Saves the configuration to a specific file.
pub fn save_to(config: &Config, path: &std::path::Path) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, content)
}
