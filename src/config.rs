//src/config.rs
use crate::workout::Coords;
use comfy_table::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_CONFIG_DIR: &str = "map-workout-tracker";
const CONFIG_ENV_VAR: &str = "MAP_WORKOUT_CONFIG_DIR"; // Environment variable name

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine configuration directory.")]
    CannotDetermineConfigDir,
    #[error("I/O error accessing config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file (TOML): {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Failed to serialize config data (TOML): {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Invalid color name: {0}")]
    InvalidColor(String),
    #[error("Map zoom {zoom} is above the maximum zoom {max_zoom}.")]
    InvalidZoom { zoom: u8, max_zoom: u8 },
}

// Define standard colors using strum for easy iteration/parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum StandardColor {
    Black, Red, Green, Yellow, Blue, Magenta, Cyan, White,
    DarkGrey, DarkRed, DarkGreen, DarkYellow, DarkBlue, DarkMagenta, DarkCyan, Grey,
}

// Helper to convert our enum to comfy_table::Color
impl From<StandardColor> for Color {
    fn from(value: StandardColor) -> Self {
        match value {
            StandardColor::Black => Color::Black, StandardColor::Red => Color::Red,
            StandardColor::Green => Color::Green, StandardColor::Yellow => Color::Yellow,
            StandardColor::Blue => Color::Blue, StandardColor::Magenta => Color::Magenta,
            StandardColor::Cyan => Color::Cyan, StandardColor::White => Color::White,
            StandardColor::DarkGrey => Color::DarkGrey, StandardColor::DarkRed => Color::DarkRed,
            StandardColor::DarkGreen => Color::DarkGreen, StandardColor::DarkYellow => Color::DarkYellow,
            StandardColor::DarkBlue => Color::DarkBlue, StandardColor::DarkMagenta => Color::DarkMagenta,
            StandardColor::DarkCyan => Color::DarkCyan, StandardColor::Grey => Color::Grey,
        }
    }
}

// Helper to parse a string into our StandardColor enum
pub fn parse_color(color_str: &str) -> Result<StandardColor, ConfigError> {
    for color in StandardColor::iter() {
        if format!("{:?}", color).eq_ignore_ascii_case(color_str) {
            return Ok(color);
        }
    }
    Err(ConfigError::InvalidColor(color_str.to_string()))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)] // Ensure defaults are used if fields are missing
pub struct MapConfig {
    pub zoom: u8,
    pub max_zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            zoom: 15,
            max_zoom: 19,
            tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
        }
    }
}

/// Options passed along with every marker popup.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PopupConfig {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl Default for PopupConfig {
    fn default() -> Self {
        PopupConfig {
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    pub header_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig { header_color: "Green".to_string() }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)] // Ensure defaults are used if fields are missing
pub struct Config {
    /// Fixed position reported by the terminal host instead of a real geolocation lookup.
    pub location: Option<Coords>,
    pub map: MapConfig,
    pub popup: PopupConfig,
    pub theme: ThemeConfig,
}

impl Config {
    /// Checks values serde cannot constrain on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map.zoom > self.map.max_zoom {
            return Err(ConfigError::InvalidZoom {
                zoom: self.map.zoom,
                max_zoom: self.map.max_zoom,
            });
        }
        parse_color(&self.theme.header_color)?;
        Ok(())
    }

    pub fn header_color(&self) -> Result<Color, ConfigError> {
        parse_color(&self.theme.header_color).map(Color::from)
    }
}

/// Determines the path to the configuration file.
/// Exposed at crate root as get_config_path_util
pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir_override = std::env::var(CONFIG_ENV_VAR).ok();

    let config_dir_path = match config_dir_override {
        Some(path_str) => {
            let path = PathBuf::from(path_str);
            if !path.is_dir() {
                tracing::warn!(
                    "Environment variable {} points to '{}', which is not a directory. Trying to create it.",
                    CONFIG_ENV_VAR,
                    path.display()
                );
                fs::create_dir_all(&path)?;
            }
            path
        }
        None => {
            let base_config_dir = dirs::config_dir().ok_or(ConfigError::CannotDetermineConfigDir)?;
            base_config_dir.join(APP_CONFIG_DIR)
        }
    };

    if !config_dir_path.exists() {
        fs::create_dir_all(&config_dir_path)?;
    }

    Ok(config_dir_path.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from the TOML file at the given path.
/// Writes the defaults first if the file does not exist yet.
/// Exposed at crate root as load_config_util
pub fn load(config_path: &Path) -> Result<Config, ConfigError> {
    if !config_path.exists() {
        let default_config = Config::default();
        save(config_path, &default_config)?;
        return Ok(default_config);
    }
    let config_content = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&config_content)?;
    config.validate()?;
    Ok(config)
}

/// Saves the configuration to the TOML file.
/// Exposed at crate root as save_config_util
pub fn save(config_path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent_dir) = config_path.parent() {
        if !parent_dir.exists() {
            fs::create_dir_all(parent_dir)?;
        }
    }
    let config_content = toml::to_string_pretty(config)?;
    fs::write(config_path, config_content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[map]\nzoom = 12\n").unwrap();
        assert_eq!(config.map.zoom, 12);
        assert_eq!(config.map.max_zoom, 19);
        assert_eq!(config.popup, PopupConfig::default());
        assert!(config.location.is_none());
    }

    #[test]
    fn location_parses_from_toml() {
        let config: Config = toml::from_str(
            "location = { lat = 51.5, lng = -0.12 }\n[popup]\nauto_close = true\n",
        )
        .unwrap();
        assert_eq!(config.location, Some(Coords::new(51.5, -0.12)));
        assert!(config.popup.auto_close);
        assert_eq!(config.popup.max_width, 250);
    }

    #[test]
    fn zoom_above_max_is_rejected() {
        let mut config = Config::default();
        config.map.zoom = 20;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidZoom { zoom: 20, max_zoom: 19 })
        ));
    }

    #[test]
    fn colors_parse_case_insensitively() {
        assert_eq!(parse_color("darkblue").unwrap(), StandardColor::DarkBlue);
        assert!(matches!(parse_color("mauve"), Err(ConfigError::InvalidColor(_))));
    }

    #[test]
    fn load_writes_defaults_then_reads_them_back() {
        let dir = std::env::temp_dir().join(format!("map-workout-config-{}", std::process::id()));
        let path = dir.join(CONFIG_FILE_NAME);
        let _ = fs::remove_file(&path);

        let created = load(&path).unwrap();
        assert_eq!(created, Config::default());
        assert!(path.exists());

        let mut changed = created.clone();
        changed.map.zoom = 11;
        save(&path, &changed).unwrap();
        assert_eq!(load(&path).unwrap().map.zoom, 11);

        let _ = fs::remove_dir_all(&dir);
    }
}
