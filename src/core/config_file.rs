//! User configuration file handling
//!
//! Manages settings from ~/.config/tracefont/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::font_source::WidthOption;
use crate::pipeline::OutputSize;

/// User configuration from ~/.config/tracefont/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    /// Binarization threshold, 0-255
    pub threshold: Option<u8>,
    /// "original" or "fixed-height"
    pub output_size: Option<OutputSize>,
    /// "fixed" or "svg"
    pub width_option: Option<WidthOption>,
    /// Family name used when none is given on the command line
    pub family_name: Option<String>,
    /// Speckle size dropped by the built-in tracer
    pub turd_size: Option<u32>,
    /// Round traced corners into curves
    pub smooth: Option<bool>,
    /// Font compiler executable
    pub fontc: Option<PathBuf>,
}

impl ConfigFile {
    /// Get the path to the tracefont config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("tracefont")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return None;
        }

        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents, &path),
            Err(e) => {
                tracing::warn!("Failed to read settings.json: {}", e);
                None
            }
        }
    }

    fn parse(contents: &str, path: &std::path::Path) -> Option<Self> {
        match serde_json::from_str(contents) {
            Ok(config) => {
                tracing::debug!("Loaded user settings from {:?}", path);
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings.json: {}", e);
                None
            }
        }
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents)?;

        tracing::debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// A settings file spelling out every built-in default
    pub fn with_defaults() -> Self {
        Self {
            threshold: Some(crate::pipeline::DEFAULT_THRESHOLD),
            output_size: Some(OutputSize::default()),
            width_option: Some(WidthOption::default()),
            family_name: None,
            turd_size: Some(2),
            smooth: Some(false),
            fontc: Some(PathBuf::from(crate::export::compiler::DEFAULT_COMPILER)),
        }
    }

    /// Initialize the user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/tracefont directory
    /// 2. A settings.json file with default values
    /// 3. A logs/ directory for application logs
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        let config_dir = Self::config_dir();

        // Create the main config directory
        fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        // Create logs directory
        let logs_dir = crate::logging::logs_dir();
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        // Create settings.json
        let settings_path = Self::config_path();
        if !settings_path.exists() {
            Self::with_defaults().save()?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("You can now:");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - View application logs in: {:?}", logs_dir);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_partial_settings_parse() {
        let config = ConfigFile::parse(
            r#"{ "threshold": 90, "width_option": "svg", "output_size": "fixed-height" }"#,
            Path::new("settings.json"),
        )
        .unwrap();

        assert_eq!(config.threshold, Some(90));
        assert_eq!(config.width_option, Some(WidthOption::Svg));
        assert_eq!(config.output_size, Some(OutputSize::FixedHeight));
        assert_eq!(config.family_name, None);
    }

    #[test]
    fn test_invalid_settings_are_ignored() {
        assert!(ConfigFile::parse(r#"{ "threshold": 300 }"#, Path::new("s.json")).is_none());
        assert!(ConfigFile::parse("not json", Path::new("s.json")).is_none());
    }

    #[test]
    fn test_defaults_round_trip_through_json() {
        let defaults = ConfigFile::with_defaults();
        let json = serde_json::to_string_pretty(&defaults).unwrap();
        assert!(json.contains("\"fixed\""));
        assert_eq!(ConfigFile::parse(&json, Path::new("s.json")), Some(defaults));
    }
}
