//! Configuration for the client monitor
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/chessmon/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Demo mode: scripted engines play a showcase game
    pub demo_mode: bool,

    /// Board width/height correction for non-square terminal cells
    pub aspect_factor: f32,

    /// Tournament code reported by wrapped clients, if any
    pub tournament_code: Option<String>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter for this crate ("error".."trace")
    pub level: String,
    /// Also write logs to rotating files
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_prefix: String,
    pub file_rotation: LogRotation,
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo_mode: false,
            aspect_factor: 2.0,
            tournament_code: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_prefix: "chessmon".to_string(),
            file_rotation: LogRotation::Daily,
        }
    }
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    demo_mode: Option<bool>,
    aspect_factor: Option<f32>,
    tournament_code: Option<String>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
    file_prefix: Option<String>,
    file_rotation: Option<LogRotation>,
}

impl Config {
    /// Load configuration: defaults, overlaid with the config file, overlaid
    /// with `CHESSMON_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(file) = Self::load_file() {
            config.apply_file(file);
        }

        if let Ok(demo) = std::env::var("CHESSMON_DEMO") {
            config.demo_mode = matches!(demo.as_str(), "1" | "true" | "yes");
        }
        if let Some(factor) = std::env::var("CHESSMON_ASPECT_FACTOR")
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
        {
            config.aspect_factor = factor;
        }
        if let Ok(code) = std::env::var("CHESSMON_TOURNAMENT_CODE") {
            config.tournament_code = (!code.is_empty()).then_some(code);
        }
        if let Ok(level) = std::env::var("CHESSMON_LOG_LEVEL") {
            config.logging.level = level;
        }

        // A zero or negative factor would collapse the layout math.
        if config.aspect_factor <= 0.0 {
            config.aspect_factor = 2.0;
        }

        config
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(demo) = file.demo_mode {
            self.demo_mode = demo;
        }
        if let Some(factor) = file.aspect_factor {
            self.aspect_factor = factor;
        }
        if file.tournament_code.is_some() {
            self.tournament_code = file.tournament_code;
        }
        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(enabled) = logging.file_enabled {
                self.logging.file_enabled = enabled;
            }
            if let Some(dir) = logging.file_dir {
                self.logging.file_dir = PathBuf::from(dir);
            }
            if let Some(prefix) = logging.file_prefix {
                self.logging.file_prefix = prefix;
            }
            if let Some(rotation) = logging.file_rotation {
                self.logging.file_rotation = rotation;
            }
        }
    }

    fn load_file() -> Option<FileConfig> {
        let path = Self::config_path()?;
        let contents = std::fs::read_to_string(&path).ok()?;
        match toml::from_str(&contents) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("Warning: ignoring malformed config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Platform config file location, e.g. ~/.config/chessmon/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("chessmon").join("config.toml"))
    }

    /// Serialize the current values as a commented config template.
    pub fn to_toml(&self) -> String {
        let rotation = match self.logging.file_rotation {
            LogRotation::Hourly => "hourly",
            LogRotation::Daily => "daily",
            LogRotation::Never => "never",
        };
        format!(
            "# chessmon configuration\n\
             # Values here are overridden by CHESSMON_* environment variables.\n\
             \n\
             demo_mode = {}\n\
             aspect_factor = {}\n\
             {}\n\
             [logging]\n\
             level = {:?}\n\
             file_enabled = {}\n\
             file_dir = {:?}\n\
             file_prefix = {:?}\n\
             file_rotation = {:?}\n",
            self.demo_mode,
            self.aspect_factor,
            match &self.tournament_code {
                Some(code) => format!("tournament_code = {:?}\n", code),
                None => "# tournament_code = \"WCCC-24\"\n".to_string(),
            },
            self.logging.level,
            self.logging.file_enabled,
            self.logging.file_dir.display().to_string(),
            self.logging.file_prefix,
            rotation,
        )
    }

    /// Write a default config template if none exists yet.
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let _ = std::fs::write(&path, Config::default().to_toml());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert!(!config.demo_mode);
        assert_eq!(config.aspect_factor, 2.0);
        assert_eq!(config.tournament_code, None);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file_rotation, LogRotation::Daily);
    }

    #[test]
    fn file_values_overlay_defaults() {
        let file: FileConfig = toml::from_str(
            r#"
            demo_mode = true
            aspect_factor = 1.5
            tournament_code = "WCCC-24"

            [logging]
            level = "debug"
            file_rotation = "hourly"
            "#,
        )
        .unwrap();

        let mut config = Config::default();
        config.apply_file(file);
        assert!(config.demo_mode);
        assert_eq!(config.aspect_factor, 1.5);
        assert_eq!(config.tournament_code.as_deref(), Some("WCCC-24"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file_rotation, LogRotation::Hourly);
        // Untouched fields keep their defaults.
        assert!(!config.logging.file_enabled);
    }

    #[test]
    fn template_round_trips_through_the_parser() {
        let template = Config::default().to_toml();
        let parsed: FileConfig = toml::from_str(&template).unwrap();
        assert_eq!(parsed.demo_mode, Some(false));
        assert_eq!(parsed.aspect_factor, Some(2.0));
        assert!(parsed.tournament_code.is_none());
        assert_eq!(parsed.logging.unwrap().level.as_deref(), Some("info"));
    }
}
