use serde::{Deserialize, Serialize};
use shared::{Canvas, CanvasError};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    InvalidValue { var: &'static str, value: String },

    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Host settings. None of these change the rules of the simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Seed for the random source; entropy when absent
    pub seed: Option<u64>,

    /// Run without a terminal UI and print the final stats as JSON
    pub headless: bool,

    /// Number of ticks for a headless run
    pub ticks: u64,

    /// Canvas size for a headless run. The terminal UI sizes the canvas to the window.
    pub width: f64,
    pub height: f64,

    /// Ticks per second in the terminal UI
    pub fps: u32,

    /// Where the terminal UI writes its logs
    pub log_file: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            headless: false,
            ticks: 10_000,
            width: 800.0,
            height: 600.0,
            fps: 30,
            log_file: None,
        }
    }
}

impl ViewerConfig {
    /// Defaults, then the JSON file named by `GERMS_CONFIG`, then individual
    /// `GERMS_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup("GERMS_CONFIG") {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(value) = lookup("GERMS_SEED") {
            config.seed = Some(parse("GERMS_SEED", &value)?);
        }
        if let Some(value) = lookup("GERMS_HEADLESS") {
            config.headless = parse_flag("GERMS_HEADLESS", &value)?;
        }
        if let Some(value) = lookup("GERMS_TICKS") {
            config.ticks = parse("GERMS_TICKS", &value)?;
        }
        if let Some(value) = lookup("GERMS_WIDTH") {
            config.width = parse("GERMS_WIDTH", &value)?;
        }
        if let Some(value) = lookup("GERMS_HEIGHT") {
            config.height = parse("GERMS_HEIGHT", &value)?;
        }
        if let Some(value) = lookup("GERMS_FPS") {
            config.fps = parse("GERMS_FPS", &value)?;
        }
        if let Some(value) = lookup("GERMS_LOG") {
            config.log_file = Some(PathBuf::from(value));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.canvas()?;
        if self.fps == 0 {
            return Err(ConfigError::InvalidValue {
                var: "fps",
                value: self.fps.to_string(),
            });
        }
        Ok(())
    }

    pub fn canvas(&self) -> Result<Canvas, CanvasError> {
        Canvas::new(self.width, self.height)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

fn parse<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_secs(1) / 30);
    }

    #[test]
    fn test_env_overrides() {
        let config = ViewerConfig::from_lookup(lookup(&[
            ("GERMS_SEED", "42"),
            ("GERMS_HEADLESS", "yes"),
            ("GERMS_TICKS", "500"),
            ("GERMS_WIDTH", "320"),
            ("GERMS_HEIGHT", "240"),
        ]))
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert!(config.headless);
        assert_eq!(config.ticks, 500);
        assert_eq!(config.canvas().unwrap(), Canvas::new(320.0, 240.0).unwrap());
    }

    #[test]
    fn test_invalid_number() {
        let err = ViewerConfig::from_lookup(lookup(&[("GERMS_TICKS", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "GERMS_TICKS", .. }));
    }

    #[test]
    fn test_invalid_flag() {
        let err = ViewerConfig::from_lookup(lookup(&[("GERMS_HEADLESS", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_invalid_canvas() {
        let err = ViewerConfig::from_lookup(lookup(&[("GERMS_WIDTH", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Canvas(_)));
    }

    #[test]
    fn test_zero_fps() {
        let err = ViewerConfig::from_lookup(lookup(&[("GERMS_FPS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "fps", .. }));
    }

    #[test]
    fn test_config_file() {
        let path = std::env::temp_dir().join(format!("germs-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "seed": 7, "ticks": 1234 }"#).unwrap();

        let config = ViewerConfig::from_lookup(lookup(&[
            ("GERMS_CONFIG", path.to_str().unwrap()),
            ("GERMS_TICKS", "99"),
        ]))
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.seed, Some(7));
        // the environment wins over the file
        assert_eq!(config.ticks, 99);
        assert_eq!(config.fps, 30);
    }

    #[test]
    fn test_missing_config_file() {
        let err = ViewerConfig::from_lookup(lookup(&[(
            "GERMS_CONFIG",
            "/definitely/not/here/germs.json",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
