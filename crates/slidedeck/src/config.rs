use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::background::StarMode;
use crate::navigator::input::InputSettings;
use crate::scale::Scaler;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "slidedeck";

pub const VALID_KEYS: &[&str] = &[
    "defaults.theme",
    "navigation.wheel_threshold",
    "navigation.wheel_cooldown_ms",
    "navigation.swipe_threshold",
    "navigation.transition_ms",
    "scale.base_width",
    "scale.threshold",
    "scale.max",
    "background.star_mode",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheel_threshold: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheel_cooldown_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipe_threshold: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScaleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_width: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackgroundConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_mode: Option<StarMode>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `slidedeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# slidedeck configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Navigation tunables. Values from a hand-edited file that `set` would
    /// reject fall back to the built-in default.
    pub fn input_settings(&self) -> InputSettings {
        let mut settings = InputSettings::default();
        if let Some(nav) = &self.navigation {
            settings.wheel_threshold = positive_or(
                "navigation.wheel_threshold",
                nav.wheel_threshold,
                settings.wheel_threshold,
            );
            if let Some(ms) = nav.wheel_cooldown_ms {
                settings.wheel_cooldown = Duration::from_millis(ms);
            }
            settings.swipe_threshold = positive_or(
                "navigation.swipe_threshold",
                nav.swipe_threshold,
                settings.swipe_threshold,
            );
            if let Some(ms) = nav.transition_ms {
                settings.transition_duration = Duration::from_millis(ms);
            }
        }
        settings
    }

    pub fn scaler(&self) -> Scaler {
        let mut scaler = Scaler::default();
        if let Some(scale) = &self.scale {
            scaler.base_width =
                positive_or("scale.base_width", scale.base_width, scaler.base_width);
            scaler.threshold = positive_or("scale.threshold", scale.threshold, scaler.threshold);
            scaler.max = match scale.max {
                Some(max) if max.is_finite() && max >= 1.0 => max,
                Some(max) => {
                    warn!("ignoring scale.max: {max} (must be at least 1.0)");
                    scaler.max
                }
                None => scaler.max,
            };
        }
        scaler
    }

    pub fn theme_name(&self) -> Option<&str> {
        self.defaults.as_ref().and_then(|d| d.theme.as_deref())
    }

    pub fn star_mode(&self) -> StarMode {
        self.background
            .as_ref()
            .and_then(|b| b.star_mode)
            .unwrap_or_default()
    }

    pub fn set_star_mode(&mut self, mode: StarMode) {
        self.background
            .get_or_insert_with(BackgroundConfig::default)
            .star_mode = Some(mode);
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "navigation.wheel_threshold" => {
                self.navigation
                    .get_or_insert_with(NavigationConfig::default)
                    .wheel_threshold = Some(parse_positive(key, value)?);
            }
            "navigation.wheel_cooldown_ms" => {
                self.navigation
                    .get_or_insert_with(NavigationConfig::default)
                    .wheel_cooldown_ms = Some(parse_millis(key, value)?);
            }
            "navigation.swipe_threshold" => {
                self.navigation
                    .get_or_insert_with(NavigationConfig::default)
                    .swipe_threshold = Some(parse_positive(key, value)?);
            }
            "navigation.transition_ms" => {
                self.navigation
                    .get_or_insert_with(NavigationConfig::default)
                    .transition_ms = Some(parse_millis(key, value)?);
            }
            "scale.base_width" => {
                self.scale.get_or_insert_with(ScaleConfig::default).base_width =
                    Some(parse_positive(key, value)?);
            }
            "scale.threshold" => {
                self.scale.get_or_insert_with(ScaleConfig::default).threshold =
                    Some(parse_positive(key, value)?);
            }
            "scale.max" => {
                let max = parse_positive(key, value)?;
                if max < 1.0 {
                    anyhow::bail!("Invalid scale.max: {value}. Must be at least 1.0.");
                }
                self.scale.get_or_insert_with(ScaleConfig::default).max = Some(max);
            }
            "background.star_mode" => {
                let Some(mode) = StarMode::from_name(value) else {
                    anyhow::bail!(
                        "Invalid star_mode: {value}. Must be 'moving', 'paused', or 'off'."
                    );
                };
                self.set_star_mode(mode);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: {}",
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

fn is_positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn positive_or(key: &str, value: Option<f32>, default: f32) -> f32 {
    match value {
        Some(v) if is_positive(v) => v,
        Some(v) => {
            warn!("ignoring {key}: {v} (must be a positive number)");
            default
        }
        None => default,
    }
}

fn parse_positive(key: &str, value: &str) -> Result<f32> {
    match value.parse::<f32>() {
        Ok(v) if is_positive(v) => Ok(v),
        _ => anyhow::bail!("Invalid {key}: {value}. Must be a positive number."),
    }
}

fn parse_millis(key: &str, value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|_| {
        anyhow::anyhow!("Invalid {key}: {value}. Must be a whole number of milliseconds.")
    })
}
