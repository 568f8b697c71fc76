//! Application-level configuration: devices, initial spread, and the effect schedule.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::device::DEFAULT_SYSFS_ROOT;
use crate::effect::Effect;
use crate::effects::{
    ChristmasAsyncEffect, ChristmasEffect, ChristmasRandomEffect, CombinedEffects, DEFAULT_HUES,
    HsvCycleEffect, RandomEffect, SpreadResetEffect,
};
use crate::schedule::Schedule;
use crate::spread::SpreadDistance;
use crate::types::{ConfigurationError, MIN_LEVEL};

/// Default location on disk where the daemon looks for the JSON configuration.
pub const DEFAULT_CONFIG_PATH: &str = "config/ambient.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "RGB_AMBIENT_CONFIG_PATH";

/// Default pause between steps: 30 frames per second.
const DEFAULT_DELAY_SECS: f64 = 1.0 / 30.0;
const DEFAULT_STEPS: u32 = 500;

/// Errors raised while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Configuration path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for [`AppConfig`].
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Configuration path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed but describes an invalid setup.
    #[error(transparent)]
    Invalid(#[from] ConfigurationError),
}

/// Where the RGB devices come from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeviceConfig {
    /// Linux LED class devices discovered under `root`.
    Sysfs {
        /// Directory to scan.
        #[serde(default = "default_sysfs_root")]
        root: PathBuf,
    },

    /// Hardware-free devices that log their colors.
    Log {
        /// Number of devices to simulate.
        count: usize,
    },
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig::Sysfs {
            root: default_sysfs_root(),
        }
    }
}

fn default_sysfs_root() -> PathBuf {
    PathBuf::from(DEFAULT_SYSFS_ROOT)
}

/// Serializable description of one effect.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectConfig {
    /// [`HsvCycleEffect`].
    HsvCycle {
        #[serde(default = "default_dh")]
        dh: f64,
        #[serde(default)]
        ds: f64,
        #[serde(default)]
        dv: f64,
        #[serde(default = "min_level")]
        min_s: f64,
        #[serde(default = "one")]
        max_s: f64,
        #[serde(default = "min_level")]
        min_v: f64,
        #[serde(default = "one")]
        max_v: f64,
    },

    /// [`CombinedEffects`].
    Combined { effects: Vec<EffectConfig> },

    /// [`RandomEffect`].
    Random,

    /// [`ChristmasEffect`].
    Christmas {
        #[serde(default = "default_fade_dv")]
        dv: f64,
        #[serde(default = "min_level")]
        min_v: f64,
        #[serde(default = "default_fade_max_v")]
        max_v: f64,
        #[serde(default = "default_hues")]
        hues: Vec<f64>,
    },

    /// [`ChristmasRandomEffect`].
    ChristmasRandom {
        #[serde(default = "default_fade_dv")]
        dv: f64,
        #[serde(default = "min_level")]
        min_v: f64,
        #[serde(default = "default_fade_max_v")]
        max_v: f64,
    },

    /// [`ChristmasAsyncEffect`].
    ChristmasAsync {
        #[serde(default = "default_fade_dv")]
        dv: f64,
        #[serde(default = "min_level")]
        min_v: f64,
        #[serde(default = "default_fade_max_v")]
        max_v: f64,
        #[serde(default = "default_step_amplitude")]
        step_amplitude: f64,
    },

    /// [`SpreadResetEffect`].
    SpreadReset,
}

fn default_dh() -> f64 {
    0.05
}

fn min_level() -> f64 {
    MIN_LEVEL
}

fn one() -> f64 {
    1.0
}

fn default_fade_dv() -> f64 {
    0.1
}

fn default_fade_max_v() -> f64 {
    0.7
}

fn default_hues() -> Vec<f64> {
    DEFAULT_HUES.to_vec()
}

fn default_step_amplitude() -> f64 {
    0.3
}

impl EffectConfig {
    /// Builds a fresh, validated effect instance.
    pub fn build(&self) -> Result<Box<dyn Effect>, ConfigurationError> {
        let effect: Box<dyn Effect> = match self {
            EffectConfig::HsvCycle {
                dh,
                ds,
                dv,
                min_s,
                max_s,
                min_v,
                max_v,
            } => {
                let effect = HsvCycleEffect::new(*dh, *ds, *dv)?
                    .with_saturation_bounds(*min_s, *max_s)?
                    .with_value_bounds(*min_v, *max_v)?;
                Box::new(effect)
            }
            EffectConfig::Combined { effects } => {
                let effects = effects
                    .iter()
                    .map(EffectConfig::build)
                    .collect::<Result<Vec<_>, _>>()?;
                Box::new(CombinedEffects::new(effects))
            }
            EffectConfig::Random => Box::new(RandomEffect),
            EffectConfig::Christmas {
                dv,
                min_v,
                max_v,
                hues,
            } => Box::new(ChristmasEffect::new(*dv, *min_v, *max_v, hues.clone())?),
            EffectConfig::ChristmasRandom { dv, min_v, max_v } => {
                Box::new(ChristmasRandomEffect::new(*dv, *min_v, *max_v)?)
            }
            EffectConfig::ChristmasAsync {
                dv,
                min_v,
                max_v,
                step_amplitude,
            } => Box::new(ChristmasAsyncEffect::new(*dv, *min_v, *max_v, *step_amplitude)?),
            EffectConfig::SpreadReset => Box::new(SpreadResetEffect),
        };
        Ok(effect)
    }
}

/// One schedule entry as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntryConfig {
    /// Effect to run.
    pub effect: EffectConfig,
    /// Steps to run it for.
    #[serde(default = "default_steps")]
    pub steps: u32,
    /// Delay between steps, in seconds.
    #[serde(default = "default_delay")]
    pub delay: f64,
}

fn default_steps() -> u32 {
    DEFAULT_STEPS
}

fn default_delay() -> f64 {
    DEFAULT_DELAY_SECS
}

/// Immutable runtime configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Device source.
    pub devices: DeviceConfig,
    /// Hue distance for the initial colors.
    pub spread: SpreadDistance,
    /// Seed for reproducible randomness; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Animation cycle.
    pub schedule: Vec<EntryConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let entry = |effect| EntryConfig {
            effect,
            steps: DEFAULT_STEPS,
            delay: DEFAULT_DELAY_SECS,
        };
        Self {
            devices: DeviceConfig::default(),
            spread: SpreadDistance::Even,
            seed: None,
            schedule: vec![
                entry(EffectConfig::HsvCycle {
                    dh: 0.005,
                    ds: 0.0,
                    dv: 0.0,
                    min_s: MIN_LEVEL,
                    max_s: 1.0,
                    min_v: MIN_LEVEL,
                    max_v: 1.0,
                }),
                entry(EffectConfig::Christmas {
                    dv: default_fade_dv(),
                    min_v: MIN_LEVEL,
                    max_v: default_fade_max_v(),
                    hues: default_hues(),
                }),
                entry(EffectConfig::ChristmasRandom {
                    dv: default_fade_dv(),
                    min_v: MIN_LEVEL,
                    max_v: default_fade_max_v(),
                }),
                entry(EffectConfig::ChristmasAsync {
                    dv: default_fade_dv(),
                    min_v: MIN_LEVEL,
                    max_v: default_fade_max_v(),
                    step_amplitude: default_step_amplitude(),
                }),
            ],
        }
    }
}

impl AppConfig {
    /// Loads the configuration from disk, falling back to the built-in default
    /// only when the file does not exist.
    pub fn load() -> Result<Self, ConfigLoadError> {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let config = Self::from_json(&contents).map_err(|source| ConfigLoadError::Parse {
                    path: path.clone(),
                    source,
                })?;
                config.validate()?;
                info!(
                    path = %path.display(),
                    entries = config.schedule.len(),
                    "loaded configuration"
                );
                Ok(config)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Ok(Self::default())
            }
            Err(source) => Err(ConfigLoadError::Read { path, source }),
        }
    }

    /// Parses a JSON document.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Checks everything that can be checked without devices.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let SpreadDistance::Fixed(distance) = self.spread {
            if !distance.is_finite() {
                return Err(ConfigurationError::InvalidParameter {
                    name: "spread distance",
                    value: distance,
                });
            }
        }
        if let DeviceConfig::Log { count: 0 } = self.devices {
            return Err(ConfigurationError::NoDevices);
        }
        self.build_schedule().map(|_| ())
    }

    /// Builds a fresh schedule with new effect instances.
    pub fn build_schedule(&self) -> Result<Schedule, ConfigurationError> {
        self.schedule
            .iter()
            .try_fold(Schedule::builder(), |builder, entry| {
                builder.entry_secs(entry.effect.build()?, entry.steps, entry.delay)
            })?
            .build()
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_four_entry_schedule() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let schedule = config.build_schedule().unwrap();
        let names: Vec<&str> = (0..schedule.len())
            .map(|i| schedule.get_entry(i).unwrap().effect.name())
            .collect();
        assert_eq!(names, vec!["hsv_cycle", "christmas", "christmas_random", "christmas_async"]);
        assert_eq!(schedule.steps_per_cycle(), 2000);
    }

    #[test]
    fn parses_minimal_document_with_defaults() {
        let config = AppConfig::from_json(
            r#"{
                "devices": { "kind": "log", "count": 3 },
                "spread": { "fixed": 0.1 },
                "seed": 42,
                "schedule": [
                    { "effect": { "type": "hsv_cycle", "dv": 0.05, "min_v": 0.01 }, "steps": 220 },
                    { "effect": { "type": "spread_reset" }, "steps": 1, "delay": 0 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.devices, DeviceConfig::Log { count: 3 });
        assert_eq!(config.spread, SpreadDistance::Fixed(0.1));
        assert_eq!(config.seed, Some(42));
        assert_eq!(
            config.schedule[0].effect,
            EffectConfig::HsvCycle {
                dh: 0.05,
                ds: 0.0,
                dv: 0.05,
                min_s: MIN_LEVEL,
                max_s: 1.0,
                min_v: 0.01,
                max_v: 1.0,
            }
        );
        assert_eq!(config.schedule[0].delay, DEFAULT_DELAY_SECS);
        assert_eq!(config.schedule[1].delay, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_is_the_default_config() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn shipped_config_matches_built_in_defaults() {
        let shipped = AppConfig::from_json(include_str!("../config/ambient.json")).unwrap();
        assert_eq!(shipped, AppConfig::default());
        assert!(shipped.schedule.iter().all(|entry| entry.delay == DEFAULT_DELAY_SECS));
    }

    #[test]
    fn combined_effects_nest() {
        let config = AppConfig::from_json(
            r#"{ "schedule": [ { "effect": { "type": "combined", "effects": [
                { "type": "hsv_cycle" }, { "type": "random" } ] } } ] }"#,
        )
        .unwrap();
        let schedule = config.build_schedule().unwrap();
        assert_eq!(schedule.get_entry(0).unwrap().effect.name(), "combined");
    }

    #[test]
    fn invalid_entries_are_rejected() {
        let config = AppConfig::from_json(
            r#"{ "schedule": [ { "effect": { "type": "christmas", "hues": [] } } ] }"#,
        )
        .unwrap();
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigurationError::EmptyPalette { effect: "christmas" }
        );

        let config = AppConfig::from_json(
            r#"{ "schedule": [ { "effect": { "type": "random" }, "delay": -1.0 } ] }"#,
        )
        .unwrap();
        assert_eq!(config.validate().unwrap_err(), ConfigurationError::InvalidDelay(-1.0));

        let config = AppConfig::from_json(r#"{ "schedule": [] }"#).unwrap();
        assert_eq!(config.validate().unwrap_err(), ConfigurationError::EmptySchedule);

        let config = AppConfig::from_json(r#"{ "devices": { "kind": "log", "count": 0 } }"#).unwrap();
        assert_eq!(config.validate().unwrap_err(), ConfigurationError::NoDevices);
    }

    #[test]
    fn unknown_effect_type_fails_to_parse() {
        assert!(AppConfig::from_json(r#"{ "schedule": [ { "effect": { "type": "strobe" } } ] }"#).is_err());
    }
}
