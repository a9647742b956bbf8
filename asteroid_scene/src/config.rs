//! Env parsing and scene defaults.

use std::path::PathBuf;
use std::str::FromStr;

use bevy::prelude::*;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};

const VISIBLE_COUNT_VAR: &str = "ASTEROID_VISIBLE_COUNT";
const SHOW_ORBITS_VAR: &str = "ASTEROID_SHOW_ORBITS";
const ANIMATION_SPEED_VAR: &str = "ASTEROID_ANIMATION_SPEED";
const STAR_COUNT_VAR: &str = "ASTEROID_STAR_COUNT";
const LAYOUT_SEED_VAR: &str = "ASTEROID_LAYOUT_SEED";
const CATALOG_VAR: &str = "ASTEROID_CATALOG";

pub const MIN_ANIMATION_SPEED: f32 = 0.1;
pub const MAX_ANIMATION_SPEED: f32 = 3.0;
const DEFAULT_STAR_COUNT: usize = 15_000;
const MAX_STAR_COUNT: usize = 200_000;
const DEFAULT_LAYOUT_SEED: u64 = 0x5eed;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Startup configuration for the scene.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Visible catalog prefix; `None` shows the whole catalog.
    pub visible_count: Option<usize>,
    pub show_orbits: bool,
    pub animation_speed: f32,
    pub star_count: usize,
    pub layout_seed: u64,
    pub catalog_path: Option<PathBuf>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            visible_count: None,
            show_orbits: true,
            animation_speed: 1.0,
            star_count: DEFAULT_STAR_COUNT,
            layout_seed: DEFAULT_LAYOUT_SEED,
            catalog_path: None,
        }
    }
}

impl SceneConfig {
    /// Reads every `ASTEROID_*` variable. Invalid values are logged and the
    /// default is kept.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            visible_count: read_var::<usize>(VISIBLE_COUNT_VAR)
                .map(Some)
                .unwrap_or(defaults.visible_count),
            show_orbits: read_bool(SHOW_ORBITS_VAR).unwrap_or(defaults.show_orbits),
            animation_speed: read_speed(ANIMATION_SPEED_VAR).unwrap_or(defaults.animation_speed),
            star_count: read_var::<usize>(STAR_COUNT_VAR)
                .map(|n| n.min(MAX_STAR_COUNT))
                .unwrap_or(defaults.star_count),
            layout_seed: read_var::<u64>(LAYOUT_SEED_VAR).unwrap_or(defaults.layout_seed),
            catalog_path: std::env::var(CATALOG_VAR).ok().map(PathBuf::from),
        }
    }

    /// Loads the configured catalog, falling back to the builtin one.
    pub fn load_catalog(&self) -> Catalog {
        let Some(path) = &self.catalog_path else {
            return Catalog::builtin();
        };
        match Catalog::from_json_file(path) {
            Ok(catalog) => {
                info!("loaded {} records from {}", catalog.len(), path.display());
                catalog
            }
            Err(err) => {
                warn!("{err}; using builtin catalog");
                Catalog::builtin()
            }
        }
    }

    /// Like `load_catalog`, but surfaces the error.
    pub fn try_load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => Catalog::from_json_file(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

fn read_var<T: FromStr>(var: &'static str) -> Option<T> {
    let raw = std::env::var(var).ok()?;
    match parse_value(var, &raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("{err}; keeping default");
            None
        }
    }
}

fn read_speed(var: &'static str) -> Option<f32> {
    let raw = std::env::var(var).ok()?;
    match parse_speed(var, &raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("{err}; keeping default");
            None
        }
    }
}

fn read_bool(var: &'static str) -> Option<bool> {
    let raw = std::env::var(var).ok()?;
    match parse_bool(var, &raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("{err}; keeping default");
            None
        }
    }
}

fn parse_value<T: FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
        var,
        value: raw.to_string(),
    })
}

/// Clamped animation speed. NaN and infinities are rejected.
fn parse_speed(var: &'static str, raw: &str) -> Result<f32, ConfigError> {
    let speed = parse_value::<f32>(var, raw)?;
    if !speed.is_finite() {
        return Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
        });
    }
    Ok(speed.clamp(MIN_ANIMATION_SPEED, MAX_ANIMATION_SPEED))
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    struct EnvGuard {
        snapshot: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn capture(keys: &[&'static str]) -> Self {
            let snapshot = keys
                .iter()
                .map(|&key| (key, std::env::var(key).ok()))
                .collect();
            for key in keys {
                std::env::remove_var(key);
            }
            Self { snapshot }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.snapshot {
                match value {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }

    const ENV_KEYS: [&str; 6] = [
        VISIBLE_COUNT_VAR,
        SHOW_ORBITS_VAR,
        ANIMATION_SPEED_VAR,
        STAR_COUNT_VAR,
        LAYOUT_SEED_VAR,
        CATALOG_VAR,
    ];

    #[test]
    fn defaults_when_nothing_is_set() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        assert_eq!(SceneConfig::from_env(), SceneConfig::default());
    }

    #[test]
    fn values_are_read_and_clamped() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        std::env::set_var(VISIBLE_COUNT_VAR, "3");
        std::env::set_var(SHOW_ORBITS_VAR, "off");
        std::env::set_var(ANIMATION_SPEED_VAR, "9.5");
        std::env::set_var(STAR_COUNT_VAR, "500");

        let config = SceneConfig::from_env();

        assert_eq!(config.visible_count, Some(3));
        assert!(!config.show_orbits);
        assert_eq!(config.animation_speed, MAX_ANIMATION_SPEED);
        assert_eq!(config.star_count, 500);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        std::env::set_var(VISIBLE_COUNT_VAR, "many");
        std::env::set_var(SHOW_ORBITS_VAR, "maybe");
        std::env::set_var(ANIMATION_SPEED_VAR, "NaN");

        let config = SceneConfig::from_env();

        assert_eq!(config.visible_count, None);
        assert!(config.show_orbits);
        assert_eq!(config.animation_speed, 1.0);

        std::env::set_var(ANIMATION_SPEED_VAR, "inf");
        assert_eq!(SceneConfig::from_env().animation_speed, 1.0);
    }

    #[test]
    fn parse_speed_rejects_non_finite_values() {
        assert!(parse_speed("X", "NaN").is_err());
        assert!(parse_speed("X", "-inf").is_err());
        assert_eq!(parse_speed("X", "0.01"), Ok(MIN_ANIMATION_SPEED));
        assert_eq!(parse_speed("X", "1.5"), Ok(1.5));
    }

    #[test]
    fn missing_catalog_file_falls_back_to_builtin() {
        let config = SceneConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/catalog.json")),
            ..SceneConfig::default()
        };

        assert!(matches!(
            config.try_load_catalog(),
            Err(CatalogError::Io { .. })
        ));
        assert_eq!(config.load_catalog().len(), 6);
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("X", "TRUE"), Ok(true));
        assert_eq!(parse_bool("X", " 0 "), Ok(false));
        assert!(parse_bool("X", "2").is_err());
    }
}
