//! NeoWatch: interactive 3D scene of near-Earth asteroids around the Earth.
//!
//! Library root: catalog, placement, interaction, animation, SDK builder and
//! config modules.

pub mod animation;
mod camera;
pub mod catalog;
pub mod config;
pub mod geo;
pub mod interaction;
pub mod placement;
pub mod scene;
mod ui;

pub mod prelude;
pub mod sdk;

pub use camera::OrbitCamera;
pub use catalog::{Catalog, CatalogError, CelestialBodyRecord};
pub use config::{ConfigError, SceneConfig};
pub use ui::{Mitigation, MitigationNotice, Overview, RiskLevel};
