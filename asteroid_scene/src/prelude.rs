//! Minimal prelude for SDK consumers.

pub use crate::catalog::{Catalog, CelestialBodyRecord};
pub use crate::config::SceneConfig;
pub use crate::interaction::{BodyClicked, Selection, SelectionChanged};
pub use crate::placement::Tier;
pub use crate::scene::{BodyRegistry, SceneControls};
pub use crate::sdk::SceneBuilder;
