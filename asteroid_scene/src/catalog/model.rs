// Catalog records. Every unit-converted field is derived from one true value;
// `Catalog::validate` checks the diameter conversions on load.

use serde::{Deserialize, Serialize};

/// Estimated diameter range of a body in four unit systems.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub km_min: f64,
    pub km_max: f64,
    pub m_min: f64,
    pub m_max: f64,
    pub mi_min: f64,
    pub mi_max: f64,
    pub ft_min: f64,
    pub ft_max: f64,
}

/// Relative velocity at close approach.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelativeVelocity {
    pub km_s: f64,
    pub km_h: f64,
    pub mph: f64,
}

/// Miss distance at close approach.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MissDistance {
    pub au: f64,
    pub lunar: f64,
    pub km: f64,
    pub mi: f64,
}

/// Modelled consequences of an impact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    pub energy_megatons: f64,
    pub crater_km: f64,
    /// Named regions at risk, most likely first.
    pub risk_zones: Vec<String>,
}

/// A single near-Earth object as carried by the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CelestialBodyRecord {
    pub id: String,
    pub name: String,
    pub nasa_jpl_url: String,
    pub absolute_magnitude_h: f64,
    pub estimated_diameter: EstimatedDiameter,
    pub is_potentially_hazardous: bool,
    pub is_sentry_object: bool,
    pub close_approach_date: String,
    pub close_approach_date_full: String,
    pub epoch_date_close_approach: i64,
    pub relative_velocity: RelativeVelocity,
    pub miss_distance: MissDistance,
    pub orbiting_body: String,
    pub impact: Impact,
    /// Torino impact hazard scale, 0–10.
    pub torino_scale: u8,
    /// Only used for the default sort order.
    pub importance_score: u32,
}

impl CelestialBodyRecord {
    pub fn diameter_km(&self) -> f64 {
        self.estimated_diameter.km_max
    }

    pub fn velocity_km_s(&self) -> f64 {
        self.relative_velocity.km_s
    }
}
