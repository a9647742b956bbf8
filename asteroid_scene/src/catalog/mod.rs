//! Asteroid catalog: immutable records, sorted by importance at load.

mod builtin;
mod model;

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use thiserror::Error;

pub use model::{CelestialBodyRecord, EstimatedDiameter, Impact, MissDistance, RelativeVelocity};

/// Relative tolerance when checking km → m conversions.
const UNIT_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog contains no records")]
    Empty,
    #[error("record {id}: {reason}")]
    Inconsistent { id: String, reason: String },
}

/// Ordered, immutable list of records. Sorted descending by importance once,
/// at construction.
#[derive(Resource, Clone, Debug)]
pub struct Catalog {
    records: Vec<CelestialBodyRecord>,
}

impl Catalog {
    /// Builds a catalog from arbitrary records. The sort is stable, so records
    /// with equal importance keep their input order.
    pub fn new(mut records: Vec<CelestialBodyRecord>) -> Result<Self, CatalogError> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }
        for record in &records {
            validate(record)?;
        }
        records.sort_by(|a, b| b.importance_score.cmp(&a.importance_score));
        Ok(Self { records })
    }

    /// The six records bundled with the application.
    pub fn builtin() -> Self {
        let mut records = builtin::records();
        records.sort_by(|a, b| b.importance_score.cmp(&a.importance_score));
        Self { records }
    }

    /// Loads a JSON array of records.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<CelestialBodyRecord> =
            serde_json::from_str(&json).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CelestialBodyRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&CelestialBodyRecord> {
        self.records.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&CelestialBodyRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Clamps a requested visible count to `1..=len`.
    pub fn clamp_count(&self, count: usize) -> usize {
        count.clamp(1, self.records.len().max(1))
    }

    /// The visible prefix of the catalog.
    pub fn visible(&self, count: usize) -> &[CelestialBodyRecord] {
        &self.records[..self.clamp_count(count)]
    }

    pub fn sentry_count(&self, count: usize) -> usize {
        self.visible(count)
            .iter()
            .filter(|r| r.is_sentry_object)
            .count()
    }

    pub fn hazardous_count(&self, count: usize) -> usize {
        self.visible(count)
            .iter()
            .filter(|r| r.is_potentially_hazardous)
            .count()
    }
}

fn validate(record: &CelestialBodyRecord) -> Result<(), CatalogError> {
    let inconsistent = |reason: String| CatalogError::Inconsistent {
        id: record.id.clone(),
        reason,
    };

    if record.torino_scale > 10 {
        return Err(inconsistent(format!(
            "torino scale {} out of range",
            record.torino_scale
        )));
    }

    let d = &record.estimated_diameter;
    if d.km_min > d.km_max {
        return Err(inconsistent("diameter min exceeds max".to_string()));
    }
    for (km, m) in [(d.km_min, d.m_min), (d.km_max, d.m_max)] {
        if !approx_eq(km * 1000.0, m) {
            return Err(inconsistent(format!("diameter {km} km != {m} m")));
        }
    }
    Ok(())
}

fn approx_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() / scale <= UNIT_TOLERANCE
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builtin_is_sorted_by_importance() {
        let catalog = Catalog::builtin();
        let scores: Vec<u32> = catalog.records().iter().map(|r| r.importance_score).collect();

        assert_eq!(scores, vec![10, 8, 7, 5, 4, 2]);
        assert_eq!(catalog.records()[0].name, "394051 (2006 AM4)");
        assert_eq!(catalog.records()[5].name, "4769 Castalia");
    }

    #[test]
    fn builtin_records_pass_validation() {
        for record in Catalog::builtin().records() {
            validate(record).unwrap();
        }
    }

    #[test]
    fn visible_prefix_is_clamped() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.visible(0).len(), 1);
        assert_eq!(catalog.visible(3).len(), 3);
        assert_eq!(catalog.visible(99).len(), 6);
        assert_eq!(catalog.visible(1)[0].id, "2394051");
    }

    #[test]
    fn aggregates_count_visible_prefix_only() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.sentry_count(6), 1);
        assert_eq!(catalog.hazardous_count(6), 3);
        assert_eq!(catalog.hazardous_count(1), 1);
    }

    #[test]
    fn new_rejects_empty_catalog() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn new_rejects_mismatched_units() {
        let mut record = builtin::records().remove(0);
        record.estimated_diameter.m_max = 1.0;

        let err = Catalog::new(vec![record]).unwrap_err();
        assert!(matches!(err, CatalogError::Inconsistent { .. }));
    }

    #[test]
    fn json_file_round_trips_through_loader() {
        let records = builtin::records();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&records).unwrap().as_bytes())
            .unwrap();

        let catalog = Catalog::from_json_file(file.path()).unwrap();

        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.records()[0].importance_score, 10);
    }

    #[test]
    fn json_file_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = Catalog::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }
}
