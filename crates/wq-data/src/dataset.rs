//! Dataset schema and loading

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use wq_core::{CountryId, CountryRecord, StyleOverride, locked_overrides};

use crate::error::DatasetError;
use crate::geometry::{Outline, Point, ViewBox};
use crate::integrity::IntegrityReport;
use crate::path::parse_path;

/// World dataset shipped with the binary
pub const BUNDLED_DATASET: &str = include_str!("../data/countries.json");

/// One region as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawLayer {
    pub id: String,
    pub name: String,
    /// SVG path data
    pub d: String,
    #[serde(rename = "allowedNames", default)]
    pub allowed_names: Vec<String>,
    #[serde(default)]
    pub locked: bool,
}

/// The dataset file as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawDataset {
    pub id: String,
    pub name: String,
    #[serde(rename = "viewBox")]
    pub view_box: String,
    pub layers: Vec<RawLayer>,
}

/// A parsed region with its quiz metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub record: CountryRecord,
    /// Display name as written in the dataset
    pub name: String,
    pub outlines: Vec<Outline>,
}

/// A loaded, parsed dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub id: String,
    pub name: String,
    pub view_box: ViewBox,
    pub layers: Vec<Layer>,
}

impl Dataset {
    /// Parse a dataset from JSON text
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let raw: RawDataset = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Parse path data and the viewBox of an already deserialized dataset
    pub fn from_raw(raw: RawDataset) -> Result<Self, DatasetError> {
        let view_box: ViewBox = raw.view_box.parse()?;
        let layers = raw
            .layers
            .into_iter()
            .map(|layer| -> Result<Layer, DatasetError> {
                let outlines = parse_path(&layer.d).map_err(|source| DatasetError::InvalidPath {
                    region: layer.id.clone(),
                    source,
                })?;
                Ok(Layer {
                    record: CountryRecord::new(
                        layer.id.as_str(),
                        &layer.name,
                        layer.allowed_names,
                        layer.locked,
                    ),
                    name: layer.name,
                    outlines,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: raw.id,
            name: raw.name,
            view_box,
            layers,
        })
    }

    /// Load a dataset file and log its integrity findings
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let dataset = Self::from_json(&content)?;
        info!(path = %path.display(), regions = dataset.layers.len(), "dataset loaded");
        dataset.log_integrity();
        Ok(dataset)
    }

    /// The dataset embedded in the binary
    pub fn bundled() -> Result<Self, DatasetError> {
        let dataset = Self::from_json(BUNDLED_DATASET)?;
        info!(regions = dataset.layers.len(), "bundled dataset loaded");
        dataset.log_integrity();
        Ok(dataset)
    }

    /// Every record, locked or not, in dataset order
    pub fn records(&self) -> impl Iterator<Item = &CountryRecord> {
        self.layers.iter().map(|layer| &layer.record)
    }

    /// Records eligible for guessing, in dataset order
    pub fn unlocked_records(&self) -> Vec<CountryRecord> {
        self.records().filter(|r| r.is_unlocked()).cloned().collect()
    }

    pub fn unlocked_count(&self) -> usize {
        self.records().filter(|r| r.is_unlocked()).count()
    }

    /// Fill overrides marking the regions that cannot be guessed. The map
    /// view itself carries no lock flags.
    pub fn locked_overrides(&self) -> Vec<StyleOverride> {
        locked_overrides(self.records())
    }

    pub fn integrity_report(&self) -> IntegrityReport {
        IntegrityReport::check(self.records())
    }

    fn log_integrity(&self) {
        for issue in self.integrity_report().issues {
            warn!("dataset integrity: {issue}");
        }
    }

    /// Geometry-only view for the map. Accepted names and lock flags do
    /// not reach the renderer.
    pub fn map_view(&self) -> MapView {
        MapView {
            id: self.id.clone(),
            name: self.name.clone(),
            view_box: self.view_box,
            regions: self
                .layers
                .iter()
                .map(|layer| Region {
                    id: layer.record.id.clone(),
                    name: layer.name.clone(),
                    outlines: layer.outlines.clone(),
                })
                .collect(),
        }
    }
}

/// Region geometry as seen by the map renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: CountryId,
    pub name: String,
    pub outlines: Vec<Outline>,
}

impl Region {
    pub fn contains(&self, p: Point) -> bool {
        self.outlines.iter().any(|outline| outline.contains(p))
    }
}

/// The map as seen by the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub id: String,
    pub name: String,
    pub view_box: ViewBox,
    pub regions: Vec<Region>,
}

impl MapView {
    /// Region under a map coordinate. Later regions are drawn on top, so
    /// they win.
    pub fn region_at(&self, p: Point) -> Option<&Region> {
        self.regions.iter().rev().find(|region| region.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "id": "test",
        "name": "Test",
        "viewBox": "0 0 100 50",
        "layers": [
            { "id": "FR", "name": "France", "d": "M0,0 L10,0 L10,10 L0,10 Z",
              "allowedNames": ["france"], "locked": false },
            { "id": "AQ", "name": "Antarctica", "d": "m20,20 l10,0 0,10 -10,0 z",
              "allowedNames": ["antarctica"], "locked": true },
            { "id": "DE", "name": "Germany", "d": "M40 0 H50 V10 H40 Z",
              "allowedNames": ["germany", "deutschland"] }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let dataset = Dataset::from_json(SMALL).unwrap();
        assert_eq!(dataset.layers.len(), 3);
        assert_eq!(dataset.view_box.width, 100.0);
        assert_eq!(dataset.layers[0].record.canonical_name, "france");
        assert_eq!(dataset.layers[0].name, "France");
        assert_eq!(dataset.layers[1].outlines[0].points.len(), 4);
    }

    #[test]
    fn test_locked_defaults_to_false() {
        let dataset = Dataset::from_json(SMALL).unwrap();
        assert!(!dataset.layers[2].record.locked);
    }

    #[test]
    fn test_unlocked_records_skip_locked() {
        let dataset = Dataset::from_json(SMALL).unwrap();
        let ids: Vec<_> = dataset
            .unlocked_records()
            .into_iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(ids, ["FR", "DE"]);
        assert_eq!(dataset.unlocked_count(), 2);
    }

    #[test]
    fn test_locked_overrides() {
        let dataset = Dataset::from_json(SMALL).unwrap();
        let overrides = dataset.locked_overrides();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].region_id, "AQ");
        assert_eq!(overrides[0].fill, wq_core::LOCKED_FILL);
    }

    #[test]
    fn test_map_view_keeps_every_region() {
        let view = Dataset::from_json(SMALL).unwrap().map_view();
        assert_eq!(view.regions.len(), 3);
        assert_eq!(view.regions[1].name, "Antarctica");
    }

    #[test]
    fn test_region_at() {
        let view = Dataset::from_json(SMALL).unwrap().map_view();
        assert_eq!(view.region_at(Point::new(5.0, 5.0)).unwrap().id, "FR");
        assert_eq!(view.region_at(Point::new(45.0, 5.0)).unwrap().id, "DE");
        assert!(view.region_at(Point::new(80.0, 40.0)).is_none());
    }

    #[test]
    fn test_invalid_path_names_region() {
        let json = r#"{ "id": "x", "name": "X", "viewBox": "0 0 1 1",
            "layers": [ { "id": "BAD", "name": "Bad", "d": "L0 0" } ] }"#;
        match Dataset::from_json(json) {
            Err(DatasetError::InvalidPath { region, .. }) => assert_eq!(region, "BAD"),
            other => panic!("expected invalid path error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_view_box() {
        let json = r#"{ "id": "x", "name": "X", "viewBox": "0 0", "layers": [] }"#;
        assert!(matches!(
            Dataset::from_json(json),
            Err(DatasetError::InvalidViewBox(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Dataset::from_json("{"),
            Err(DatasetError::Json(_))
        ));
    }

    #[test]
    fn test_bundled_dataset_loads() {
        let dataset = Dataset::bundled().unwrap();
        assert!(dataset.unlocked_count() > 10);
        assert!(dataset.layers.iter().all(|l| !l.outlines.is_empty()));
        assert!(dataset.integrity_report().is_clean());
    }
}
