//! wq-data: Static country dataset for worldquiz
//!
//! Loads the geographic dataset, partitions it into the records the guess
//! tracker plays with, and strips it down to the geometry-only view the map
//! renders.

pub mod dataset;
pub mod error;
pub mod geometry;
pub mod integrity;
pub mod path;

pub use dataset::{BUNDLED_DATASET, Dataset, Layer, MapView, RawDataset, RawLayer, Region};
pub use error::DatasetError;
pub use geometry::{Outline, Point, ViewBox};
pub use integrity::{IntegrityIssue, IntegrityReport};
pub use path::{PathError, parse_path};
