//! Per-region style overrides derived from the guessed list and the lock
//! flags

use std::fmt;

use crate::country::{CountryId, CountryRecord};

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fill for a region whose country has been found
pub const FOUND_FILL: Rgb = Rgb::new(0x43, 0x6b, 0x3f);

/// Fill for a region that is out of play
pub const LOCKED_FILL: Rgb = Rgb::new(0x25, 0x25, 0x25);

/// Fill override for one map region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleOverride {
    pub region_id: CountryId,
    pub fill: Rgb,
}

/// One override per guessed id, in guess order
pub fn style_overrides(guessed: &[CountryId]) -> Vec<StyleOverride> {
    guessed
        .iter()
        .map(|id| StyleOverride {
            region_id: id.clone(),
            fill: FOUND_FILL,
        })
        .collect()
}

/// One override per locked record, in dataset order
pub fn locked_overrides<'a>(records: impl IntoIterator<Item = &'a CountryRecord>) -> Vec<StyleOverride> {
    records
        .into_iter()
        .filter(|record| record.locked)
        .map(|record| StyleOverride {
            region_id: record.id.clone(),
            fill: LOCKED_FILL,
        })
        .collect()
}
