//! Country records

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable region identifier, shared with the map geometry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryId(String);

impl CountryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CountryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CountryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for CountryId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CountryId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A country as loaded from the static dataset.
///
/// Records are immutable for the whole session. Only unlocked records are
/// handed to the [`GuessTracker`](crate::GuessTracker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub id: CountryId,
    /// Lower-cased display name
    pub canonical_name: String,
    /// Every spelling that counts as a correct guess, compared verbatim
    pub accepted_names: Vec<String>,
    pub locked: bool,
}

impl CountryRecord {
    /// Build a record, lower-casing the display name.
    pub fn new(
        id: impl Into<CountryId>,
        name: &str,
        accepted_names: impl IntoIterator<Item = impl Into<String>>,
        locked: bool,
    ) -> Self {
        Self {
            id: id.into(),
            canonical_name: name.to_lowercase(),
            accepted_names: accepted_names.into_iter().map(Into::into).collect(),
            locked,
        }
    }

    /// Whether `normalized` is exactly one of this country's accepted names
    pub fn accepts(&self, normalized: &str) -> bool {
        self.accepted_names.iter().any(|name| name == normalized)
    }

    pub fn is_unlocked(&self) -> bool {
        !self.locked
    }
}

/// Normalize raw input text before matching.
///
/// Only case is folded. Whitespace is kept as typed, so `" france"` and
/// `"france"` are different guesses.
pub fn normalize_guess(raw: &str) -> String {
    raw.to_lowercase()
}
