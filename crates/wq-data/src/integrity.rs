//! Load-time data integrity checks
//!
//! None of these findings stop the game. They explain why the progress
//! counter can never complete, or why a name resolves to an unexpected
//! country.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use wq_core::{CountryId, CountryRecord, normalize_guess};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// An unlocked country nobody can guess
    NoAcceptedNames { id: CountryId },
    /// Input is lower-cased before matching, so this name never matches
    UnreachableName { id: CountryId, name: String },
    /// Several unlocked countries accept the same name; the first one wins
    SharedName { name: String, ids: Vec<CountryId> },
    /// The id appears more than once; only the first record is played
    DuplicateId { id: CountryId },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::NoAcceptedNames { id } => {
                write!(f, "{id} has no accepted names and can never be guessed")
            }
            IntegrityIssue::UnreachableName { id, name } => {
                write!(f, "{id} accepts \"{name}\", which is not lower-case and never matches")
            }
            IntegrityIssue::SharedName { name, ids } => {
                let ids: Vec<&str> = ids.iter().map(CountryId::as_str).collect();
                write!(f, "\"{name}\" is accepted by {}; the first one wins", ids.join(", "))
            }
            IntegrityIssue::DuplicateId { id } => write!(f, "{id} appears more than once"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn check<'a>(records: impl IntoIterator<Item = &'a CountryRecord>) -> Self {
        let mut issues = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut owners: BTreeMap<&str, Vec<CountryId>> = BTreeMap::new();

        for record in records {
            if !seen_ids.insert(&record.id) {
                issues.push(IntegrityIssue::DuplicateId {
                    id: record.id.clone(),
                });
                continue;
            }
            if record.locked {
                continue;
            }
            if record.accepted_names.is_empty() {
                issues.push(IntegrityIssue::NoAcceptedNames {
                    id: record.id.clone(),
                });
            }
            for name in &record.accepted_names {
                if normalize_guess(name) != *name {
                    issues.push(IntegrityIssue::UnreachableName {
                        id: record.id.clone(),
                        name: name.clone(),
                    });
                }
                let ids = owners.entry(name.as_str()).or_default();
                if !ids.contains(&record.id) {
                    ids.push(record.id.clone());
                }
            }
        }

        issues.extend(
            owners
                .into_iter()
                .filter(|(_, ids)| ids.len() > 1)
                .map(|(name, ids)| IntegrityIssue::SharedName {
                    name: name.to_string(),
                    ids,
                }),
        );

        Self { issues }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "no integrity issues");
        }
        for issue in &self.issues {
            writeln!(f, "- {issue}")?;
        }
        Ok(())
    }
}
