// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Version history for setlist documents.
//!
//! Every committed setlist mutation produces exactly one `VersionRecord`.
//! Records are immutable once appended and their version numbers increase
//! by exactly one in append order, starting at 1 for the creation record.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[cfg(test)]
mod tests;

/// Description recorded when no human-readable summary can be produced.
pub const GENERIC_CHANGE_DESCRIPTION: &str = "setlist updated";

/// Description recorded for the first version of every setlist.
pub const CREATION_DESCRIPTION: &str = "setlist created";

/// The entity performing a change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    /// The authenticated actor id supplied by the identity layer.
    pub id: String,
}

impl Actor {
    /// Creates a new Actor.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// The specific change that was performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`AddSong`", "`MoveSong`").
    pub name: String,
    /// Human-readable summary of the change, if one could be produced.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub fn new(name: impl Into<String>, details: Option<String>) -> Self {
        Self {
            name: name.into(),
            details,
        }
    }

    /// The description to record for this action.
    ///
    /// Falls back to [`GENERIC_CHANGE_DESCRIPTION`] when no summary exists.
    #[must_use]
    pub fn description(&self) -> String {
        self.details
            .as_deref()
            .map(str::trim)
            .filter(|details| !details.is_empty())
            .map_or_else(|| String::from(GENERIC_CHANGE_DESCRIPTION), String::from)
    }
}

/// An immutable record of one committed change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    version: u64,
    changed_by: String,
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
    action: String,
    description: String,
}

impl VersionRecord {
    /// Rebuilds a record from stored parts.
    ///
    /// Ordering invariants are checked by [`VersionHistory::from_records`].
    #[must_use]
    pub const fn from_parts(
        version: u64,
        changed_by: String,
        timestamp: OffsetDateTime,
        action: String,
        description: String,
    ) -> Self {
        Self {
            version,
            changed_by,
            timestamp,
            action,
            description,
        }
    }

    /// The setlist version this record produced.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// The actor id of the change author.
    #[must_use]
    pub fn changed_by(&self) -> &str {
        &self.changed_by
    }

    /// When the change was committed.
    #[must_use]
    pub const fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// The action name.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The free-text change description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Errors raised when a stored history violates its invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditError {
    /// A history must contain at least the creation record.
    EmptyHistory,
    /// Versions must start at 1 and increase by exactly one.
    NonSequentialVersion {
        /// The version that was expected at this position.
        expected: u64,
        /// The version that was found.
        found: u64,
    },
}

impl std::fmt::Display for AuditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyHistory => write!(f, "Version history is empty"),
            Self::NonSequentialVersion { expected, found } => {
                write!(
                    f,
                    "Version history is not sequential: expected version {expected}, found {found}"
                )
            }
        }
    }
}

impl std::error::Error for AuditError {}

/// Chronological, append-only sequence of version records.
///
/// A history is never empty: it always starts with the creation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionHistory {
    records: Vec<VersionRecord>,
}

impl VersionHistory {
    /// Starts a history with the creation record (version 1).
    #[must_use]
    pub fn begin(actor: &Actor, timestamp: OffsetDateTime) -> Self {
        Self {
            records: vec![VersionRecord {
                version: 1,
                changed_by: actor.id.clone(),
                timestamp,
                action: String::from("CreateSetlist"),
                description: String::from(CREATION_DESCRIPTION),
            }],
        }
    }

    /// Rebuilds a history from stored records, in append order.
    ///
    /// # Errors
    ///
    /// Returns an error if the records are empty or not numbered `1..=N`.
    pub fn from_records(records: Vec<VersionRecord>) -> Result<Self, AuditError> {
        if records.is_empty() {
            return Err(AuditError::EmptyHistory);
        }
        for (expected, record) in (1_u64..).zip(records.iter()) {
            if record.version != expected {
                return Err(AuditError::NonSequentialVersion {
                    expected,
                    found: record.version,
                });
            }
        }
        Ok(Self { records })
    }

    /// The version of the last appended record.
    #[must_use]
    pub fn current_version(&self) -> u64 {
        self.records.last().map_or(0, VersionRecord::version)
    }

    /// Appends a record for a committed change and returns it.
    ///
    /// The new record's version is always `current_version() + 1`.
    pub fn append(
        &mut self,
        actor: &Actor,
        timestamp: OffsetDateTime,
        action: &Action,
    ) -> &VersionRecord {
        let version: u64 = self.current_version() + 1;
        self.records.push(VersionRecord {
            version,
            changed_by: actor.id.clone(),
            timestamp,
            action: action.name.clone(),
            description: action.description(),
        });
        &self.records[self.records.len() - 1]
    }

    /// All records in append order.
    #[must_use]
    pub fn records(&self) -> &[VersionRecord] {
        &self.records
    }

    /// A caller-paginated window over the records.
    ///
    /// Out-of-range offsets yield an empty slice.
    #[must_use]
    pub fn page(&self, offset: usize, limit: usize) -> &[VersionRecord] {
        let start: usize = offset.min(self.records.len());
        let end: usize = start.saturating_add(limit).min(self.records.len());
        &self.records[start..end]
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the history holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
