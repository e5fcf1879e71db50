// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use gigbook_audit::{Action, Actor, VersionHistory, VersionRecord};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Opaque unique identifier of a setlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SetlistId(String);

impl SetlistId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SetlistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Weak reference to a song owned by the surrounding catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SongId(String);

impl SongId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SongId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a band owned by the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BandId(String);

impl BandId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who may read a setlist without a relation to its owner or band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Anyone may read. Never grants write access.
    Public,
    /// Only the owner and band members may read.
    #[default]
    Private,
}

impl Visibility {
    /// Converts this visibility to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl FromStr for Visibility {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            _ => Err(DomainError::InvalidVisibility(s.to_string())),
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The positional label given to a set created implicitly.
#[must_use]
pub fn default_set_name(set_index: usize) -> String {
    format!("Set {}", set_index + 1)
}

/// One song slot within a set.
///
/// `order` is managed by the ordering engine: within a set the orders are
/// always the contiguous range `1..=N` following positional order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSongEntry {
    /// The referenced song.
    pub song_id: SongId,
    pub(crate) order: u32,
    /// Duration override in seconds. `None` counts as zero.
    pub duration_seconds: Option<u32>,
    /// Free-text performance notes.
    pub notes: String,
    /// Whether the song was played at the performance.
    pub played: bool,
}

impl SetSongEntry {
    /// Rebuilds an entry from stored parts.
    ///
    /// The stored order is only used to sort entries when the set is
    /// restored; it is renumbered afterwards.
    #[must_use]
    pub const fn restore(
        song_id: SongId,
        order: u32,
        duration_seconds: Option<u32>,
        notes: String,
        played: bool,
    ) -> Self {
        Self {
            song_id,
            order,
            duration_seconds,
            notes,
            played,
        }
    }

    /// The 1-based position of this entry within its set.
    #[must_use]
    pub const fn order(&self) -> u32 {
        self.order
    }
}

/// A performance set, owned by its setlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Set {
    /// Display name.
    pub name: String,
    pub(crate) duration_seconds: u64,
    pub(crate) songs: Vec<SetSongEntry>,
}

impl Set {
    /// Creates an empty set.
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self {
            name,
            duration_seconds: 0,
            songs: Vec::new(),
        }
    }

    /// Rebuilds a set from stored entries, sorting by stored order and
    /// renumbering so orders are contiguous.
    #[must_use]
    pub fn restore(name: String, mut songs: Vec<SetSongEntry>) -> Self {
        songs.sort_by_key(|entry| entry.order);
        let mut set: Self = Self {
            name,
            duration_seconds: 0,
            songs,
        };
        crate::ordering::renumber(&mut set);
        set
    }

    /// The entries in performance order.
    #[must_use]
    pub fn songs(&self) -> &[SetSongEntry] {
        &self.songs
    }

    /// Derived total of the entries' durations, as of the last recompute.
    #[must_use]
    pub const fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }
}

/// The fields an owner may edit directly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SetlistDetails {
    /// Title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Date of the performance, if scheduled.
    pub performance_date: Option<Date>,
    /// Venue name.
    pub venue: String,
    /// Visibility flag.
    pub visibility: Visibility,
}

/// The subset of a setlist the access evaluator needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessScope {
    /// The owning actor id.
    pub owner_id: String,
    /// The owning band, if any.
    pub band_id: Option<BandId>,
    /// The visibility flag.
    pub visibility: Visibility,
}

/// All stored parts of a setlist, used to restore it from persistence.
#[derive(Debug, Clone)]
pub struct SetlistParts {
    /// Identity.
    pub id: SetlistId,
    /// Editable fields.
    pub details: SetlistDetails,
    /// Owning actor id.
    pub owner_id: String,
    /// Owning band.
    pub band_id: Option<BandId>,
    /// Stored version.
    pub version: u64,
    /// Sets in performance order.
    pub sets: Vec<Set>,
    /// Version history.
    pub history: VersionHistory,
    /// Creation time.
    pub created_at: OffsetDateTime,
    /// Last commit time.
    pub updated_at: OffsetDateTime,
}

/// The setlist document: root aggregate of sets, entries and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setlist {
    id: SetlistId,
    /// Editable fields.
    pub details: SetlistDetails,
    owner_id: String,
    band_id: Option<BandId>,
    version: u64,
    pub(crate) total_duration_seconds: u64,
    pub(crate) sets: Vec<Set>,
    history: VersionHistory,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl Setlist {
    /// Creates a new setlist at version 1, owned by `owner`.
    #[must_use]
    pub fn new(
        id: SetlistId,
        details: SetlistDetails,
        owner: &Actor,
        band_id: Option<BandId>,
        timestamp: OffsetDateTime,
    ) -> Self {
        let history: VersionHistory = VersionHistory::begin(owner, timestamp);
        Self {
            id,
            details,
            owner_id: owner.id.clone(),
            band_id,
            version: history.current_version(),
            total_duration_seconds: 0,
            sets: Vec::new(),
            history,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Restores a setlist from stored parts and recomputes derived totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored version disagrees with the history.
    pub fn restore(parts: SetlistParts) -> Result<Self, DomainError> {
        let history_version: u64 = parts.history.current_version();
        if parts.version != history_version {
            return Err(DomainError::VersionMismatch {
                version: parts.version,
                history_version,
            });
        }
        let mut setlist: Self = Self {
            id: parts.id,
            details: parts.details,
            owner_id: parts.owner_id,
            band_id: parts.band_id,
            version: parts.version,
            total_duration_seconds: 0,
            sets: parts.sets,
            history: parts.history,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
        };
        setlist.recompute_durations();
        Ok(setlist)
    }

    /// The setlist identifier.
    #[must_use]
    pub const fn id(&self) -> &SetlistId {
        &self.id
    }

    /// The owning actor id.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// The owning band, if any.
    #[must_use]
    pub const fn band_id(&self) -> Option<&BandId> {
        self.band_id.as_ref()
    }

    /// The current version. Always equals the last history record's version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Derived total duration in seconds, as of the last recompute.
    #[must_use]
    pub const fn total_duration_seconds(&self) -> u64 {
        self.total_duration_seconds
    }

    /// The sets in performance order.
    #[must_use]
    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    /// The version history.
    #[must_use]
    pub const fn history(&self) -> &VersionHistory {
        &self.history
    }

    /// Creation time.
    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Time of the last committed change.
    #[must_use]
    pub const fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    /// The snapshot used for access decisions.
    #[must_use]
    pub fn access_scope(&self) -> AccessScope {
        AccessScope {
            owner_id: self.owner_id.clone(),
            band_id: self.band_id.clone(),
            visibility: self.details.visibility,
        }
    }

    /// Appends a version record and advances the version in lockstep.
    ///
    /// This is the only way the version changes, so `version()` always
    /// equals the last record's version.
    pub fn record_version(
        &mut self,
        actor: &Actor,
        timestamp: OffsetDateTime,
        action: &Action,
    ) -> VersionRecord {
        let record: VersionRecord = self.history.append(actor, timestamp, action).clone();
        self.version = record.version();
        self.updated_at = timestamp;
        record
    }
}
