// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use gigbook_audit::VersionRecord;
use gigbook_domain::{Set, SetSongEntry, Setlist, format_duration, format_performance_date};
use gigbook_persistence::SetlistSummary;
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// Distinguishes an absent field from an explicit `null`.
///
/// Absent stays `None` via `#[serde(default)]`; `null` becomes `Some(None)`.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// API request to create a new setlist.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CreateSetlistRequest {
    /// Title. Required.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Performance date (`YYYY-MM-DD`).
    #[serde(default)]
    pub performance_date: Option<String>,
    /// Venue name.
    #[serde(default)]
    pub venue: String,
    /// `public` or `private`. Defaults to private.
    #[serde(default)]
    pub visibility: Option<String>,
    /// Owning band, for band setlists.
    #[serde(default)]
    pub band_id: Option<String>,
}

/// API request to update setlist fields. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UpdateSetlistRequest {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New performance date; `null` clears it.
    #[serde(default, deserialize_with = "explicit_null")]
    pub performance_date: Option<Option<String>>,
    /// New venue.
    #[serde(default)]
    pub venue: Option<String>,
    /// New visibility.
    #[serde(default)]
    pub visibility: Option<String>,
}

/// API request to append a song to a set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddSongRequest {
    /// Target set. Equal to the set count to start a new set.
    pub set_index: usize,
    /// The catalog song.
    pub song_id: String,
    /// Duration override; defaults to the song's own duration.
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    /// Performance notes.
    #[serde(default)]
    pub notes: String,
}

/// API request to move a song within or across sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MoveSongRequest {
    /// Source set.
    pub from_set_index: usize,
    /// Index of the entry within the source set.
    pub from_song_index: usize,
    /// Destination set.
    pub to_set_index: usize,
    /// Destination position; clamped to the set length.
    pub to_position: usize,
}

/// API request to edit one entry in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UpdateEntryRequest {
    /// New duration override; `null` clears it.
    #[serde(default, deserialize_with = "explicit_null")]
    pub duration_seconds: Option<Option<u32>>,
    /// New notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// New played flag.
    #[serde(default)]
    pub played: Option<bool>,
}

/// API request to rename a set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenameSetRequest {
    /// The new display name.
    pub name: String,
}

/// API request for a page of version history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct HistoryRequest {
    /// Records to skip.
    #[serde(default)]
    pub offset: usize,
    /// Maximum records to return.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// API request to list or search setlists.
///
/// At most one selector is honored, in order: `q`, `band_id`, `owner`.
/// With none, the actor's own setlists are listed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ListSetlistsRequest {
    /// Owner id, or `me`.
    #[serde(default)]
    pub owner: Option<String>,
    /// Band id.
    #[serde(default)]
    pub band_id: Option<String>,
    /// Search text over title, venue and description.
    #[serde(default)]
    pub q: Option<String>,
}

/// What the requesting actor may do with a setlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetlistCapabilities {
    /// Whether the actor may read the setlist.
    pub can_read: bool,
    /// Whether the actor may edit its fields and songs.
    pub can_edit: bool,
}

/// One song entry in the read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEntryInfo {
    /// The referenced song.
    pub song_id: String,
    /// 1-based order within the set.
    pub order: u32,
    /// Duration override, if any.
    pub duration_seconds: Option<u32>,
    /// Formatted duration; absent durations count as zero.
    pub duration: String,
    /// Performance notes.
    pub notes: String,
    /// Whether the song was played.
    pub played: bool,
}

impl SetEntryInfo {
    fn from_entry(entry: &SetSongEntry) -> Self {
        Self {
            song_id: entry.song_id.to_string(),
            order: entry.order(),
            duration_seconds: entry.duration_seconds,
            duration: format_duration(u64::from(entry.duration_seconds.unwrap_or(0))),
            notes: entry.notes.clone(),
            played: entry.played,
        }
    }
}

/// One set in the read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetInfo {
    /// Position of the set.
    pub index: usize,
    /// Display name.
    pub name: String,
    /// Derived total in seconds.
    pub duration_seconds: u64,
    /// Formatted total.
    pub duration: String,
    /// Entries in performance order.
    pub songs: Vec<SetEntryInfo>,
}

impl SetInfo {
    fn from_set(index: usize, set: &Set) -> Self {
        Self {
            index,
            name: set.name.clone(),
            duration_seconds: set.duration_seconds(),
            duration: format_duration(set.duration_seconds()),
            songs: set.songs().iter().map(SetEntryInfo::from_entry).collect(),
        }
    }
}

/// The setlist read model: current document with derived totals and version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetlistResponse {
    /// The setlist identifier.
    pub setlist_id: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Performance date (`YYYY-MM-DD`).
    pub performance_date: Option<String>,
    /// Venue.
    pub venue: String,
    /// `public` or `private`.
    pub visibility: String,
    /// Owning actor.
    pub owner_id: String,
    /// Owning band.
    pub band_id: Option<String>,
    /// Current version.
    pub version: u64,
    /// Derived total in seconds.
    pub total_duration_seconds: u64,
    /// Formatted total.
    pub total_duration: String,
    /// Sets in performance order.
    pub sets: Vec<SetInfo>,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Time of the last committed change.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl SetlistResponse {
    /// Builds the read model of a setlist.
    #[must_use]
    pub fn from_setlist(setlist: &Setlist) -> Self {
        Self {
            setlist_id: setlist.id().to_string(),
            title: setlist.details.title.clone(),
            description: setlist.details.description.clone(),
            performance_date: setlist.details.performance_date.map(format_performance_date),
            venue: setlist.details.venue.clone(),
            visibility: setlist.details.visibility.to_string(),
            owner_id: setlist.owner_id().to_string(),
            band_id: setlist.band_id().map(ToString::to_string),
            version: setlist.version(),
            total_duration_seconds: setlist.total_duration_seconds(),
            total_duration: format_duration(setlist.total_duration_seconds()),
            sets: setlist
                .sets()
                .iter()
                .enumerate()
                .map(|(index, set)| SetInfo::from_set(index, set))
                .collect(),
            created_at: setlist.created_at(),
            updated_at: setlist.updated_at(),
        }
    }
}

/// API response for reading a setlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetlistView {
    /// The document.
    pub setlist: SetlistResponse,
    /// What the requesting actor may do with it.
    pub capabilities: SetlistCapabilities,
}

/// API response for a committed mutation.
///
/// The same value is fanned out to other live sessions as the event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    /// The setlist that changed.
    pub setlist_id: String,
    /// The version this mutation produced.
    pub version: u64,
    /// Author of the change.
    pub changed_by: String,
    /// Action name.
    pub action: String,
    /// Human-readable change description.
    pub description: String,
    /// The updated document.
    pub setlist: SetlistResponse,
}

/// One version record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecordInfo {
    /// Version produced by the change.
    pub version: u64,
    /// Author of the change.
    pub changed_by: String,
    /// Action name.
    pub action: String,
    /// Change description.
    pub description: String,
    /// Commit time.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl VersionRecordInfo {
    /// Converts a history record.
    #[must_use]
    pub fn from_record(record: &VersionRecord) -> Self {
        Self {
            version: record.version(),
            changed_by: record.changed_by().to_string(),
            action: record.action().to_string(),
            description: record.description().to_string(),
            timestamp: record.timestamp(),
        }
    }
}

/// API response for a page of version history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// The setlist.
    pub setlist_id: String,
    /// The setlist's current version.
    pub current_version: u64,
    /// Total number of records.
    pub total: usize,
    /// Records skipped.
    pub offset: usize,
    /// Records in append order.
    pub records: Vec<VersionRecordInfo>,
}

/// One entry in a setlist listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetlistSummaryInfo {
    /// The setlist identifier.
    pub setlist_id: String,
    /// Title.
    pub title: String,
    /// Venue.
    pub venue: String,
    /// Performance date (`YYYY-MM-DD`).
    pub performance_date: Option<String>,
    /// `public` or `private`.
    pub visibility: String,
    /// Owning actor.
    pub owner_id: String,
    /// Owning band.
    pub band_id: Option<String>,
    /// Current version.
    pub version: u64,
    /// Derived total in seconds.
    pub total_duration_seconds: u64,
    /// Formatted total.
    pub total_duration: String,
    /// Time of the last committed change.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl SetlistSummaryInfo {
    /// Converts a stored summary.
    #[must_use]
    pub fn from_summary(summary: &SetlistSummary) -> Self {
        Self {
            setlist_id: summary.id.to_string(),
            title: summary.title.clone(),
            venue: summary.venue.clone(),
            performance_date: summary.performance_date.map(format_performance_date),
            visibility: summary.scope.visibility.to_string(),
            owner_id: summary.scope.owner_id.clone(),
            band_id: summary.scope.band_id.as_ref().map(ToString::to_string),
            version: summary.version,
            total_duration_seconds: summary.total_duration_seconds,
            total_duration: format_duration(summary.total_duration_seconds),
            updated_at: summary.updated_at,
        }
    }
}

/// API response for a setlist listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSetlistsResponse {
    /// The readable setlists, most recently changed first.
    pub setlists: Vec<SetlistSummaryInfo>,
}
