// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gigbook_domain::{AccessScope, Set, SetSongEntry, SetlistId, SongId, aggregate_durations};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use crate::error::PersistenceError;

/// Serializable representation of a song entry within a stored set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetEntryData {
    pub song_id: String,
    pub order: u32,
    pub duration_seconds: Option<u32>,
    pub notes: String,
    pub played: bool,
}

/// Serializable representation of a stored set.
///
/// Derived durations are not stored; they are recomputed on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetData {
    pub name: String,
    pub songs: Vec<SetEntryData>,
}

/// Lightweight listing entry for setlist queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetlistSummary {
    /// The setlist identifier.
    pub id: SetlistId,
    /// Title.
    pub title: String,
    /// Venue name.
    pub venue: String,
    /// Date of the performance.
    pub performance_date: Option<Date>,
    /// Owner, band and visibility, for Read filtering.
    pub scope: AccessScope,
    /// Current version.
    pub version: u64,
    /// Derived total duration.
    pub total_duration_seconds: u64,
    /// Time of the last committed change.
    pub updated_at: OffsetDateTime,
}

/// Encodes sets for the `sets_json` column.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_sets(sets: &[Set]) -> Result<String, PersistenceError> {
    let data: Vec<SetData> = sets
        .iter()
        .map(|set| SetData {
            name: set.name.clone(),
            songs: set
                .songs()
                .iter()
                .map(|entry| SetEntryData {
                    song_id: entry.song_id.to_string(),
                    order: entry.order(),
                    duration_seconds: entry.duration_seconds,
                    notes: entry.notes.clone(),
                    played: entry.played,
                })
                .collect(),
        })
        .collect();
    Ok(serde_json::to_string(&data)?)
}

/// Decodes the `sets_json` column. Orders are renumbered on restore.
///
/// # Errors
///
/// Returns an error if the JSON is malformed.
pub fn decode_sets(sets_json: &str) -> Result<Vec<Set>, PersistenceError> {
    let data: Vec<SetData> = serde_json::from_str(sets_json)?;
    Ok(data
        .into_iter()
        .map(|set| {
            let songs: Vec<SetSongEntry> = set
                .songs
                .into_iter()
                .map(|entry| {
                    SetSongEntry::restore(
                        SongId::new(&entry.song_id),
                        entry.order,
                        entry.duration_seconds,
                        entry.notes,
                        entry.played,
                    )
                })
                .collect();
            Set::restore(set.name, songs)
        })
        .collect())
}

/// Sums the stored durations without restoring the full setlist.
///
/// # Errors
///
/// Returns an error if the JSON is malformed.
pub fn total_duration(sets_json: &str) -> Result<u64, PersistenceError> {
    Ok(aggregate_durations(&decode_sets(sets_json)?).total_seconds)
}

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented as RFC 3339.
pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(timestamp.format(&Rfc3339)?)
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns an error if the stored value is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    Ok(OffsetDateTime::parse(value, &Rfc3339)?)
}
