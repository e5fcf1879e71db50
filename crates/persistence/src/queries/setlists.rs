// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Setlist queries.
//!
//! A setlist is restored from its row plus its full version history, so the
//! version/history lockstep is checked on every load.

use std::str::FromStr;

use diesel::SqliteConnection;
use diesel::prelude::*;
use gigbook_audit::{VersionHistory, VersionRecord};
use gigbook_domain::{
    AccessScope, BandId, Setlist, SetlistDetails, SetlistId, SetlistParts, Visibility,
    parse_performance_date,
};
use num_traits::ToPrimitive;
use tracing::debug;

use crate::data_models::{SetlistSummary, decode_sets, parse_timestamp, total_duration};
use crate::diesel_schema::{setlist_versions, setlists};
use crate::error::PersistenceError;

/// Diesel Queryable struct for setlist rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = setlists)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct SetlistRow {
    setlist_id: String,
    title: String,
    description: String,
    performance_date: Option<String>,
    venue: String,
    visibility: String,
    owner_id: String,
    band_id: Option<String>,
    version: i64,
    sets_json: String,
    created_at: String,
    updated_at: String,
}

/// Diesel Queryable struct for version record rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = setlist_versions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct VersionRow {
    version: i64,
    changed_by: String,
    action: String,
    description: String,
    created_at: String,
}

fn to_version(value: i64) -> Result<u64, PersistenceError> {
    value
        .to_u64()
        .ok_or_else(|| PersistenceError::CorruptRecord(format!("Negative version {value}")))
}

fn parse_visibility(value: &str) -> Result<Visibility, PersistenceError> {
    Visibility::from_str(value).map_err(|e| PersistenceError::CorruptRecord(e.to_string()))
}

fn parse_date(value: Option<&str>) -> Result<Option<time::Date>, PersistenceError> {
    value
        .map(parse_performance_date)
        .transpose()
        .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))
}

impl VersionRow {
    fn into_record(self) -> Result<VersionRecord, PersistenceError> {
        Ok(VersionRecord::from_parts(
            to_version(self.version)?,
            self.changed_by,
            parse_timestamp(&self.created_at)?,
            self.action,
            self.description,
        ))
    }
}

impl SetlistRow {
    fn scope(&self) -> Result<AccessScope, PersistenceError> {
        Ok(AccessScope {
            owner_id: self.owner_id.clone(),
            band_id: self.band_id.as_deref().map(BandId::new),
            visibility: parse_visibility(&self.visibility)?,
        })
    }

    fn into_summary(self) -> Result<SetlistSummary, PersistenceError> {
        Ok(SetlistSummary {
            scope: self.scope()?,
            id: SetlistId::new(&self.setlist_id),
            performance_date: parse_date(self.performance_date.as_deref())?,
            version: to_version(self.version)?,
            total_duration_seconds: total_duration(&self.sets_json)?,
            updated_at: parse_timestamp(&self.updated_at)?,
            title: self.title,
            venue: self.venue,
        })
    }

    fn into_setlist(self, records: Vec<VersionRecord>) -> Result<Setlist, PersistenceError> {
        let history: VersionHistory = VersionHistory::from_records(records)
            .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))?;
        let parts: SetlistParts = SetlistParts {
            id: SetlistId::new(&self.setlist_id),
            details: SetlistDetails {
                title: self.title,
                description: self.description,
                performance_date: parse_date(self.performance_date.as_deref())?,
                venue: self.venue,
                visibility: parse_visibility(&self.visibility)?,
            },
            owner_id: self.owner_id,
            band_id: self.band_id.as_deref().map(BandId::new),
            version: to_version(self.version)?,
            sets: decode_sets(&self.sets_json)?,
            history,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        };
        Setlist::restore(parts).map_err(|e| PersistenceError::CorruptRecord(e.to_string()))
    }
}

fn summaries(rows: Vec<SetlistRow>) -> Result<Vec<SetlistSummary>, PersistenceError> {
    rows.into_iter().map(SetlistRow::into_summary).collect()
}

/// Loads a setlist with its complete version history.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `setlist_id` - The setlist to load
///
/// # Errors
///
/// Returns an error if the query fails or the stored data is inconsistent.
/// Returns `Ok(None)` if the setlist does not exist.
pub fn get_setlist(
    conn: &mut SqliteConnection,
    setlist_id: &SetlistId,
) -> Result<Option<Setlist>, PersistenceError> {
    debug!(setlist_id = %setlist_id, "Loading setlist");

    let row: Option<SetlistRow> = setlists::table
        .filter(setlists::setlist_id.eq(setlist_id.as_str()))
        .select(SetlistRow::as_select())
        .first(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };

    let records: Vec<VersionRecord> = setlist_versions::table
        .filter(setlist_versions::setlist_id.eq(setlist_id.as_str()))
        .order(setlist_versions::version.asc())
        .select(VersionRow::as_select())
        .load(conn)?
        .into_iter()
        .map(VersionRow::into_record)
        .collect::<Result<_, _>>()?;

    row.into_setlist(records).map(Some)
}

/// Returns the stored version of a setlist, if it exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_current_version(
    conn: &mut SqliteConnection,
    setlist_id: &str,
) -> Result<Option<u64>, PersistenceError> {
    setlists::table
        .filter(setlists::setlist_id.eq(setlist_id))
        .select(setlists::version)
        .first::<i64>(conn)
        .optional()?
        .map(to_version)
        .transpose()
}

/// Lists setlists owned by an actor, most recently updated first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_setlists_by_owner(
    conn: &mut SqliteConnection,
    owner_id: &str,
) -> Result<Vec<SetlistSummary>, PersistenceError> {
    let rows: Vec<SetlistRow> = setlists::table
        .filter(setlists::owner_id.eq(owner_id))
        .order(setlists::updated_at.desc())
        .select(SetlistRow::as_select())
        .load(conn)?;
    summaries(rows)
}

/// Lists setlists belonging to a band, most recently updated first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_setlists_by_band(
    conn: &mut SqliteConnection,
    band_id: &BandId,
) -> Result<Vec<SetlistSummary>, PersistenceError> {
    let rows: Vec<SetlistRow> = setlists::table
        .filter(setlists::band_id.eq(band_id.as_str()))
        .order(setlists::updated_at.desc())
        .select(SetlistRow::as_select())
        .load(conn)?;
    summaries(rows)
}

/// Escapes `LIKE` wildcards so the term matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped: String = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Case-insensitive text search over title, venue and description.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `term` - The search text; matched as a substring
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn search_setlists(
    conn: &mut SqliteConnection,
    term: &str,
) -> Result<Vec<SetlistSummary>, PersistenceError> {
    let pattern: String = like_pattern(term.trim());
    debug!(pattern = %pattern, "Searching setlists");

    let rows: Vec<SetlistRow> = setlists::table
        .filter(
            setlists::title
                .like(pattern.as_str())
                .escape('\\')
                .or(setlists::venue.like(pattern.as_str()).escape('\\'))
                .or(setlists::description.like(pattern.as_str()).escape('\\')),
        )
        .order(setlists::updated_at.desc())
        .select(SetlistRow::as_select())
        .load(conn)?;
    summaries(rows)
}
