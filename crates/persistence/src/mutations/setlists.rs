// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Setlist mutations.
//!
//! The structural update of a setlist and the version record it produced are
//! always written in one transaction. A transition is only applied while the
//! stored version still equals the version it was computed from.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gigbook::TransitionResult;
use gigbook_audit::VersionRecord;
use gigbook_domain::{BandId, Setlist, format_performance_date};
use num_traits::ToPrimitive;
use tracing::{debug, info, warn};

use crate::data_models::{encode_sets, format_timestamp};
use crate::diesel_schema::{setlist_versions, setlists};
use crate::error::PersistenceError;
use crate::queries::setlists::get_current_version;

fn to_column(version: u64) -> Result<i64, PersistenceError> {
    version
        .to_i64()
        .ok_or_else(|| PersistenceError::Other(format!("Version {version} exceeds storage range")))
}

fn insert_record(
    conn: &mut SqliteConnection,
    setlist_id: &str,
    record: &VersionRecord,
) -> Result<(), PersistenceError> {
    diesel::insert_into(setlist_versions::table)
        .values((
            setlist_versions::setlist_id.eq(setlist_id),
            setlist_versions::version.eq(to_column(record.version())?),
            setlist_versions::changed_by.eq(record.changed_by()),
            setlist_versions::action.eq(record.action()),
            setlist_versions::description.eq(record.description()),
            setlist_versions::created_at.eq(format_timestamp(record.timestamp())?),
        ))
        .execute(conn)?;
    Ok(())
}

/// Inserts a newly created setlist together with its history.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `setlist` - The setlist to insert, normally at version 1
///
/// # Errors
///
/// Returns an error if the setlist already exists or the insert fails.
pub fn insert_setlist(
    conn: &mut SqliteConnection,
    setlist: &Setlist,
) -> Result<(), PersistenceError> {
    let setlist_id: &str = setlist.id().as_str();
    let details = &setlist.details;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(setlists::table)
            .values((
                setlists::setlist_id.eq(setlist_id),
                setlists::title.eq(&details.title),
                setlists::description.eq(&details.description),
                setlists::performance_date
                    .eq(details.performance_date.map(format_performance_date)),
                setlists::venue.eq(&details.venue),
                setlists::visibility.eq(details.visibility.as_str()),
                setlists::owner_id.eq(setlist.owner_id()),
                setlists::band_id.eq(setlist.band_id().map(BandId::as_str)),
                setlists::version.eq(to_column(setlist.version())?),
                setlists::sets_json.eq(encode_sets(setlist.sets())?),
                setlists::created_at.eq(format_timestamp(setlist.created_at())?),
                setlists::updated_at.eq(format_timestamp(setlist.updated_at())?),
            ))
            .execute(conn)?;

        for record in setlist.history().records() {
            insert_record(conn, setlist_id, record)?;
        }
        Ok(())
    })?;

    info!(setlist_id, version = setlist.version(), "Inserted setlist");
    Ok(())
}

/// Persists a committed transition with compare-and-swap on the version.
///
/// The update only matches while the stored version equals
/// `result.previous_version`. On a mismatch nothing is written.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `result` - The transition to persist
///
/// # Errors
///
/// Returns `VersionConflict` if another commit won the race,
/// `SetlistNotFound` if the setlist no longer exists, or a database error.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<(), PersistenceError> {
    let setlist: &Setlist = &result.new_setlist;
    let setlist_id: &str = setlist.id().as_str();
    let details = &setlist.details;

    if result.record.version() != result.previous_version + 1
        || setlist.version() != result.record.version()
    {
        return Err(PersistenceError::Other(format!(
            "Transition for setlist {setlist_id} does not advance version {} by one",
            result.previous_version
        )));
    }

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let updated: usize = diesel::update(
            setlists::table
                .filter(setlists::setlist_id.eq(setlist_id))
                .filter(setlists::version.eq(to_column(result.previous_version)?)),
        )
        .set((
            setlists::title.eq(&details.title),
            setlists::description.eq(&details.description),
            setlists::performance_date.eq(details.performance_date.map(format_performance_date)),
            setlists::venue.eq(&details.venue),
            setlists::visibility.eq(details.visibility.as_str()),
            setlists::version.eq(to_column(setlist.version())?),
            setlists::sets_json.eq(encode_sets(setlist.sets())?),
            setlists::updated_at.eq(format_timestamp(setlist.updated_at())?),
        ))
        .execute(conn)?;

        if updated == 0 {
            return Err(match get_current_version(conn, setlist_id)? {
                Some(found) => PersistenceError::VersionConflict {
                    setlist_id: setlist_id.to_string(),
                    expected: result.previous_version,
                    found,
                },
                None => PersistenceError::SetlistNotFound(setlist_id.to_string()),
            });
        }

        insert_record(conn, setlist_id, &result.record)
    })
    .inspect_err(|err| {
        if matches!(err, PersistenceError::VersionConflict { .. }) {
            warn!(setlist_id, error = %err, "Rejected stale transition");
        }
    })?;

    debug!(
        setlist_id,
        version = setlist.version(),
        action = result.record.action(),
        "Persisted transition"
    );
    Ok(())
}
