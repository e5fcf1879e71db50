// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Band and song queries.

use std::collections::BTreeSet;
use std::str::FromStr;

use diesel::SqliteConnection;
use diesel::prelude::*;
use gigbook_domain::{Band, BandId, BandMember, BandRole, Permission, Song, SongId};
use num_traits::ToPrimitive;
use tracing::debug;

use crate::diesel_schema::{band_members, bands, songs};
use crate::error::PersistenceError;

/// Diesel Queryable struct for band member rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = band_members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct BandMemberRow {
    actor_id: String,
    role: String,
    permissions_json: String,
}

/// Diesel Queryable struct for song rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = songs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct SongRow {
    song_id: String,
    title: String,
    artist: String,
    duration_seconds: Option<i32>,
}

impl BandMemberRow {
    fn into_member(self) -> Result<BandMember, PersistenceError> {
        let role: BandRole = BandRole::from_str(&self.role)
            .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))?;
        let names: Vec<String> = serde_json::from_str(&self.permissions_json)?;
        let permissions: BTreeSet<Permission> = names
            .iter()
            .map(String::as_str)
            .map(Permission::from_str)
            .collect::<Result<_, _>>()
            .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))?;
        Ok(BandMember {
            actor_id: self.actor_id,
            role,
            permissions,
        })
    }
}

/// Retrieves a band with its members.
///
/// # Errors
///
/// Returns an error if the query fails or a member row is malformed.
/// Returns `Ok(None)` if the band does not exist.
pub fn get_band(
    conn: &mut SqliteConnection,
    band_id: &BandId,
) -> Result<Option<Band>, PersistenceError> {
    debug!(band_id = %band_id, "Looking up band");

    let name: Option<String> = bands::table
        .filter(bands::band_id.eq(band_id.as_str()))
        .select(bands::name)
        .first(conn)
        .optional()?;

    let Some(name) = name else {
        return Ok(None);
    };

    let rows: Vec<BandMemberRow> = band_members::table
        .filter(band_members::band_id.eq(band_id.as_str()))
        .order(band_members::actor_id.asc())
        .select(BandMemberRow::as_select())
        .load(conn)?;

    let mut band: Band = Band::new(band_id.clone(), &name);
    for row in rows {
        band.upsert_member(row.into_member()?);
    }
    Ok(Some(band))
}

/// Retrieves a song from the catalog.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the song does not exist.
pub fn get_song(
    conn: &mut SqliteConnection,
    song_id: &SongId,
) -> Result<Option<Song>, PersistenceError> {
    let row: Option<SongRow> = songs::table
        .filter(songs::song_id.eq(song_id.as_str()))
        .select(SongRow::as_select())
        .first(conn)
        .optional()?;

    row.map(|row| {
        let duration_seconds: Option<u32> = row
            .duration_seconds
            .map(|seconds| {
                seconds.to_u32().ok_or_else(|| {
                    PersistenceError::CorruptRecord(format!("Negative song duration {seconds}"))
                })
            })
            .transpose()?;
        Ok(Song::new(
            SongId::new(&row.song_id),
            &row.title,
            &row.artist,
            duration_seconds,
        ))
    })
    .transpose()
}
