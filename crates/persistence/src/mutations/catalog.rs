// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Band and song mutations.
//!
//! These documents belong to the surrounding application; the engine only
//! needs them to exist so access checks and default durations can be
//! resolved.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gigbook_domain::{Band, Permission, Song};
use num_traits::ToPrimitive;
use tracing::info;

use crate::diesel_schema::{band_members, bands, songs};
use crate::error::PersistenceError;

/// Inserts a band or replaces its name and full member list.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_band(conn: &mut SqliteConnection, band: &Band) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(bands::table)
            .values((
                bands::band_id.eq(band.id.as_str()),
                bands::name.eq(&band.name),
            ))
            .on_conflict(bands::band_id)
            .do_update()
            .set(bands::name.eq(&band.name))
            .execute(conn)?;

        diesel::delete(band_members::table.filter(band_members::band_id.eq(band.id.as_str())))
            .execute(conn)?;

        for member in &band.members {
            let permissions: Vec<&str> = member
                .permissions
                .iter()
                .map(Permission::as_str)
                .collect();
            diesel::insert_into(band_members::table)
                .values((
                    band_members::band_id.eq(band.id.as_str()),
                    band_members::actor_id.eq(&member.actor_id),
                    band_members::role.eq(member.role.as_str()),
                    band_members::permissions_json.eq(serde_json::to_string(&permissions)?),
                ))
                .execute(conn)?;
        }
        Ok(())
    })?;

    info!(band_id = %band.id, members = band.members.len(), "Upserted band");
    Ok(())
}

/// Adds a song to the catalog.
///
/// # Errors
///
/// Returns an error if the song already exists or the insert fails.
pub fn insert_song(conn: &mut SqliteConnection, song: &Song) -> Result<(), PersistenceError> {
    let duration_seconds: Option<i32> = song
        .duration_seconds
        .map(|seconds| {
            seconds.to_i32().ok_or_else(|| {
                PersistenceError::Other(format!("Song duration {seconds} exceeds storage range"))
            })
        })
        .transpose()?;

    diesel::insert_into(songs::table)
        .values((
            songs::song_id.eq(song.id.as_str()),
            songs::title.eq(&song.title),
            songs::artist.eq(&song.artist),
            songs::duration_seconds.eq(duration_seconds),
        ))
        .execute(conn)?;

    info!(song_id = %song.id, "Inserted song");
    Ok(())
}
