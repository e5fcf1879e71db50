// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the gigbook setlist engine.
//!
//! This crate stores setlist documents, their version history, and the band
//! and song documents the engine consults. It is built on Diesel over
//! `SQLite`.
//!
//! ## Atomicity
//!
//! A setlist's structure and its version history are committed together in
//! one transaction, guarded by a compare-and-swap on the stored version. Two
//! writers that computed a transition from the same version cannot both
//! succeed: the second receives [`PersistenceError::VersionConflict`] and
//! nothing is written.
//!
//! ## Testing
//!
//! Every call to [`Persistence::new_in_memory`] receives its own shared-cache
//! in-memory database, so tests are isolated without touching the
//! filesystem.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use backend::sqlite::Storage;
use diesel::SqliteConnection;
use gigbook::TransitionResult;
use gigbook_domain::{Band, BandId, Setlist, SetlistId, Song, SongId};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::SetlistSummary;
pub use error::PersistenceError;

/// Persistence adapter for setlists, bands and songs.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let name: String = format!("memdb_gigbook_{db_id}");
        let conn: SqliteConnection = backend::sqlite::open(&Storage::Memory(&name))?;
        Ok(Self { conn })
    }

    /// Opens (or creates) a file-based `SQLite` database in WAL mode.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let conn: SqliteConnection = backend::sqlite::open(&Storage::File(path.as_ref()))?;
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Setlists
    // ========================================================================

    /// Stores a newly created setlist and its creation record.
    ///
    /// # Errors
    ///
    /// Returns an error if the setlist already exists or the write fails.
    pub fn create_setlist(&mut self, setlist: &Setlist) -> Result<(), PersistenceError> {
        mutations::setlists::insert_setlist(&mut self.conn, setlist)
    }

    /// Persists a committed transition with compare-and-swap on the version.
    ///
    /// # Errors
    ///
    /// Returns `VersionConflict` if the stored version moved on since the
    /// transition was computed, `SetlistNotFound` if the setlist is gone.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<(), PersistenceError> {
        mutations::setlists::persist_transition(&mut self.conn, result)
    }

    /// Loads a setlist with its full version history.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or stored data is inconsistent.
    /// Returns `Ok(None)` if the setlist does not exist.
    pub fn get_setlist(
        &mut self,
        setlist_id: &SetlistId,
    ) -> Result<Option<Setlist>, PersistenceError> {
        queries::setlists::get_setlist(&mut self.conn, setlist_id)
    }

    /// Lists setlists owned by an actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_setlists_by_owner(
        &mut self,
        owner_id: &str,
    ) -> Result<Vec<SetlistSummary>, PersistenceError> {
        queries::setlists::list_setlists_by_owner(&mut self.conn, owner_id)
    }

    /// Lists setlists belonging to a band.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_setlists_by_band(
        &mut self,
        band_id: &BandId,
    ) -> Result<Vec<SetlistSummary>, PersistenceError> {
        queries::setlists::list_setlists_by_band(&mut self.conn, band_id)
    }

    /// Searches titles, venues and descriptions.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn search_setlists(&mut self, term: &str) -> Result<Vec<SetlistSummary>, PersistenceError> {
        queries::setlists::search_setlists(&mut self.conn, term)
    }

    // ========================================================================
    // Bands & Songs
    // ========================================================================

    /// Inserts a band or replaces its name and members.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_band(&mut self, band: &Band) -> Result<(), PersistenceError> {
        mutations::catalog::upsert_band(&mut self.conn, band)
    }

    /// Retrieves a band with its members.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_band(&mut self, band_id: &BandId) -> Result<Option<Band>, PersistenceError> {
        queries::catalog::get_band(&mut self.conn, band_id)
    }

    /// Adds a song to the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the song already exists or the write fails.
    pub fn insert_song(&mut self, song: &Song) -> Result<(), PersistenceError> {
        mutations::catalog::insert_song(&mut self.conn, song)
    }

    /// Retrieves a song from the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_song(&mut self, song_id: &SongId) -> Result<Option<Song>, PersistenceError> {
        queries::catalog::get_song(&mut self.conn, song_id)
    }
}
