// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use gigbook_domain::{
    AccessScope, Band, BandId, BandMember, BandRole, Permission, Song, SongId, Visibility,
};
use gigbook_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{AuthenticatedActor, BandDirectory, CreateSetlistRequest, LookupError};

/// Band directory backed by a fixed map. Counts lookups.
#[derive(Default)]
pub struct StaticBandDirectory {
    bands: HashMap<BandId, Band>,
    lookups: AtomicUsize,
}

impl StaticBandDirectory {
    pub fn with_band(mut self, band: Band) -> Self {
        self.bands.insert(band.id.clone(), band);
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl BandDirectory for StaticBandDirectory {
    fn find_band(
        &self,
        band_id: &BandId,
    ) -> impl Future<Output = Result<Option<Band>, LookupError>> + Send {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let band: Option<Band> = self.bands.get(band_id).cloned();
        async move { Ok(band) }
    }
}

/// Band directory whose collaborator is always down.
pub struct UnreachableBandDirectory;

impl BandDirectory for UnreachableBandDirectory {
    fn find_band(
        &self,
        _band_id: &BandId,
    ) -> impl Future<Output = Result<Option<Band>, LookupError>> + Send {
        async { Err(LookupError::new("connection refused")) }
    }
}

pub fn owner() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("owner-1"))
}

pub fn stranger() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("stranger-9"))
}

pub fn test_time() -> OffsetDateTime {
    datetime!(2026-07-04 20:00 UTC)
}

pub fn band_id() -> BandId {
    BandId::new("band-1")
}

/// A band led by `leader-1`, with the given extra members.
pub fn band_with(members: impl IntoIterator<Item = BandMember>) -> Band {
    let mut band: Band = Band::new(band_id(), "The Regulars");
    band.upsert_member(BandMember::new("leader-1", BandRole::Leader, []));
    for member in members {
        band.upsert_member(member);
    }
    band
}

pub fn member(actor_id: &str, permissions: impl IntoIterator<Item = Permission>) -> BandMember {
    BandMember::new(actor_id, BandRole::Member, permissions)
}

pub fn band_scope(visibility: Visibility) -> AccessScope {
    AccessScope {
        owner_id: String::from("owner-1"),
        band_id: Some(band_id()),
        visibility,
    }
}

pub fn personal_scope(visibility: Visibility) -> AccessScope {
    AccessScope {
        owner_id: String::from("owner-1"),
        band_id: None,
        visibility,
    }
}

/// In-memory persistence with a small song catalog.
pub fn setup_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    for (id, title, seconds) in [
        ("song-a", "Whiskey in the Jar", Some(180)),
        ("song-b", "Galway Girl", Some(200)),
        ("song-c", "Wild Rover", Some(150)),
        ("song-x", "Untimed Jam", None),
    ] {
        persistence
            .insert_song(&Song::new(SongId::new(id), title, "Trad.", seconds))
            .unwrap();
    }
    persistence
}

pub fn create_request(title: &str) -> CreateSetlistRequest {
    CreateSetlistRequest {
        title: title.to_string(),
        venue: String::from("The Crown"),
        ..CreateSetlistRequest::default()
    }
}
