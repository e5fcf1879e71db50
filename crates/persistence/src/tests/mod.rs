// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod query_tests;

use gigbook::{Command, NewSetlist, TransitionResult, apply, create_setlist};
use gigbook_audit::Actor;
use gigbook_domain::{BandId, Setlist, SongId, Visibility};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::Persistence;

pub fn create_test_actor() -> Actor {
    Actor::new("owner-1")
}

pub fn create_test_time() -> OffsetDateTime {
    datetime!(2026-08-21 18:45 UTC)
}

pub fn create_test_setlist(title: &str, band_id: Option<&str>, visibility: Visibility) -> Setlist {
    create_setlist(
        NewSetlist {
            title: title.to_string(),
            venue: String::from("Riverside Hall"),
            visibility,
            band_id: band_id.map(BandId::new),
            ..NewSetlist::default()
        },
        &create_test_actor(),
        create_test_time(),
    )
    .unwrap()
}

pub fn add_song(setlist: &Setlist, set_index: usize, id: &str, seconds: u32) -> TransitionResult {
    apply(
        setlist,
        &Command::AddSong {
            set_index,
            song_id: SongId::new(id),
            duration_seconds: Some(seconds),
            notes: String::new(),
            song_title: None,
        },
        &create_test_actor(),
        create_test_time(),
    )
    .unwrap()
}

/// Creates and stores a setlist, returning the stored copy.
pub fn store_setlist(persistence: &mut Persistence, title: &str) -> Setlist {
    let setlist: Setlist = create_test_setlist(title, None, Visibility::Private);
    persistence.create_setlist(&setlist).unwrap();
    setlist
}
