// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gigbook_audit::Actor;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{SetSongEntry, Setlist, SetlistDetails, SetlistId, SongId, Visibility};

pub fn test_time() -> OffsetDateTime {
    datetime!(2026-05-01 19:30 UTC)
}

pub fn test_owner() -> Actor {
    Actor::new("owner-1")
}

pub fn empty_setlist() -> Setlist {
    Setlist::new(
        SetlistId::new("setlist-1"),
        SetlistDetails {
            title: String::from("Friday at the Crown"),
            description: String::new(),
            performance_date: None,
            venue: String::from("The Crown"),
            visibility: Visibility::Private,
        },
        &test_owner(),
        None,
        test_time(),
    )
}

/// Set0 = [song-a 180, song-b 200], Set1 = [song-c 150].
pub fn two_set_setlist() -> Setlist {
    let mut setlist: Setlist = empty_setlist();
    setlist
        .add_song(0, SongId::new("song-a"), Some(180), String::new())
        .unwrap();
    setlist
        .add_song(0, SongId::new("song-b"), Some(200), String::new())
        .unwrap();
    setlist
        .add_song(1, SongId::new("song-c"), Some(150), String::new())
        .unwrap();
    setlist.recompute_durations();
    setlist
}

pub fn song_ids(setlist: &Setlist, set_index: usize) -> Vec<&str> {
    setlist.sets()[set_index]
        .songs()
        .iter()
        .map(|entry| entry.song_id.as_str())
        .collect()
}

pub fn orders(setlist: &Setlist, set_index: usize) -> Vec<u32> {
    setlist.sets()[set_index]
        .songs()
        .iter()
        .map(SetSongEntry::order)
        .collect()
}

pub fn assert_orders_contiguous(setlist: &Setlist) {
    for (set_index, set) in setlist.sets().iter().enumerate() {
        let expected: Vec<u32> = (1..=u32::try_from(set.songs().len()).unwrap()).collect();
        assert_eq!(
            orders(setlist, set_index),
            expected,
            "set {set_index} orders are not contiguous"
        );
    }
}
