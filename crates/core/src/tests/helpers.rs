// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, NewSetlist, TransitionResult, apply, create_setlist};
use gigbook_audit::Actor;
use gigbook_domain::{Setlist, SongId};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_actor() -> Actor {
    Actor::new("owner-1")
}

pub fn create_test_time() -> OffsetDateTime {
    datetime!(2026-06-12 21:00 UTC)
}

pub fn create_test_setlist() -> Setlist {
    create_setlist(
        NewSetlist {
            title: String::from("Summer Fair"),
            venue: String::from("Village Green"),
            ..NewSetlist::default()
        },
        &create_test_actor(),
        create_test_time(),
    )
    .unwrap()
}

pub fn add_song_command(set_index: usize, id: &str, duration_seconds: u32) -> Command {
    Command::AddSong {
        set_index,
        song_id: SongId::new(id),
        duration_seconds: Some(duration_seconds),
        notes: String::new(),
        song_title: None,
    }
}

/// Applies `command` as the test actor and returns the new setlist.
pub fn step(setlist: &Setlist, command: &Command) -> Setlist {
    let result: TransitionResult =
        apply(setlist, command, &create_test_actor(), create_test_time()).unwrap();
    result.new_setlist
}

/// Set0 = [song-a 180, song-b 200], Set1 = [song-c 150], at version 4.
pub fn create_two_set_setlist() -> Setlist {
    let mut setlist: Setlist = create_test_setlist();
    setlist = step(&setlist, &add_song_command(0, "song-a", 180));
    setlist = step(&setlist, &add_song_command(0, "song-b", 200));
    step(&setlist, &add_song_command(1, "song-c", 150))
}
