// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gigbook_domain::{BandId, Setlist, Visibility};

use crate::tests::{add_song, create_test_setlist, store_setlist};
use crate::{Persistence, SetlistSummary};

#[test]
fn test_list_by_owner_includes_derived_totals() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let setlist: Setlist = store_setlist(&mut persistence, "Harvest Festival");
    persistence
        .persist_transition(&add_song(&setlist, 0, "song-a", 245))
        .unwrap();

    let summaries: Vec<SetlistSummary> = persistence.list_setlists_by_owner("owner-1").unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, *setlist.id());
    assert_eq!(summaries[0].version, 2);
    assert_eq!(summaries[0].total_duration_seconds, 245);
    assert_eq!(summaries[0].scope.owner_id, "owner-1");
    assert!(
        persistence
            .list_setlists_by_owner("someone-else")
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_list_by_band() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let band_setlist: Setlist =
        create_test_setlist("Band rehearsal", Some("band-1"), Visibility::Private);
    persistence.create_setlist(&band_setlist).unwrap();
    store_setlist(&mut persistence, "Solo gig");

    let summaries: Vec<SetlistSummary> = persistence
        .list_setlists_by_band(&BandId::new("band-1"))
        .unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].title, "Band rehearsal");
    assert_eq!(summaries[0].scope.band_id, Some(BandId::new("band-1")));
}

#[test]
fn test_search_matches_title_and_venue_case_insensitively() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    store_setlist(&mut persistence, "Harvest Festival");
    store_setlist(&mut persistence, "Winter Ball");

    let by_title: Vec<SetlistSummary> = persistence.search_setlists("harvest").unwrap();
    let by_venue: Vec<SetlistSummary> = persistence.search_setlists("RIVERSIDE").unwrap();

    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].title, "Harvest Festival");
    assert_eq!(by_venue.len(), 2);
}

#[test]
fn test_search_treats_wildcards_literally() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    store_setlist(&mut persistence, "100% Covers");
    store_setlist(&mut persistence, "Originals");

    let results: Vec<SetlistSummary> = persistence.search_setlists("%").unwrap();
    let underscore: Vec<SetlistSummary> = persistence.search_setlists("_").unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "100% Covers");
    assert!(underscore.is_empty());
}
