// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use gigbook_audit::{Action, Actor, VersionHistory, VersionRecord};
use time::macros::datetime;

use crate::tests::helpers::{empty_setlist, test_owner, test_time, two_set_setlist};
use crate::{
    AccessScope, BandId, DomainError, Set, Setlist, SetlistDetails, SetlistId, SetlistParts,
    Visibility, default_set_name,
};

#[test]
fn test_new_setlist_starts_at_version_one() {
    let setlist: Setlist = empty_setlist();

    assert_eq!(setlist.version(), 1);
    assert_eq!(setlist.history().len(), 1);
    assert_eq!(setlist.history().records()[0].description(), "setlist created");
    assert_eq!(setlist.owner_id(), "owner-1");
    assert!(setlist.sets().is_empty());
    assert_eq!(setlist.created_at(), setlist.updated_at());
}

#[test]
fn test_record_version_advances_in_lockstep() {
    let mut setlist: Setlist = empty_setlist();
    let later = datetime!(2026-05-01 20:15 UTC);

    let record: VersionRecord = setlist.record_version(
        &Actor::new("bob"),
        later,
        &Action::new("RenameSet", None),
    );

    assert_eq!(record.version(), 2);
    assert_eq!(record.changed_by(), "bob");
    assert_eq!(record.description(), "setlist updated");
    assert_eq!(setlist.version(), 2);
    assert_eq!(setlist.history().current_version(), setlist.version());
    assert_eq!(setlist.updated_at(), later);
    assert_eq!(setlist.created_at(), test_time());
}

#[test]
fn test_generated_ids_are_unique() {
    assert_ne!(SetlistId::generate(), SetlistId::generate());
}

#[test]
fn test_visibility_parsing() {
    assert_eq!(Visibility::from_str("public"), Ok(Visibility::Public));
    assert_eq!(Visibility::from_str("PRIVATE"), Ok(Visibility::Private));
    assert!(Visibility::from_str("friends").is_err());
    assert_eq!(Visibility::default(), Visibility::Private);
    assert_eq!(Visibility::Public.to_string(), "public");
}

#[test]
fn test_default_set_name_is_positional() {
    assert_eq!(default_set_name(0), "Set 1");
    assert_eq!(default_set_name(2), "Set 3");
}

#[test]
fn test_access_scope_reflects_setlist() {
    let mut setlist: Setlist = Setlist::new(
        SetlistId::new("setlist-2"),
        SetlistDetails {
            title: String::from("Band night"),
            ..SetlistDetails::default()
        },
        &test_owner(),
        Some(BandId::new("band-1")),
        test_time(),
    );
    setlist.details.visibility = Visibility::Public;

    let scope: AccessScope = setlist.access_scope();

    assert_eq!(scope.owner_id, "owner-1");
    assert_eq!(scope.band_id, Some(BandId::new("band-1")));
    assert_eq!(scope.visibility, Visibility::Public);
}

fn parts_from(setlist: &Setlist) -> SetlistParts {
    SetlistParts {
        id: setlist.id().clone(),
        details: setlist.details.clone(),
        owner_id: setlist.owner_id().to_string(),
        band_id: setlist.band_id().cloned(),
        version: setlist.version(),
        sets: setlist.sets().to_vec(),
        history: setlist.history().clone(),
        created_at: setlist.created_at(),
        updated_at: setlist.updated_at(),
    }
}

#[test]
fn test_restore_recomputes_durations() {
    let original: Setlist = two_set_setlist();
    let mut parts: SetlistParts = parts_from(&original);
    parts.sets = parts
        .sets
        .iter()
        .map(|set| Set::restore(set.name.clone(), set.songs().to_vec()))
        .collect();

    let restored: Setlist = Setlist::restore(parts).unwrap();

    assert_eq!(restored.total_duration_seconds(), 530);
    assert_eq!(restored, original);
}

#[test]
fn test_restore_rejects_version_mismatch() {
    let setlist: Setlist = empty_setlist();
    let mut parts: SetlistParts = parts_from(&setlist);
    parts.version = 4;

    assert_eq!(
        Setlist::restore(parts),
        Err(DomainError::VersionMismatch {
            version: 4,
            history_version: 1
        })
    );
}

#[test]
fn test_restore_accepts_longer_history() {
    let setlist: Setlist = empty_setlist();
    let mut history: VersionHistory = setlist.history().clone();
    history.append(&test_owner(), test_time(), &Action::new("AddSong", None));
    let mut parts: SetlistParts = parts_from(&setlist);
    parts.history = history;
    parts.version = 2;

    let restored: Setlist = Setlist::restore(parts).unwrap();

    assert_eq!(restored.version(), 2);
}

#[test]
fn test_setlist_serializes_with_rfc3339_timestamps() {
    let setlist: Setlist = two_set_setlist();

    let json: serde_json::Value = serde_json::to_value(&setlist).unwrap();

    assert_eq!(json["created_at"], "2026-05-01T19:30:00Z");
    assert_eq!(json["version"], 1);
    assert_eq!(json["total_duration_seconds"], 530);
    assert_eq!(json["sets"][1]["songs"][0]["song_id"], "song-c");
    assert_eq!(json["details"]["visibility"], "private");
}
