// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    Action, Actor, AuditError, CREATION_DESCRIPTION, GENERIC_CHANGE_DESCRIPTION, VersionHistory,
    VersionRecord,
};

fn test_time() -> OffsetDateTime {
    datetime!(2026-03-14 20:00 UTC)
}

fn record(version: u64) -> VersionRecord {
    VersionRecord::from_parts(
        version,
        String::from("actor-1"),
        test_time(),
        String::from("AddSong"),
        String::from("Added a song"),
    )
}

#[test]
fn test_history_begins_at_version_one() {
    let actor: Actor = Actor::new("owner-1");
    let history: VersionHistory = VersionHistory::begin(&actor, test_time());

    assert_eq!(history.current_version(), 1);
    assert_eq!(history.len(), 1);
    assert_eq!(history.records()[0].changed_by(), "owner-1");
    assert_eq!(history.records()[0].description(), CREATION_DESCRIPTION);
}

#[test]
fn test_append_increments_by_exactly_one() {
    let actor: Actor = Actor::new("owner-1");
    let mut history: VersionHistory = VersionHistory::begin(&actor, test_time());

    for expected in 2..=6 {
        let action: Action = Action::new("AddSong", Some(format!("change {expected}")));
        let appended: u64 = history.append(&actor, test_time(), &action).version();
        assert_eq!(appended, expected);
        assert_eq!(history.current_version(), expected);
    }

    let versions: Vec<u64> = history.records().iter().map(VersionRecord::version).collect();
    assert_eq!(versions, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_missing_details_fall_back_to_generic_description() {
    let actor: Actor = Actor::new("owner-1");
    let mut history: VersionHistory = VersionHistory::begin(&actor, test_time());

    let blank: Action = Action::new("UpdateDetails", Some(String::from("   ")));
    assert_eq!(
        history.append(&actor, test_time(), &blank).description(),
        GENERIC_CHANGE_DESCRIPTION
    );

    let missing: Action = Action::new("UpdateDetails", None);
    assert_eq!(
        history.append(&actor, test_time(), &missing).description(),
        GENERIC_CHANGE_DESCRIPTION
    );
}

#[test]
fn test_from_records_accepts_sequential_history() {
    let history: VersionHistory =
        VersionHistory::from_records(vec![record(1), record(2), record(3)]).unwrap();
    assert_eq!(history.current_version(), 3);
}

#[test]
fn test_from_records_rejects_gaps() {
    let result = VersionHistory::from_records(vec![record(1), record(3)]);
    assert_eq!(
        result,
        Err(AuditError::NonSequentialVersion {
            expected: 2,
            found: 3
        })
    );
}

#[test]
fn test_from_records_rejects_empty_history() {
    assert_eq!(
        VersionHistory::from_records(Vec::new()),
        Err(AuditError::EmptyHistory)
    );
}

#[test]
fn test_page_windows() {
    let history: VersionHistory =
        VersionHistory::from_records((1..=5).map(record).collect()).unwrap();

    let page: Vec<u64> = history.page(1, 2).iter().map(VersionRecord::version).collect();
    assert_eq!(page, vec![2, 3]);
    assert!(history.page(10, 2).is_empty());
    assert_eq!(history.page(4, 100).len(), 1);
}

#[test]
fn test_record_serialization_uses_rfc3339_timestamps() {
    let json: String = serde_json::to_string(&record(1)).unwrap();
    assert!(json.contains("2026-03-14T20:00:00Z"));
}
