// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gigbook_audit::{Action, Actor, VersionRecord};
use gigbook_domain::Setlist;
use time::OffsetDateTime;
use tracing::debug;

/// Records a committed change on `setlist`.
///
/// Appends a version record with `version = setlist.version() + 1` and
/// advances the setlist's version to match. Call only after the change has
/// been structurally applied and durations recomputed. A missing or blank
/// description falls back to the generic "setlist updated" text; commit
/// itself never fails.
///
/// # Arguments
///
/// * `setlist` - The already mutated setlist
/// * `actor` - The author of the change
/// * `timestamp` - The commit time
/// * `action_name` - The action name to record
/// * `description` - Human-readable summary, if one could be produced
pub fn commit(
    setlist: &mut Setlist,
    actor: &Actor,
    timestamp: OffsetDateTime,
    action_name: &str,
    description: Option<String>,
) -> VersionRecord {
    let action: Action = Action::new(action_name, description);
    let record: VersionRecord = setlist.record_version(actor, timestamp, &action);
    debug!(
        setlist_id = %setlist.id(),
        version = record.version(),
        action = action_name,
        "Committed setlist change"
    );
    record
}
