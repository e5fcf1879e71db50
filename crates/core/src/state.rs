// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gigbook_audit::VersionRecord;
use gigbook_domain::Setlist;

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. The input setlist is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The setlist after the transition, with durations recomputed and the
    /// new version record appended.
    pub new_setlist: Setlist,
    /// The version record appended by this transition.
    pub record: VersionRecord,
    /// The version the transition was computed from.
    ///
    /// Persistence only applies the transition while the stored version
    /// still equals this value.
    pub previous_version: u64,
}
