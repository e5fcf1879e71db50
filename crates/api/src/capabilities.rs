// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities tell a client which controls to offer. They are advisory
//! only and do not replace the access check every write goes through.

use gigbook_domain::{AccessScope, BandMember, Permission};

use crate::access::{BandDirectory, Intent, evaluate, resolve_membership};
use crate::request_response::SetlistCapabilities;

/// Computes capabilities from an already-resolved membership.
///
/// # Arguments
///
/// * `scope` - The setlist's owner, band and visibility
/// * `actor_id` - The requesting actor
/// * `member` - The actor's membership in the setlist's band, if any
#[must_use]
pub fn compute_setlist_capabilities(
    scope: &AccessScope,
    actor_id: &str,
    member: Option<&BandMember>,
) -> SetlistCapabilities {
    SetlistCapabilities {
        can_read: evaluate(scope, actor_id, member, Intent::Read),
        can_edit: evaluate(
            scope,
            actor_id,
            member,
            Intent::Write(Permission::EditSetlists),
        ),
    }
}

/// Computes capabilities, looking the band up at most once.
pub async fn resolve_setlist_capabilities<D: BandDirectory>(
    directory: &D,
    scope: &AccessScope,
    actor_id: &str,
) -> SetlistCapabilities {
    let member: Option<BandMember> = match &scope.band_id {
        Some(band_id) if scope.owner_id != actor_id => {
            resolve_membership(directory, band_id, actor_id).await
        }
        _ => None,
    };
    compute_setlist_capabilities(scope, actor_id, member.as_ref())
}
