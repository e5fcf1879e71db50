// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Access control evaluation.
//!
//! The decision itself ([`evaluate`]) is a pure function over a setlist's
//! [`AccessScope`] and an immutable snapshot of the actor's band membership.
//! Fetching that snapshot is asynchronous and goes through the
//! [`BandDirectory`] seam. A band that is missing or cannot be reached is
//! treated as "no membership", so owner and visibility rules still apply and
//! evaluation never fails.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::future::Future;

use gigbook_domain::{AccessScope, Band, BandId, BandMember, DomainError, Permission, Visibility};
use gigbook_persistence::SetlistSummary;
use tracing::{debug, warn};

use crate::auth::AuthenticatedActor;
use crate::error::{ApiError, AuthError, translate_domain_error};

/// What the actor intends to do with a setlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// View the setlist, its history, or join its live room.
    Read,
    /// Mutate the setlist. Band members need the given permission.
    Write(Permission),
}

impl Intent {
    /// Short label used in logs and errors.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write(_) => "write",
        }
    }
}

/// Failure to reach the band collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    /// What went wrong.
    pub message: String,
}

impl LookupError {
    /// Creates a new lookup error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Band lookup failed: {}", self.message)
    }
}

impl std::error::Error for LookupError {}

/// Source of band membership snapshots.
pub trait BandDirectory: Send + Sync {
    /// Looks up a band by id.
    ///
    /// Returns `Ok(None)` if the band does not exist.
    fn find_band(
        &self,
        band_id: &BandId,
    ) -> impl Future<Output = Result<Option<Band>, LookupError>> + Send;
}

/// Decides whether an actor may perform `intent` on a setlist.
///
/// `member` is the actor's membership in the setlist's band, if any. It is
/// ignored when the setlist has no band.
///
/// - Read: public visibility, ownership, or band membership.
/// - Write: ownership, or band membership holding the required permission.
///   Leaders hold every permission. Public visibility never grants Write.
#[must_use]
pub fn evaluate(
    scope: &AccessScope,
    actor_id: &str,
    member: Option<&BandMember>,
    intent: Intent,
) -> bool {
    if scope.owner_id == actor_id {
        return true;
    }
    let member: Option<&BandMember> = member.filter(|_| scope.band_id.is_some());
    match intent {
        Intent::Read => scope.visibility == Visibility::Public || member.is_some(),
        Intent::Write(permission) => member.is_some_and(|m| m.has_permission(permission)),
    }
}

/// Fetches the actor's membership in a band.
///
/// Missing bands and failed lookups both yield `None`.
pub async fn resolve_membership<D: BandDirectory>(
    directory: &D,
    band_id: &BandId,
    actor_id: &str,
) -> Option<BandMember> {
    match directory.find_band(band_id).await {
        Ok(Some(band)) => band.member(actor_id).cloned(),
        Ok(None) => {
            debug!(band_id = %band_id, "Band not found; treating as no membership");
            None
        }
        Err(e) => {
            warn!(band_id = %band_id, error = %e, "Band lookup failed; treating as no membership");
            None
        }
    }
}

/// Evaluates access, fetching band membership only when it can matter.
///
/// Nothing is mutated before the lookup resolves.
pub async fn can_access<D: BandDirectory>(
    directory: &D,
    scope: &AccessScope,
    actor_id: &str,
    intent: Intent,
) -> bool {
    if evaluate(scope, actor_id, None, intent) {
        return true;
    }
    let Some(band_id) = &scope.band_id else {
        return false;
    };
    let member: Option<BandMember> = resolve_membership(directory, band_id, actor_id).await;
    evaluate(scope, actor_id, member.as_ref(), intent)
}

/// Like [`can_access`], but turns a refusal into an error.
///
/// # Arguments
///
/// * `directory` - The band membership source
/// * `scope` - The setlist's owner, band and visibility
/// * `setlist_id` - Used only for the error message
/// * `actor` - The authenticated actor
/// * `intent` - The attempted access
/// * `action` - Name of the attempted action
///
/// # Errors
///
/// Returns `AccessDenied` if the evaluator refuses.
pub async fn authorize<D: BandDirectory>(
    directory: &D,
    scope: &AccessScope,
    setlist_id: &str,
    actor: &AuthenticatedActor,
    intent: Intent,
    action: &str,
) -> Result<(), AuthError> {
    if can_access(directory, scope, &actor.id, intent).await {
        return Ok(());
    }
    warn!(
        actor = %actor.id,
        setlist_id = %setlist_id,
        intent = intent.as_str(),
        action = %action,
        "Access denied"
    );
    Err(AuthError::AccessDenied {
        action: action.to_string(),
        target: format!("setlist '{setlist_id}'"),
    })
}

/// Checks that an actor may create a setlist owned by `band_id`.
///
/// Personal setlists need no check. Band-owned creation needs
/// `CreateSetlists` in that band.
///
/// # Errors
///
/// Returns `InvalidReference` if the band does not exist and
/// `AccessDenied` if the actor lacks the permission. An unreachable band
/// counts as no membership.
pub async fn authorize_create<D: BandDirectory>(
    directory: &D,
    actor: &AuthenticatedActor,
    band_id: Option<&BandId>,
) -> Result<(), ApiError> {
    let Some(band_id) = band_id else {
        return Ok(());
    };
    let member: Option<BandMember> = match directory.find_band(band_id).await {
        Ok(Some(band)) => band.member(&actor.id).cloned(),
        Ok(None) => {
            return Err(translate_domain_error(DomainError::UnknownBand(
                band_id.to_string(),
            )));
        }
        Err(e) => {
            warn!(band_id = %band_id, error = %e, "Band lookup failed; treating as no membership");
            None
        }
    };
    if member.is_some_and(|m| m.has_permission(Permission::CreateSetlists)) {
        return Ok(());
    }
    warn!(actor = %actor.id, band_id = %band_id, "Setlist creation denied");
    Err(ApiError::AccessDenied {
        action: String::from("create_setlist"),
        target: format!("band '{band_id}'"),
    })
}

/// Keeps only the summaries the actor may read.
///
/// Each band is looked up at most once.
pub async fn filter_readable<D: BandDirectory>(
    directory: &D,
    summaries: Vec<SetlistSummary>,
    actor_id: &str,
) -> Vec<SetlistSummary> {
    let mut memberships: HashMap<BandId, Option<BandMember>> = HashMap::new();
    let mut readable: Vec<SetlistSummary> = Vec::with_capacity(summaries.len());

    for summary in summaries {
        if evaluate(&summary.scope, actor_id, None, Intent::Read) {
            readable.push(summary);
            continue;
        }
        let Some(band_id) = summary.scope.band_id.clone() else {
            continue;
        };
        let member: &Option<BandMember> = match memberships.entry(band_id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let member: Option<BandMember> =
                    resolve_membership(directory, entry.key(), actor_id).await;
                entry.insert(member)
            }
        };
        if evaluate(&summary.scope, actor_id, member.as_ref(), Intent::Read) {
            readable.push(summary);
        }
    }
    readable
}
