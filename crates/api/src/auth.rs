// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor identity as supplied by the upstream identity layer.
//!
//! Authentication itself happens outside this system. Every request arrives
//! with an already-authenticated actor id; this module only rejects requests
//! that carry none.

use gigbook_audit::Actor;

use crate::error::AuthError;

/// Longest actor id accepted from the identity layer.
const MAX_ACTOR_ID_LENGTH: usize = 128;

/// An authenticated actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self { id }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording version history to attribute changes
    /// to their author.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone())
    }
}

/// Accepts the actor id attached by the identity layer.
///
/// # Arguments
///
/// * `actor_id` - The raw id, if the request carried one
///
/// # Returns
///
/// The authenticated actor.
///
/// # Errors
///
/// Returns an error if the id is missing, blank, or implausibly long.
/// There are no anonymous reads or writes.
pub fn authenticate(actor_id: Option<&str>) -> Result<AuthenticatedActor, AuthError> {
    let Some(raw) = actor_id else {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("No actor identity supplied"),
        });
    };
    let id: &str = raw.trim();
    if id.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    if id.len() > MAX_ACTOR_ID_LENGTH {
        return Err(AuthError::AuthenticationFailed {
            reason: format!("Actor ID cannot exceed {MAX_ACTOR_ID_LENGTH} bytes"),
        });
    }
    Ok(AuthenticatedActor::new(id.to_string()))
}
