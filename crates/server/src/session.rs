// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request identity extraction.
//!
//! The upstream identity layer authenticates the caller and attaches the
//! actor id as `X-Actor-Id`. A live client additionally echoes the session
//! id it received when joining a room as `X-Session-Id`, so its own
//! mutations are not echoed back to it.

use axum::{extract::FromRequestParts, http::request::Parts};
use gigbook_api::{AuthenticatedActor, authenticate};
use tracing::{debug, warn};

use crate::handlers::HttpError;
use crate::live::SessionId;

/// Header carrying the authenticated actor id.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// Header carrying the caller's live session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Extractor for the requesting actor and, optionally, its live session.
///
/// # Errors
///
/// Rejects with HTTP 401 if `X-Actor-Id` is missing, not valid UTF-8, or
/// blank.
pub struct SessionActor {
    /// The authenticated actor.
    pub actor: AuthenticatedActor,
    /// The live session the request came from, if any.
    pub session_id: Option<SessionId>,
}

impl<S: Send + Sync> FromRequestParts<S> for SessionActor {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw_actor: Option<&str> = match parts.headers.get(ACTOR_HEADER) {
            Some(value) => Some(value.to_str().map_err(|_| {
                warn!("Invalid X-Actor-Id header encoding");
                HttpError::unauthorized("Invalid X-Actor-Id header encoding")
            })?),
            None => None,
        };
        let actor: AuthenticatedActor = authenticate(raw_actor).map_err(|e| {
            debug!(error = %e, "Rejected request without actor identity");
            HttpError::from(gigbook_api::ApiError::from(e))
        })?;

        let session_id: Option<SessionId> = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(SessionId::new);

        Ok(Self { actor, session_id })
    }
}
