// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP route handlers.
//!
//! Mutations follow one flow: load the setlist and build the command under
//! the persistence lock, release the lock while access is checked (the
//! band lookup needs it), then commit under the lock again. The commit is
//! a compare-and-swap on the loaded version, so a change that landed in
//! between is reported as a conflict instead of being overwritten.

use axum::{
    Json,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gigbook::{Command, NewSetlist};
use gigbook_api::{
    AddSongRequest, ApiError, CreateSetlistRequest, HistoryRequest, HistoryResponse, Intent,
    ListSetlistsRequest, ListSetlistsResponse, MoveSongRequest, MutationResponse,
    RenameSetRequest, SetlistCapabilities, SetlistResponse, SetlistView, UpdateEntryRequest,
    UpdateSetlistRequest, add_song_command, authorize, authorize_create, execute_command,
    filter_readable, get_history, list_response, list_setlists, load_setlist, move_song_command,
    parse_create_request, remove_set_command, remove_song_command, rename_set_command,
    resolve_setlist_capabilities, update_details_command, update_entry_command,
};
use gigbook_domain::Setlist;
use gigbook_persistence::{Persistence, SetlistSummary};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{error, info, warn};

use crate::AppState;
use crate::live::LiveEvent;
use crate::session::SessionActor;

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator.
    pub error: bool,
    /// Error message.
    pub message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error message.
    pub message: String,
}

impl HttpError {
    /// A 401 with the given message.
    pub fn unauthorized(message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::VersionConflict { .. } => StatusCode::CONFLICT,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidReference { .. } | ApiError::DomainRuleViolation { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Loads, authorizes and commits one mutation, then fans it out.
///
/// # Arguments
///
/// * `app_state` - Shared application state
/// * `setlist_id` - The setlist being edited
/// * `session` - The requesting actor and its live session, if any
/// * `build` - Builds the command; runs under the persistence lock
///
/// # Errors
///
/// Returns 404 for an unknown setlist, 403 without the needed permission,
/// 409 if the setlist changed concurrently, and 400/422 for rejected
/// commands.
async fn commit_change<F>(
    app_state: &AppState,
    setlist_id: &str,
    session: &SessionActor,
    build: F,
) -> Result<MutationResponse, HttpError>
where
    F: FnOnce(&mut Persistence) -> Result<Command, ApiError> + Send,
{
    let (setlist, command): (Setlist, Command) = {
        let mut persistence = app_state.persistence.lock().await;
        let setlist: Setlist = load_setlist(&mut persistence, setlist_id)?;
        let command: Command = build(&mut *persistence)?;
        (setlist, command)
    };

    authorize(
        &app_state.bands,
        &setlist.access_scope(),
        setlist_id,
        &session.actor,
        Intent::Write(command.required_permission()),
        command.name(),
    )
    .await
    .map_err(ApiError::from)?;

    let response: MutationResponse = {
        let mut persistence = app_state.persistence.lock().await;
        execute_command(
            &mut persistence,
            &setlist,
            &command,
            &session.actor,
            OffsetDateTime::now_utc(),
        )?
    };

    app_state
        .hub
        .emit(
            setlist_id,
            session.session_id.as_ref(),
            &session.actor.id,
            LiveEvent::SetlistUpdated {
                setlist_id: response.setlist_id.clone(),
                version: response.version,
                changed_by: response.changed_by.clone(),
                payload: Box::new(response.clone()),
            },
        )
        .await;

    Ok(response)
}

/// Handler for POST `/setlists`.
///
/// Creates a setlist owned by the caller, optionally attributed to a band.
pub async fn handle_create_setlist(
    AxumState(app_state): AxumState<AppState>,
    session: SessionActor,
    Json(req): Json<CreateSetlistRequest>,
) -> Result<(StatusCode, Json<SetlistResponse>), HttpError> {
    info!(actor = %session.actor.id, "Handling create_setlist request");

    let new_setlist: NewSetlist = parse_create_request(&req)?;
    authorize_create(&app_state.bands, &session.actor, new_setlist.band_id.as_ref()).await?;

    let response: SetlistResponse = {
        let mut persistence = app_state.persistence.lock().await;
        gigbook_api::create_setlist(
            &mut persistence,
            new_setlist,
            &session.actor,
            OffsetDateTime::now_utc(),
        )?
    };

    info!(setlist_id = %response.setlist_id, "Created setlist");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/setlists`.
///
/// Lists by owner (default: the caller), by band, or searches by title or
/// venue. Only setlists the caller may read are returned.
pub async fn handle_list_setlists(
    AxumState(app_state): AxumState<AppState>,
    session: SessionActor,
    Query(query): Query<ListSetlistsRequest>,
) -> Result<Json<ListSetlistsResponse>, HttpError> {
    let summaries: Vec<SetlistSummary> = {
        let mut persistence = app_state.persistence.lock().await;
        list_setlists(&mut persistence, &query, &session.actor)?
    };
    let readable: Vec<SetlistSummary> =
        filter_readable(&app_state.bands, summaries, &session.actor.id).await;

    Ok(Json(list_response(&readable)))
}

/// Handler for GET `/setlists/{id}`.
///
/// Returns the read model together with what the caller may do with it.
pub async fn handle_get_setlist(
    AxumState(app_state): AxumState<AppState>,
    Path(setlist_id): Path<String>,
    session: SessionActor,
) -> Result<Json<SetlistView>, HttpError> {
    let setlist: Setlist = {
        let mut persistence = app_state.persistence.lock().await;
        load_setlist(&mut persistence, &setlist_id)?
    };

    let capabilities: SetlistCapabilities = resolve_setlist_capabilities(
        &app_state.bands,
        &setlist.access_scope(),
        &session.actor.id,
    )
    .await;
    if !capabilities.can_read {
        warn!(actor = %session.actor.id, setlist_id = %setlist_id, "Read denied");
        return Err(HttpError::from(ApiError::AccessDenied {
            action: String::from("read_setlist"),
            target: format!("setlist '{setlist_id}'"),
        }));
    }

    Ok(Json(SetlistView {
        setlist: SetlistResponse::from_setlist(&setlist),
        capabilities,
    }))
}

/// Handler for PATCH `/setlists/{id}`.
pub async fn handle_update_setlist(
    AxumState(app_state): AxumState<AppState>,
    Path(setlist_id): Path<String>,
    session: SessionActor,
    Json(req): Json<UpdateSetlistRequest>,
) -> Result<Json<MutationResponse>, HttpError> {
    let response: MutationResponse =
        commit_change(&app_state, &setlist_id, &session, |_| {
            update_details_command(&req)
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/setlists/{id}/songs`.
///
/// Appends a catalog song to a set; one past the last set starts a new set.
pub async fn handle_add_song(
    AxumState(app_state): AxumState<AppState>,
    Path(setlist_id): Path<String>,
    session: SessionActor,
    Json(req): Json<AddSongRequest>,
) -> Result<Json<MutationResponse>, HttpError> {
    let response: MutationResponse =
        commit_change(&app_state, &setlist_id, &session, |persistence| {
            add_song_command(persistence, &req)
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/setlists/{id}/songs/move`.
pub async fn handle_move_song(
    AxumState(app_state): AxumState<AppState>,
    Path(setlist_id): Path<String>,
    session: SessionActor,
    Json(req): Json<MoveSongRequest>,
) -> Result<Json<MutationResponse>, HttpError> {
    let response: MutationResponse =
        commit_change(&app_state, &setlist_id, &session, |_| {
            Ok(move_song_command(&req))
        })
        .await?;
    Ok(Json(response))
}

/// Handler for DELETE `/setlists/{id}/sets/{set}/songs/{song}`.
pub async fn handle_remove_song(
    AxumState(app_state): AxumState<AppState>,
    Path((setlist_id, set_index, song_index)): Path<(String, usize, usize)>,
    session: SessionActor,
) -> Result<Json<MutationResponse>, HttpError> {
    let response: MutationResponse =
        commit_change(&app_state, &setlist_id, &session, |_| {
            Ok(remove_song_command(set_index, song_index))
        })
        .await?;
    Ok(Json(response))
}

/// Handler for PATCH `/setlists/{id}/sets/{set}/songs/{song}`.
///
/// Edits an entry's duration, notes or played flag in place.
pub async fn handle_update_entry(
    AxumState(app_state): AxumState<AppState>,
    Path((setlist_id, set_index, song_index)): Path<(String, usize, usize)>,
    session: SessionActor,
    Json(req): Json<UpdateEntryRequest>,
) -> Result<Json<MutationResponse>, HttpError> {
    let response: MutationResponse =
        commit_change(&app_state, &setlist_id, &session, |_| {
            Ok(update_entry_command(set_index, song_index, &req))
        })
        .await?;
    Ok(Json(response))
}

/// Handler for PATCH `/setlists/{id}/sets/{set}`.
pub async fn handle_rename_set(
    AxumState(app_state): AxumState<AppState>,
    Path((setlist_id, set_index)): Path<(String, usize)>,
    session: SessionActor,
    Json(req): Json<RenameSetRequest>,
) -> Result<Json<MutationResponse>, HttpError> {
    let response: MutationResponse =
        commit_change(&app_state, &setlist_id, &session, |_| {
            Ok(rename_set_command(set_index, &req))
        })
        .await?;
    Ok(Json(response))
}

/// Handler for DELETE `/setlists/{id}/sets/{set}`.
pub async fn handle_remove_set(
    AxumState(app_state): AxumState<AppState>,
    Path((setlist_id, set_index)): Path<(String, usize)>,
    session: SessionActor,
) -> Result<Json<MutationResponse>, HttpError> {
    let response: MutationResponse =
        commit_change(&app_state, &setlist_id, &session, |_| {
            Ok(remove_set_command(set_index))
        })
        .await?;
    Ok(Json(response))
}

/// Handler for GET `/setlists/{id}/history`.
///
/// Returns a page of the version history, oldest first.
pub async fn handle_get_history(
    AxumState(app_state): AxumState<AppState>,
    Path(setlist_id): Path<String>,
    session: SessionActor,
    Query(query): Query<HistoryRequest>,
) -> Result<Json<HistoryResponse>, HttpError> {
    let setlist: Setlist = {
        let mut persistence = app_state.persistence.lock().await;
        load_setlist(&mut persistence, &setlist_id)?
    };
    authorize(
        &app_state.bands,
        &setlist.access_scope(),
        &setlist_id,
        &session.actor,
        Intent::Read,
        "read_history",
    )
    .await
    .map_err(ApiError::from)?;

    Ok(Json(get_history(&setlist, &query)))
}
