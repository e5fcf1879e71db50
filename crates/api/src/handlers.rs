// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for setlist operations.
//!
//! Handlers are synchronous and work against a borrowed [`Persistence`].
//! Access checks are asynchronous (see [`crate::access`]) and run between
//! loading a setlist and executing a command, with no persistence borrow
//! held across the band lookup. The compare-and-swap in
//! [`Persistence::persist_transition`] catches any commit that raced in
//! while the check was pending.

use std::str::FromStr;

use gigbook::{Command, NewSetlist, TransitionResult, apply};
use gigbook_audit::Actor;
use gigbook_domain::{
    BandId, DomainError, EntryPatch, Setlist, SetlistId, Song, SongId, Visibility,
    parse_performance_date,
};
use gigbook_persistence::{Persistence, SetlistSummary};
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::auth::AuthenticatedActor;
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    AddSongRequest, CreateSetlistRequest, HistoryRequest, HistoryResponse, ListSetlistsRequest,
    ListSetlistsResponse, MoveSongRequest, MutationResponse, RenameSetRequest, SetlistResponse,
    SetlistSummaryInfo, UpdateEntryRequest, UpdateSetlistRequest, VersionRecordInfo,
};

/// Page size used when a history request names none.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Largest history page served at once.
pub const MAX_HISTORY_LIMIT: usize = 200;

fn parse_visibility(value: Option<&str>) -> Result<Option<Visibility>, ApiError> {
    value
        .map(Visibility::from_str)
        .transpose()
        .map_err(translate_domain_error)
}

fn parse_date(value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value
        .map(parse_performance_date)
        .transpose()
        .map_err(translate_domain_error)
}

/// Loads a setlist for reading or editing.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no such setlist exists.
pub fn load_setlist(persistence: &mut Persistence, setlist_id: &str) -> Result<Setlist, ApiError> {
    persistence
        .get_setlist(&SetlistId::new(setlist_id))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Setlist"),
            message: format!("Setlist '{setlist_id}' does not exist"),
        })
}

/// Validates and converts a creation request.
///
/// Runs before any band lookup so malformed requests fail fast.
///
/// # Errors
///
/// Returns `InvalidInput` if the date or visibility is malformed.
pub fn parse_create_request(request: &CreateSetlistRequest) -> Result<NewSetlist, ApiError> {
    Ok(NewSetlist {
        title: request.title.clone(),
        description: request.description.clone(),
        performance_date: parse_date(request.performance_date.as_deref())?,
        venue: request.venue.clone(),
        visibility: parse_visibility(request.visibility.as_deref())?.unwrap_or_default(),
        band_id: request
            .band_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(BandId::new),
    })
}

/// Creates and stores a setlist owned by `actor`.
///
/// Band-owned creation must be cleared with
/// [`crate::access::authorize_create`] first.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `new_setlist` - The parsed creation request
/// * `actor` - The authenticated actor, who becomes the owner
/// * `now` - Creation time
///
/// # Errors
///
/// Returns an error if a field is invalid or the write fails.
pub fn create_setlist(
    persistence: &mut Persistence,
    new_setlist: NewSetlist,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<SetlistResponse, ApiError> {
    let owner: Actor = actor.to_audit_actor();
    let setlist: Setlist = gigbook::create_setlist(new_setlist, &owner, now)?;
    persistence.create_setlist(&setlist)?;
    Ok(SetlistResponse::from_setlist(&setlist))
}

/// Converts a field update request into a command.
///
/// # Errors
///
/// Returns `InvalidInput` if the date or visibility is malformed.
pub fn update_details_command(request: &UpdateSetlistRequest) -> Result<Command, ApiError> {
    let performance_date: Option<Option<Date>> = match &request.performance_date {
        None => None,
        Some(value) => Some(parse_date(value.as_deref())?),
    };
    Ok(Command::UpdateDetails {
        title: request.title.clone(),
        description: request.description.clone(),
        performance_date,
        venue: request.venue.clone(),
        visibility: parse_visibility(request.visibility.as_deref())?,
    })
}

/// Converts an add-song request into a command.
///
/// Without an explicit duration the song's own duration is used.
///
/// # Errors
///
/// Returns `InvalidReference` if the song does not exist.
pub fn add_song_command(
    persistence: &mut Persistence,
    request: &AddSongRequest,
) -> Result<Command, ApiError> {
    let song_id: SongId = SongId::new(request.song_id.trim());
    let song: Song = persistence
        .get_song(&song_id)?
        .ok_or_else(|| translate_domain_error(DomainError::UnknownSong(song_id.to_string())))?;

    Ok(Command::AddSong {
        set_index: request.set_index,
        song_id,
        duration_seconds: request.duration_seconds.or(song.duration_seconds),
        notes: request.notes.clone(),
        song_title: Some(song.title),
    })
}

/// Converts a move request into a command.
#[must_use]
pub const fn move_song_command(request: &MoveSongRequest) -> Command {
    Command::MoveSong {
        from_set_index: request.from_set_index,
        from_song_index: request.from_song_index,
        to_set_index: request.to_set_index,
        to_position: request.to_position,
    }
}

/// Builds a remove-song command.
#[must_use]
pub const fn remove_song_command(set_index: usize, song_index: usize) -> Command {
    Command::RemoveSong {
        set_index,
        song_index,
    }
}

/// Converts an entry edit request into a command.
#[must_use]
pub fn update_entry_command(
    set_index: usize,
    song_index: usize,
    request: &UpdateEntryRequest,
) -> Command {
    Command::UpdateEntry {
        set_index,
        song_index,
        patch: EntryPatch {
            duration_seconds: request.duration_seconds,
            notes: request.notes.clone(),
            played: request.played,
        },
    }
}

/// Converts a rename request into a command.
#[must_use]
pub fn rename_set_command(set_index: usize, request: &RenameSetRequest) -> Command {
    Command::RenameSet {
        set_index,
        name: request.name.clone(),
    }
}

/// Builds a remove-set command.
#[must_use]
pub const fn remove_set_command(set_index: usize) -> Command {
    Command::RemoveSet { set_index }
}

/// Applies a command to a loaded setlist and commits it.
///
/// The caller must already have authorized `command.required_permission()`
/// for this actor. The new structure and its version record are stored
/// together, or not at all.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `setlist` - The setlist as loaded before the access check
/// * `command` - The mutation
/// * `actor` - The authenticated actor
/// * `now` - Commit time
///
/// # Returns
///
/// The committed change, suitable both as the HTTP response and as the
/// payload fanned out to other live sessions.
///
/// # Errors
///
/// Returns `InvalidReference` or `InvalidInput` if the command is rejected,
/// and `VersionConflict` if another commit landed after `setlist` was
/// loaded.
pub fn execute_command(
    persistence: &mut Persistence,
    setlist: &Setlist,
    command: &Command,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<MutationResponse, ApiError> {
    let transition: TransitionResult = apply(setlist, command, &actor.to_audit_actor(), now)?;
    persistence.persist_transition(&transition)?;

    info!(
        setlist_id = %setlist.id(),
        actor = %actor.id,
        action = command.name(),
        version = transition.record.version(),
        "Committed setlist change"
    );

    Ok(MutationResponse {
        setlist_id: setlist.id().to_string(),
        version: transition.record.version(),
        changed_by: transition.record.changed_by().to_string(),
        action: transition.record.action().to_string(),
        description: transition.record.description().to_string(),
        setlist: SetlistResponse::from_setlist(&transition.new_setlist),
    })
}

/// Returns a page of a setlist's version history in append order.
#[must_use]
pub fn get_history(setlist: &Setlist, request: &HistoryRequest) -> HistoryResponse {
    let limit: usize = request
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .min(MAX_HISTORY_LIMIT);
    HistoryResponse {
        setlist_id: setlist.id().to_string(),
        current_version: setlist.version(),
        total: setlist.history().len(),
        offset: request.offset,
        records: setlist
            .history()
            .page(request.offset, limit)
            .iter()
            .map(VersionRecordInfo::from_record)
            .collect(),
    }
}

/// Runs a listing or search query. Results are not yet Read-filtered.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_setlists(
    persistence: &mut Persistence,
    request: &ListSetlistsRequest,
    actor: &AuthenticatedActor,
) -> Result<Vec<SetlistSummary>, ApiError> {
    if let Some(term) = request.q.as_deref().filter(|t| !t.trim().is_empty()) {
        return Ok(persistence.search_setlists(term)?);
    }
    if let Some(band_id) = request.band_id.as_deref() {
        return Ok(persistence.list_setlists_by_band(&BandId::new(band_id))?);
    }
    let owner: &str = match request.owner.as_deref() {
        None | Some("me") => &actor.id,
        Some(owner) => owner,
    };
    Ok(persistence.list_setlists_by_owner(owner)?)
}

/// Builds the listing response.
#[must_use]
pub fn list_response(summaries: &[SetlistSummary]) -> ListSetlistsResponse {
    ListSetlistsResponse {
        setlists: summaries
            .iter()
            .map(SetlistSummaryInfo::from_summary)
            .collect(),
    }
}
