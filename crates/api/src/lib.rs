// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the gigbook setlist engine.
//!
//! This crate sits between a transport (the HTTP server) and the core. It
//! owns request and response types, turns requests into core commands,
//! evaluates access, and translates every lower-level error into an
//! [`ApiError`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod access;
mod auth;
mod capabilities;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use access::{
    BandDirectory, Intent, LookupError, authorize, authorize_create, can_access, evaluate,
    filter_readable, resolve_membership,
};
pub use auth::{AuthenticatedActor, authenticate};
pub use capabilities::{compute_setlist_capabilities, resolve_setlist_capabilities};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT, add_song_command, create_setlist, execute_command,
    get_history, list_response, list_setlists, load_setlist, move_song_command,
    parse_create_request, remove_set_command, remove_song_command, rename_set_command,
    update_details_command, update_entry_command,
};
pub use request_response::{
    AddSongRequest, CreateSetlistRequest, HistoryRequest, HistoryResponse, ListSetlistsRequest,
    ListSetlistsResponse, MoveSongRequest, MutationResponse, RenameSetRequest, SetEntryInfo,
    SetInfo, SetlistCapabilities, SetlistResponse, SetlistSummaryInfo, SetlistView,
    UpdateEntryRequest, UpdateSetlistRequest, VersionRecordInfo,
};
