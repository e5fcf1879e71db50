// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while validating or mutating a setlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A set index does not address an existing set.
    SetIndexOutOfRange {
        /// The requested set index.
        index: usize,
        /// The number of sets in the setlist.
        set_count: usize,
    },
    /// A song index does not address an existing entry in its set.
    SongIndexOutOfRange {
        /// The set that was addressed.
        set_index: usize,
        /// The requested song index.
        index: usize,
        /// The number of entries in that set.
        song_count: usize,
    },
    /// The referenced song does not exist.
    UnknownSong(String),
    /// The referenced band does not exist.
    UnknownBand(String),
    /// Setlist title is empty or too long.
    InvalidTitle(String),
    /// Set name is empty or too long.
    InvalidSetName(String),
    /// Venue is too long.
    InvalidVenue(String),
    /// Description is too long.
    InvalidDescription(String),
    /// Visibility value is not recognized.
    InvalidVisibility(String),
    /// Band role value is not recognized.
    InvalidBandRole(String),
    /// Band permission value is not recognized.
    InvalidPermission(String),
    /// Failed to parse a performance date.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A restored setlist's version disagrees with its history.
    VersionMismatch {
        /// The stored setlist version.
        version: u64,
        /// The version of the last history record.
        history_version: u64,
    },
}

impl DomainError {
    /// Whether this error is a local, user-correctable bad reference
    /// (out-of-range index, unknown song or band).
    #[must_use]
    pub const fn is_invalid_reference(&self) -> bool {
        matches!(
            self,
            Self::SetIndexOutOfRange { .. }
                | Self::SongIndexOutOfRange { .. }
                | Self::UnknownSong(_)
                | Self::UnknownBand(_)
        )
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetIndexOutOfRange { index, set_count } => {
                write!(
                    f,
                    "Set index {index} is out of range (setlist has {set_count} sets)"
                )
            }
            Self::SongIndexOutOfRange {
                set_index,
                index,
                song_count,
            } => {
                write!(
                    f,
                    "Song index {index} is out of range for set {set_index} ({song_count} songs)"
                )
            }
            Self::UnknownSong(id) => write!(f, "Song '{id}' does not exist"),
            Self::UnknownBand(id) => write!(f, "Band '{id}' does not exist"),
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidSetName(msg) => write!(f, "Invalid set name: {msg}"),
            Self::InvalidVenue(msg) => write!(f, "Invalid venue: {msg}"),
            Self::InvalidDescription(msg) => write!(f, "Invalid description: {msg}"),
            Self::InvalidVisibility(value) => {
                write!(
                    f,
                    "Invalid visibility: '{value}'. Must be 'public' or 'private'"
                )
            }
            Self::InvalidBandRole(value) => {
                write!(f, "Invalid band role: '{value}'. Must be 'leader' or 'member'")
            }
            Self::InvalidPermission(value) => write!(f, "Invalid band permission: '{value}'"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::VersionMismatch {
                version,
                history_version,
            } => {
                write!(
                    f,
                    "Setlist version {version} does not match history version {history_version}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
