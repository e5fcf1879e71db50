// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::SongId;
use serde::{Deserialize, Serialize};

/// A catalog song. Only its duration matters to the setlist engine,
/// as the default for a newly added entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Song identifier.
    pub id: SongId,
    /// Title.
    pub title: String,
    /// Artist.
    pub artist: String,
    /// Canonical duration in seconds.
    pub duration_seconds: Option<u32>,
}

impl Song {
    /// Creates a new song.
    #[must_use]
    pub fn new(id: SongId, title: &str, artist: &str, duration_seconds: Option<u32>) -> Self {
        Self {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
            duration_seconds,
        }
    }
}
