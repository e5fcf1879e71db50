// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gigbook_domain::{EntryPatch, Permission, SongId, Visibility};
use time::Date;

/// A command represents an editor's intent as data only.
///
/// Commands are the only way to request changes to an existing setlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Partially update the editable fields. `None` leaves a field unchanged.
    UpdateDetails {
        /// New title.
        title: Option<String>,
        /// New description.
        description: Option<String>,
        /// New performance date. `Some(None)` clears it.
        performance_date: Option<Option<Date>>,
        /// New venue.
        venue: Option<String>,
        /// New visibility.
        visibility: Option<Visibility>,
    },
    /// Append a song to a set, creating the set when it is the next index.
    AddSong {
        /// Target set.
        set_index: usize,
        /// The referenced song.
        song_id: SongId,
        /// Duration override, already defaulted from the song if needed.
        duration_seconds: Option<u32>,
        /// Performance notes.
        notes: String,
        /// Song title, used only for the change description.
        song_title: Option<String>,
    },
    /// Move an entry within or across sets.
    MoveSong {
        /// Source set.
        from_set_index: usize,
        /// Source entry index.
        from_song_index: usize,
        /// Destination set.
        to_set_index: usize,
        /// Destination position, clamped to the set length.
        to_position: usize,
    },
    /// Remove an entry.
    RemoveSong {
        /// Set of the entry.
        set_index: usize,
        /// Index of the entry.
        song_index: usize,
    },
    /// Edit an entry's duration, notes or played flag.
    UpdateEntry {
        /// Set of the entry.
        set_index: usize,
        /// Index of the entry.
        song_index: usize,
        /// The fields to change.
        patch: EntryPatch,
    },
    /// Rename a set.
    RenameSet {
        /// The set to rename.
        set_index: usize,
        /// The new display name.
        name: String,
    },
    /// Remove a set and all of its entries.
    RemoveSet {
        /// The set to remove.
        set_index: usize,
    },
}

impl Command {
    /// The action name recorded in the version history.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UpdateDetails { .. } => "UpdateDetails",
            Self::AddSong { .. } => "AddSong",
            Self::MoveSong { .. } => "MoveSong",
            Self::RemoveSong { .. } => "RemoveSong",
            Self::UpdateEntry { .. } => "UpdateEntry",
            Self::RenameSet { .. } => "RenameSet",
            Self::RemoveSet { .. } => "RemoveSet",
        }
    }

    /// The band permission a non-owner needs to issue this command.
    #[must_use]
    pub const fn required_permission(&self) -> Permission {
        match self {
            Self::UpdateDetails { .. }
            | Self::AddSong { .. }
            | Self::MoveSong { .. }
            | Self::RemoveSong { .. }
            | Self::UpdateEntry { .. }
            | Self::RenameSet { .. }
            | Self::RemoveSet { .. } => Permission::EditSetlists,
        }
    }
}
