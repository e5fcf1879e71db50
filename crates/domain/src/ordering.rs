// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ordering engine for songs within and across sets.
//!
//! Song order is always recomputed from array position. After every
//! committed operation each affected set is renumbered so its orders form
//! the contiguous range `1..=N`. No sparse or fractional sort keys are
//! stored, so repeated or stale moves can never collide.

use crate::error::DomainError;
use crate::types::{Set, SetSongEntry, Setlist, SongId, default_set_name};
use crate::validation::validate_set_name;

/// Where an entry ended up after an add or move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SongPosition {
    /// The set index.
    pub set_index: usize,
    /// The zero-based index within the set.
    pub song_index: usize,
}

/// In-place edits to a single entry. `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryPatch {
    /// New duration override. `Some(None)` clears it.
    pub duration_seconds: Option<Option<u32>>,
    /// New performance notes.
    pub notes: Option<String>,
    /// New played flag.
    pub played: Option<bool>,
}

/// Rewrites `order` so it matches positional order, starting at 1.
pub(crate) fn renumber(set: &mut Set) {
    for (order, entry) in (1_u32..).zip(set.songs.iter_mut()) {
        entry.order = order;
    }
}

/// Removes the entry at `index` and renumbers the remainder.
fn detach(set: &mut Set, index: usize) -> SetSongEntry {
    let entry: SetSongEntry = set.songs.remove(index);
    renumber(set);
    entry
}

/// Inserts `entry` at `position` (clamped to the set length) and renumbers.
fn insert(set: &mut Set, position: usize, entry: SetSongEntry) -> usize {
    let position: usize = position.min(set.songs.len());
    set.songs.insert(position, entry);
    renumber(set);
    position
}

impl Setlist {
    fn check_set_index(&self, set_index: usize) -> Result<(), DomainError> {
        if set_index >= self.sets.len() {
            return Err(DomainError::SetIndexOutOfRange {
                index: set_index,
                set_count: self.sets.len(),
            });
        }
        Ok(())
    }

    fn check_song_index(&self, set_index: usize, song_index: usize) -> Result<(), DomainError> {
        self.check_set_index(set_index)?;
        let song_count: usize = self.sets[set_index].songs.len();
        if song_index >= song_count {
            return Err(DomainError::SongIndexOutOfRange {
                set_index,
                index: song_index,
                song_count,
            });
        }
        Ok(())
    }

    /// Appends a song to the set at `set_index`.
    ///
    /// When `set_index` equals the current number of sets a new set with a
    /// positional default name is created first. The entry receives
    /// `order = max + 1`, or 1 in an empty set.
    ///
    /// # Errors
    ///
    /// Returns `SetIndexOutOfRange` if `set_index` would leave a gap.
    pub fn add_song(
        &mut self,
        set_index: usize,
        song_id: SongId,
        duration_seconds: Option<u32>,
        notes: String,
    ) -> Result<SongPosition, DomainError> {
        if set_index > self.sets.len() {
            return Err(DomainError::SetIndexOutOfRange {
                index: set_index,
                set_count: self.sets.len(),
            });
        }
        if set_index == self.sets.len() {
            self.sets.push(Set::new(default_set_name(set_index)));
        }

        let set: &mut Set = &mut self.sets[set_index];
        let order: u32 = set.songs.iter().map(|entry| entry.order).max().unwrap_or(0) + 1;
        set.songs.push(SetSongEntry {
            song_id,
            order,
            duration_seconds,
            notes,
            played: false,
        });

        Ok(SongPosition {
            set_index,
            song_index: set.songs.len() - 1,
        })
    }

    /// Moves an entry to `to_position` in the set at `to_set_index`.
    ///
    /// The entry is detached from its source set (which is renumbered when
    /// it differs from the destination), then inserted at `to_position`
    /// clamped to `[0, len]` and the destination is renumbered. Entries not
    /// involved keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns an invalid-reference error if either set index or the source
    /// song index is out of range. Nothing is modified in that case.
    pub fn move_song(
        &mut self,
        from_set_index: usize,
        from_song_index: usize,
        to_set_index: usize,
        to_position: usize,
    ) -> Result<SongPosition, DomainError> {
        self.check_song_index(from_set_index, from_song_index)?;
        self.check_set_index(to_set_index)?;

        let entry: SetSongEntry = detach(&mut self.sets[from_set_index], from_song_index);
        let song_index: usize = insert(&mut self.sets[to_set_index], to_position, entry);

        Ok(SongPosition {
            set_index: to_set_index,
            song_index,
        })
    }

    /// Removes an entry and renumbers the rest of its set.
    ///
    /// # Errors
    ///
    /// Returns an invalid-reference error if either index is out of range.
    pub fn remove_song(
        &mut self,
        set_index: usize,
        song_index: usize,
    ) -> Result<SetSongEntry, DomainError> {
        self.check_song_index(set_index, song_index)?;
        Ok(detach(&mut self.sets[set_index], song_index))
    }

    /// Edits an entry in place. Order is unaffected.
    ///
    /// # Errors
    ///
    /// Returns an invalid-reference error if either index is out of range.
    pub fn update_entry(
        &mut self,
        set_index: usize,
        song_index: usize,
        patch: &EntryPatch,
    ) -> Result<(), DomainError> {
        self.check_song_index(set_index, song_index)?;
        let entry: &mut SetSongEntry = &mut self.sets[set_index].songs[song_index];
        if let Some(duration_seconds) = patch.duration_seconds {
            entry.duration_seconds = duration_seconds;
        }
        if let Some(notes) = &patch.notes {
            entry.notes.clone_from(notes);
        }
        if let Some(played) = patch.played {
            entry.played = played;
        }
        Ok(())
    }

    /// Renames a set.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range or the name is invalid.
    pub fn rename_set(&mut self, set_index: usize, name: &str) -> Result<(), DomainError> {
        self.check_set_index(set_index)?;
        validate_set_name(name)?;
        self.sets[set_index].name = name.trim().to_string();
        Ok(())
    }

    /// Removes a set with all of its entries. Later sets shift down by one.
    ///
    /// Shifted sets still carrying their positional default name are
    /// relabelled for their new position; renamed sets keep their name.
    ///
    /// # Errors
    ///
    /// Returns an invalid-reference error if the index is out of range.
    pub fn remove_set(&mut self, set_index: usize) -> Result<Set, DomainError> {
        self.check_set_index(set_index)?;
        let removed: Set = self.sets.remove(set_index);
        for (index, set) in self.sets.iter_mut().enumerate().skip(set_index) {
            if set.name == default_set_name(index + 1) {
                set.name = default_set_name(index);
            }
        }
        Ok(removed)
    }
}
