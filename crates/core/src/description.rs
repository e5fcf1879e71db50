// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Human-readable change descriptions.
//!
//! Descriptions are best effort. Whenever a summary cannot be produced the
//! caller records the generic fallback instead of failing the commit.

use crate::command::Command;
use gigbook_domain::{SetSongEntry, Setlist};

fn set_name(setlist: &Setlist, set_index: usize) -> Option<&str> {
    setlist.sets().get(set_index).map(|set| set.name.as_str())
}

fn entry(setlist: &Setlist, set_index: usize, song_index: usize) -> Option<&SetSongEntry> {
    setlist.sets().get(set_index)?.songs().get(song_index)
}

fn changed_fields(previous: &Setlist, next: &Setlist) -> Vec<&'static str> {
    let before = &previous.details;
    let after = &next.details;
    let mut fields: Vec<&'static str> = Vec::new();
    if before.title != after.title {
        fields.push("title");
    }
    if before.description != after.description {
        fields.push("description");
    }
    if before.performance_date != after.performance_date {
        fields.push("performance date");
    }
    if before.venue != after.venue {
        fields.push("venue");
    }
    if before.visibility != after.visibility {
        fields.push("visibility");
    }
    fields
}

/// Summarizes a change that has already been applied.
///
/// # Arguments
///
/// * `previous` - The setlist before the change
/// * `next` - The setlist after the change
/// * `command` - The command that was applied
///
/// # Returns
///
/// `None` when no meaningful summary can be produced, for example when an
/// update changed nothing.
#[must_use]
pub fn describe(previous: &Setlist, next: &Setlist, command: &Command) -> Option<String> {
    match command {
        Command::UpdateDetails { .. } => {
            let fields: Vec<&'static str> = changed_fields(previous, next);
            if fields.is_empty() {
                return None;
            }
            Some(format!("updated {}", fields.join(", ")))
        }
        Command::AddSong {
            set_index,
            song_id,
            song_title,
            ..
        } => {
            let label: &str = song_title.as_deref().unwrap_or_else(|| song_id.as_str());
            Some(format!(
                "added '{label}' to {}",
                set_name(next, *set_index)?
            ))
        }
        Command::MoveSong {
            from_set_index,
            from_song_index,
            to_set_index,
            to_position,
        } => {
            let moved: &SetSongEntry = entry(previous, *from_set_index, *from_song_index)?;
            // Insertion clamps to the destination length after the entry left it.
            let destination_len: usize = next.sets().get(*to_set_index)?.songs().len();
            let position: usize = (*to_position).min(destination_len.checked_sub(1)?);
            if from_set_index == to_set_index {
                Some(format!(
                    "moved '{}' to position {} in {}",
                    moved.song_id,
                    position + 1,
                    set_name(next, *to_set_index)?
                ))
            } else {
                Some(format!(
                    "moved '{}' from {} to {} at position {}",
                    moved.song_id,
                    set_name(previous, *from_set_index)?,
                    set_name(next, *to_set_index)?,
                    position + 1
                ))
            }
        }
        Command::RemoveSong {
            set_index,
            song_index,
        } => {
            let removed: &SetSongEntry = entry(previous, *set_index, *song_index)?;
            Some(format!(
                "removed '{}' from {}",
                removed.song_id,
                set_name(previous, *set_index)?
            ))
        }
        Command::UpdateEntry {
            set_index,
            song_index,
            patch,
        } => {
            let edited: &SetSongEntry = entry(next, *set_index, *song_index)?;
            let mut fields: Vec<&'static str> = Vec::new();
            if patch.duration_seconds.is_some() {
                fields.push("duration");
            }
            if patch.notes.is_some() {
                fields.push("notes");
            }
            if let Some(played) = patch.played {
                fields.push(if played {
                    "marked played"
                } else {
                    "marked not played"
                });
            }
            if fields.is_empty() {
                return None;
            }
            Some(format!(
                "updated '{}' in {}: {}",
                edited.song_id,
                set_name(next, *set_index)?,
                fields.join(", ")
            ))
        }
        Command::RenameSet { set_index, .. } => Some(format!(
            "renamed {} to {}",
            set_name(previous, *set_index)?,
            set_name(next, *set_index)?
        )),
        Command::RemoveSet { set_index } => {
            let removed = previous.sets().get(*set_index)?;
            Some(format!(
                "removed {} ({} songs)",
                removed.name,
                removed.songs().len()
            ))
        }
    }
}
