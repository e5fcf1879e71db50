// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::description::describe;
use crate::error::CoreError;
use crate::state::TransitionResult;
use crate::version::commit;
use gigbook_audit::{Actor, VersionRecord};
use gigbook_domain::{Setlist, validate_description, validate_title, validate_venue};
use time::OffsetDateTime;

/// Applies the structural part of a command to `setlist` in place.
fn mutate(setlist: &mut Setlist, command: &Command) -> Result<(), CoreError> {
    match command {
        Command::UpdateDetails {
            title,
            description,
            performance_date,
            venue,
            visibility,
        } => {
            // Validate everything before touching any field.
            if let Some(title) = title {
                validate_title(title)?;
            }
            if let Some(description) = description {
                validate_description(description)?;
            }
            if let Some(venue) = venue {
                validate_venue(venue)?;
            }

            if let Some(title) = title {
                setlist.details.title = title.trim().to_string();
            }
            if let Some(description) = description {
                setlist.details.description.clone_from(description);
            }
            if let Some(performance_date) = performance_date {
                setlist.details.performance_date = *performance_date;
            }
            if let Some(venue) = venue {
                setlist.details.venue = venue.trim().to_string();
            }
            if let Some(visibility) = visibility {
                setlist.details.visibility = *visibility;
            }
        }
        Command::AddSong {
            set_index,
            song_id,
            duration_seconds,
            notes,
            ..
        } => {
            setlist.add_song(*set_index, song_id.clone(), *duration_seconds, notes.clone())?;
        }
        Command::MoveSong {
            from_set_index,
            from_song_index,
            to_set_index,
            to_position,
        } => {
            setlist.move_song(*from_set_index, *from_song_index, *to_set_index, *to_position)?;
        }
        Command::RemoveSong {
            set_index,
            song_index,
        } => {
            setlist.remove_song(*set_index, *song_index)?;
        }
        Command::UpdateEntry {
            set_index,
            song_index,
            patch,
        } => {
            setlist.update_entry(*set_index, *song_index, patch)?;
        }
        Command::RenameSet { set_index, name } => {
            setlist.rename_set(*set_index, name)?;
        }
        Command::RemoveSet { set_index } => {
            setlist.remove_set(*set_index)?;
        }
    }
    Ok(())
}

/// Applies a command to a setlist, producing a new setlist and its version record.
///
/// The pipeline is fixed: the structural change is applied to a copy,
/// durations are recomputed, the change is described, and finally the
/// version record is committed. The input is never modified, so a failed
/// command leaves no trace.
///
/// # Arguments
///
/// * `setlist` - The current setlist (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `timestamp` - The commit time
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new setlist and version record
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - A set or song index is out of range
/// - A field value fails validation
pub fn apply(
    setlist: &Setlist,
    command: &Command,
    actor: &Actor,
    timestamp: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let mut new_setlist: Setlist = setlist.clone();
    mutate(&mut new_setlist, command)?;
    new_setlist.recompute_durations();

    let description: Option<String> = describe(setlist, &new_setlist, command);
    let record: VersionRecord = commit(
        &mut new_setlist,
        actor,
        timestamp,
        command.name(),
        description,
    );

    Ok(TransitionResult {
        new_setlist,
        record,
        previous_version: setlist.version(),
    })
}
