// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod band;
mod duration;
mod error;
mod ordering;
mod song;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use band::{Band, BandMember, BandRole, Permission};
pub use duration::{DurationTotals, aggregate_durations, format_duration};
pub use error::DomainError;
pub use ordering::{EntryPatch, SongPosition};
pub use song::Song;
pub use types::{
    AccessScope, BandId, Set, SetSongEntry, Setlist, SetlistDetails, SetlistId, SetlistParts,
    SongId, Visibility, default_set_name,
};
pub use validation::{
    MAX_TITLE_LENGTH, format_performance_date, parse_performance_date, validate_description,
    validate_set_name, validate_title, validate_venue,
};
