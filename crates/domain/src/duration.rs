// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Duration aggregation.
//!
//! Set and setlist totals are derived values. They are recomputed from the
//! entries' duration overrides at the end of every mutation and are never
//! treated as an independent source of truth.

use crate::types::{Set, Setlist};

/// Totals produced by [`aggregate_durations`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DurationTotals {
    /// Sum over all sets.
    pub total_seconds: u64,
    /// One total per set, in set order.
    pub per_set_seconds: Vec<u64>,
}

/// Computes set and setlist totals from the entries' durations.
///
/// Pure and deterministic; an absent duration counts as zero.
#[must_use]
pub fn aggregate_durations(sets: &[Set]) -> DurationTotals {
    let per_set_seconds: Vec<u64> = sets
        .iter()
        .map(|set| {
            set.songs
                .iter()
                .map(|entry| u64::from(entry.duration_seconds.unwrap_or(0)))
                .sum()
        })
        .collect();
    let total_seconds: u64 = per_set_seconds.iter().sum();

    DurationTotals {
        total_seconds,
        per_set_seconds,
    }
}

/// Formats seconds as `m:ss`, or `h:mm:ss` from one hour upwards.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let hours: u64 = seconds / 3600;
    let minutes: u64 = (seconds % 3600) / 60;
    let secs: u64 = seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

impl Setlist {
    /// Recomputes and stores the derived set and setlist totals.
    pub fn recompute_durations(&mut self) -> DurationTotals {
        let totals: DurationTotals = aggregate_durations(&self.sets);
        for (set, seconds) in self.sets.iter_mut().zip(&totals.per_set_seconds) {
            set.duration_seconds = *seconds;
        }
        self.total_duration_seconds = totals.total_seconds;
        totals
    }
}
