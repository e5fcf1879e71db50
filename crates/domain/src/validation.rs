// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Maximum title length, in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

const MAX_SET_NAME_LENGTH: usize = 100;
const MAX_VENUE_LENGTH: usize = 200;
const MAX_DESCRIPTION_LENGTH: usize = 2000;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Validates a setlist title.
///
/// # Errors
///
/// Returns an error if the title is blank or longer than [`MAX_TITLE_LENGTH`].
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    let trimmed: &str = title.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(DomainError::InvalidTitle(format!(
            "Title cannot exceed {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates a set display name.
///
/// # Errors
///
/// Returns an error if the name is blank or too long.
pub fn validate_set_name(name: &str) -> Result<(), DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidSetName(String::from(
            "Set name cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_SET_NAME_LENGTH {
        return Err(DomainError::InvalidSetName(format!(
            "Set name cannot exceed {MAX_SET_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates a venue name. Empty is allowed.
///
/// # Errors
///
/// Returns an error if the venue is too long.
pub fn validate_venue(venue: &str) -> Result<(), DomainError> {
    if venue.trim().chars().count() > MAX_VENUE_LENGTH {
        return Err(DomainError::InvalidVenue(format!(
            "Venue cannot exceed {MAX_VENUE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates a description. Empty is allowed.
///
/// # Errors
///
/// Returns an error if the description is too long.
pub fn validate_description(description: &str) -> Result<(), DomainError> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(DomainError::InvalidDescription(format!(
            "Description cannot exceed {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` performance date.
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date.
pub fn parse_performance_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a performance date as `YYYY-MM-DD`.
#[must_use]
pub fn format_performance_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}
