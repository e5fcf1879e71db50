// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use gigbook_audit::Actor;
use gigbook_domain::{
    BandId, Setlist, SetlistDetails, SetlistId, Visibility, validate_description, validate_title,
    validate_venue,
};
use time::{Date, OffsetDateTime};
use tracing::info;

/// The caller-supplied fields of a new setlist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewSetlist {
    /// Title. Required.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Date of the performance.
    pub performance_date: Option<Date>,
    /// Venue name.
    pub venue: String,
    /// Visibility flag.
    pub visibility: Visibility,
    /// Owning band, if the setlist belongs to one.
    pub band_id: Option<BandId>,
}

/// Creates a new setlist owned by `owner`.
///
/// The setlist receives a fresh identifier, no sets, and version 1 with its
/// creation record. Band existence and permissions are checked by the caller.
///
/// # Errors
///
/// Returns an error if the title, description or venue is invalid.
pub fn create_setlist(
    new_setlist: NewSetlist,
    owner: &Actor,
    timestamp: OffsetDateTime,
) -> Result<Setlist, CoreError> {
    validate_title(&new_setlist.title)?;
    validate_description(&new_setlist.description)?;
    validate_venue(&new_setlist.venue)?;

    let details: SetlistDetails = SetlistDetails {
        title: new_setlist.title.trim().to_string(),
        description: new_setlist.description,
        performance_date: new_setlist.performance_date,
        venue: new_setlist.venue.trim().to_string(),
        visibility: new_setlist.visibility,
    };

    let setlist: Setlist = Setlist::new(
        SetlistId::generate(),
        details,
        owner,
        new_setlist.band_id,
        timestamp,
    );
    info!(
        setlist_id = %setlist.id(),
        owner = %owner.id,
        band_id = ?setlist.band_id(),
        "Created setlist"
    );
    Ok(setlist)
}
