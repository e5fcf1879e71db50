// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gigbook_domain::DomainError;

/// Why a command could not be applied to a setlist.
///
/// Nothing is committed for either kind; the distinction only tells the
/// caller whether the request pointed at something that is not there or
/// asked for a change the setlist's rules forbid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A set index, song index, or referenced id does not resolve.
    InvalidReference(DomainError),
    /// A field value or setlist rule was rejected.
    DomainViolation(DomainError),
}

impl CoreError {
    /// The underlying domain error.
    #[must_use]
    pub const fn domain_error(&self) -> &DomainError {
        match self {
            Self::InvalidReference(err) | Self::DomainViolation(err) => err,
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidReference(err) => write!(f, "Invalid reference: {err}"),
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        if err.is_invalid_reference() {
            Self::InvalidReference(err)
        } else {
            Self::DomainViolation(err)
        }
    }
}
