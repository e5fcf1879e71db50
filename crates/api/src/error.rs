// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use gigbook::CoreError;
use gigbook_domain::DomainError;
use gigbook_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No usable actor identity was supplied.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The access evaluator refused the request.
    AccessDenied {
        /// The action that was attempted.
        action: String,
        /// The setlist or band the action targeted.
        target: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::AccessDenied { action, target } => {
                write!(f, "Access denied: '{action}' is not permitted on {target}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The actor may not perform this action on this setlist.
    AccessDenied {
        /// The action that was attempted.
        action: String,
        /// The setlist or band the action targeted.
        target: String,
    },
    /// An index or id does not refer to anything. Surfaced verbatim.
    InvalidReference {
        /// A human-readable description of the bad reference.
        message: String,
    },
    /// The setlist changed between load and commit.
    VersionConflict {
        /// The setlist being edited.
        setlist_id: String,
        /// The version the edit was computed from.
        expected: u64,
        /// The version now stored.
        found: u64,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::AccessDenied { action, target } => {
                write!(f, "Access denied: '{action}' is not permitted on {target}")
            }
            Self::InvalidReference { message } => write!(f, "Invalid reference: {message}"),
            Self::VersionConflict {
                setlist_id,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Setlist {setlist_id} was changed by someone else (expected version {expected}, found {found}); reload and retry"
                )
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::AccessDenied { action, target } => Self::AccessDenied { action, target },
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

fn invalid_input(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// Bad references keep their original message so callers can show it as is.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    if err.is_invalid_reference() {
        return ApiError::InvalidReference {
            message: err.to_string(),
        };
    }
    match err {
        DomainError::InvalidTitle(msg) => invalid_input("title", msg),
        DomainError::InvalidSetName(msg) => invalid_input("name", msg),
        DomainError::InvalidVenue(msg) => invalid_input("venue", msg),
        DomainError::InvalidDescription(msg) => invalid_input("description", msg),
        DomainError::InvalidVisibility(value) => invalid_input(
            "visibility",
            format!("'{value}' must be 'public' or 'private'"),
        ),
        DomainError::InvalidBandRole(value) => {
            invalid_input("role", format!("'{value}' is not a band role"))
        }
        DomainError::InvalidPermission(value) => {
            invalid_input("permission", format!("'{value}' is not a band permission"))
        }
        DomainError::DateParseError { date_string, error } => invalid_input(
            "performance_date",
            format!("Failed to parse date '{date_string}': {error}"),
        ),
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::InvalidReference(domain_err) => ApiError::InvalidReference {
            message: domain_err.to_string(),
        },
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// A lost compare-and-swap becomes [`ApiError::VersionConflict`]; anything
/// unexpected from the store is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::SetlistNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Setlist"),
            message: format!("Setlist '{id}' does not exist"),
        },
        PersistenceError::VersionConflict {
            setlist_id,
            expected,
            found,
        } => ApiError::VersionConflict {
            setlist_id,
            expected,
            found,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
