// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested setlist was not found.
    SetlistNotFound(String),
    /// The stored setlist moved on since the transition was computed.
    VersionConflict {
        /// The setlist that was being updated.
        setlist_id: String,
        /// The version the transition was computed from.
        expected: u64,
        /// The version currently stored.
        found: u64,
    },
    /// A stored row could not be turned back into a domain value.
    CorruptRecord(String),
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::SetlistNotFound(id) => write!(f, "Setlist not found: {id}"),
            Self::VersionConflict {
                setlist_id,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Setlist {setlist_id} was modified concurrently: expected version {expected}, found {found}"
                )
            }
            Self::CorruptRecord(msg) => write!(f, "Corrupt record: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<time::error::Parse> for PersistenceError {
    fn from(err: time::error::Parse) -> Self {
        Self::CorruptRecord(format!("Invalid stored timestamp: {err}"))
    }
}

impl From<time::error::Format> for PersistenceError {
    fn from(err: time::error::Format) -> Self {
        Self::SerializationError(format!("Failed to format timestamp: {err}"))
    }
}
