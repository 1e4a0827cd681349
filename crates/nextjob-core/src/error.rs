//! Error types for the My Next Job client.

use serde::Serialize;
use thiserror::Error;

/// Data-integrity problems detected on the client that it must not correct on its own.
#[derive(Error, Debug, Clone, Serialize)]
pub enum Anomaly {
    /// More than one job role came back with `is_active = true`.
    #[error("{} job roles are marked active: {role_ids:?}", .role_ids.len())]
    MultipleActiveRoles { role_ids: Vec<i64> },

    /// The create step of a rename failed and restoring the old record failed too.
    /// Neither the old nor the new record exists on the server.
    #[error(
        "rename of '{old_key}' to '{new_key}' failed ({cause}) and restoring '{old_key}' also failed ({compensation})"
    )]
    RenameCompensationFailed {
        old_key: String,
        new_key: String,
        cause: Box<NextJobError>,
        compensation: Box<NextJobError>,
    },
}

/// A shared error type for every crate of the workspace.
#[derive(Error, Debug, Clone, Serialize)]
pub enum NextJobError {
    /// Client-side precondition failure. No request was issued.
    #[error("Validation error: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Transport failure, no response was obtained.
    #[error("Network error: {message}")]
    Network { message: String },

    /// A response arrived with a non-success status.
    #[error("Server error ({status}){}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Server { status: u16, detail: Option<String> },

    /// The caller cancelled the request before a response arrived.
    #[error("Request cancelled")]
    Cancelled,

    /// A rename failed on its create step; the old record was restored.
    #[error("Rename of '{old_key}' to '{new_key}' failed and was rolled back: {cause}")]
    RenameRolledBack {
        old_key: String,
        new_key: String,
        cause: Box<NextJobError>,
    },

    /// Inconsistent state that needs a decision this client does not own.
    #[error("Consistency anomaly: {0}")]
    ConsistencyAnomaly(Anomaly),

    /// A record is not present in the local snapshot.
    #[error("Entity not found: {entity_type} '{key}'")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl NextJobError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error for the given input field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a Server error
    pub fn server(status: u16, detail: Option<String>) -> Self {
        Self::Server { status, detail }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            key: key.to_string(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn is_anomaly(&self) -> bool {
        matches!(self, Self::ConsistencyAnomaly(_))
    }

    /// Returns the error that started a failed rename, or `self` for anything else.
    ///
    /// Rename failures wrap the create-step error; callers that want to show
    /// "what went wrong" rather than "what the client did about it" use this.
    pub fn root_cause(&self) -> &NextJobError {
        match self {
            Self::RenameRolledBack { cause, .. } => cause.root_cause(),
            Self::ConsistencyAnomaly(Anomaly::RenameCompensationFailed { cause, .. }) => {
                cause.root_cause()
            }
            other => other,
        }
    }

    /// Whether a failed rename left the server in its pre-rename state.
    ///
    /// `None` when this error did not come out of a rename's create step.
    pub fn rename_compensated(&self) -> Option<bool> {
        match self {
            Self::RenameRolledBack { .. } => Some(true),
            Self::ConsistencyAnomaly(Anomaly::RenameCompensationFailed { .. }) => Some(false),
            _ => None,
        }
    }

    /// Text suitable for showing to the user.
    ///
    /// Server errors prefer the server's own `detail` message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Server {
                status,
                detail: None,
            } => match status {
                404 => "The requested item no longer exists".to_string(),
                409 => "The item already exists".to_string(),
                400..=499 => format!("The request was rejected (status {status})"),
                _ => format!("The server failed to process the request (status {status})"),
            },
            Self::Network { .. } => "Could not reach the server".to_string(),
            Self::RenameRolledBack { cause, .. } => cause.user_message(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<Anomaly> for NextJobError {
    fn from(anomaly: Anomaly) -> Self {
        Self::ConsistencyAnomaly(anomaly)
    }
}

impl From<std::io::Error> for NextJobError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for NextJobError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for NextJobError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, NextJobError>`.
pub type Result<T> = std::result::Result<T, NextJobError>;
