//! Ports and Adapters Infrastructure
//!
//! Storage is reached only through port traits defined in the domain crates.
//! This module holds what every port shares: the error type all adapters
//! report through, the marker trait, and list paging.
//!
//! ```text
//!   import orchestrator / claims service
//!                  │
//!                  ▼
//!        port traits (domain_claims)
//!            ▲               ▲
//!            │               │
//!   PostgreSQL adapter   in-memory store
//!      (infra_db)          (tests only)
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for port operations
///
/// A lookup miss is not an error: ports return `Option` for reads by id.
#[derive(Debug, Error)]
pub enum PortError {
    /// The write conflicts with an existing unique value
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// The write references a record that does not exist
    #[error("Reference violation: {message}")]
    ReferenceViolation {
        message: String,
    },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a ReferenceViolation error
    pub fn reference(message: impl Into<String>) -> Self {
        PortError::ReferenceViolation {
            message: message.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error is a unique-value conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::Conflict { .. })
    }

    /// Returns true if the underlying system could not be reached
    pub fn is_connection(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so they can be shared across tasks.
pub trait DomainPort: Send + Sync + 'static {}

/// Offset/limit window over a list in insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Number of records to skip
    pub offset: u64,
    /// Maximum number of records to return
    pub limit: u64,
}

impl Page {
    /// Creates a page window
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// The first `limit` records
    pub fn first(limit: u64) -> Self {
        Self { offset: 0, limit }
    }

    /// The window that follows this one
    pub fn next(self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first(10)
    }
}
