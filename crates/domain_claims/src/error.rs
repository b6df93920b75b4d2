//! Claims domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("{entity} with {field} {value} already exists")]
    DuplicateKey {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{entity} not found: {id}")]
    ReferenceNotFound {
        entity: &'static str,
        id: String,
    },

    #[error(transparent)]
    Store(#[from] PortError),
}
