//! Error types for the upload pipeline.

use std::path::PathBuf;
use thiserror::Error;

use crate::desktop::DesktopError;
use crate::naming::NamingError;
use crate::relocate::RelocateError;

/// Errors from a single run of the upload pipeline.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("failed to connect to SSH agent: {source}")]
    AgentUnavailable {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to connect to {address}: {source}")]
    Connection {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error generating filename: {0}")]
    Naming(#[source] NamingError),

    #[error("rename failed: {0}")]
    Rename(#[source] RelocateError),

    #[error("failed to copy {path} to {remote}: {source}")]
    Transfer {
        path: PathBuf,
        remote: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cleanup failed: {0}")]
    Deletion(#[source] RelocateError),

    #[error("{0}")]
    Notification(#[source] DesktopError),
}

impl From<RelocateError> for UploadError {
    fn from(e: RelocateError) -> Self {
        match e {
            RelocateError::Naming(inner) => UploadError::Naming(inner),
            RelocateError::Delete { .. } => UploadError::Deletion(e),
            RelocateError::Rename { .. } => UploadError::Rename(e),
        }
    }
}

impl UploadError {
    /// Errors raised before the local file was touched.
    pub fn is_setup_failure(&self) -> bool {
        matches!(
            self,
            UploadError::AgentUnavailable { .. } | UploadError::Connection { .. }
        )
    }
}
