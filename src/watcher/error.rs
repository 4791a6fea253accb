//! Error types for the screenshot watcher.

use std::path::PathBuf;
use thiserror::Error;

use crate::upload::UploadError;

/// Errors from watcher operations.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to initialize watcher: {reason}")]
    InitFailed { reason: String },

    #[error("Cannot watch path {path}: {reason}")]
    PathWatchFailed { path: PathBuf, reason: String },

    #[error("Invalid filter pattern '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Upload of {path} failed: {source}")]
    UploadFailed {
        path: PathBuf,
        #[source]
        source: UploadError,
    },

    #[error("Upload worker stopped: {reason}")]
    WorkerFailed { reason: String },

    #[error("Upload queue closed")]
    QueueClosed,

    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

impl From<notify::Error> for WatchError {
    fn from(e: notify::Error) -> Self {
        WatchError::InitFailed {
            reason: e.to_string(),
        }
    }
}
