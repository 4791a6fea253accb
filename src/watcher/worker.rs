//! Single consumer of the upload queue.
//!
//! Exactly one upload runs at a time: the worker awaits each pipeline run
//! on the blocking pool before taking the next file.

use tokio::sync::mpsc;

use crate::config::ErrorPolicy;
use crate::file::ShotFile;
use crate::upload::Uploader;

use super::WatchError;

/// Queue depth between the watch loop and the worker.
pub const UPLOAD_QUEUE_DEPTH: usize = 32;

/// Drains the upload queue through an [`Uploader`].
pub struct UploadWorker {
    uploader: Uploader,
    queue: mpsc::Receiver<ShotFile>,
    policy: ErrorPolicy,
}

impl UploadWorker {
    pub fn new(uploader: Uploader, queue: mpsc::Receiver<ShotFile>) -> Self {
        let policy = uploader.settings().on_error;
        Self {
            uploader,
            queue,
            policy,
        }
    }

    /// Run until the queue is closed and empty.
    ///
    /// With [`ErrorPolicy::Exit`] the first failed upload ends the worker
    /// with an error; queued files are left untouched.
    pub async fn run(mut self) -> Result<usize, WatchError> {
        let mut uploaded = 0;

        while let Some(file) = self.queue.recv().await {
            let path = file.path.clone();
            let uploader = self.uploader;

            let (uploader, result) = tokio::task::spawn_blocking(move || {
                let mut uploader = uploader;
                let result = uploader.upload(file);
                (uploader, result)
            })
            .await
            .map_err(|e| WatchError::WorkerFailed {
                reason: e.to_string(),
            })?;
            self.uploader = uploader;

            match result {
                Ok(_) => uploaded += 1,
                Err(e) => {
                    if e.is_setup_failure() {
                        tracing::warn!("[upload] {} was not touched", path.display());
                    }
                    match self.policy {
                        ErrorPolicy::Exit => {
                            return Err(WatchError::UploadFailed { path, source: e });
                        }
                        ErrorPolicy::Continue => {
                            tracing::error!("[upload] {} failed: {e}", path.display());
                        }
                    }
                }
            }
        }

        crate::debug_event!("upload", "queue closed", "{uploaded} uploaded");
        Ok(uploaded)
    }
}
