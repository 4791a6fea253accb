//! Turns raw filesystem events into queued uploads.

use notify::{Event, EventKind};
use tokio::sync::mpsc;

use crate::file::ShotFile;

use super::{FileFilter, WatchError};

/// Routes creation events for matching files onto the upload queue.
pub struct EventRouter {
    filter: FileFilter,
    queue: mpsc::Sender<ShotFile>,
}

impl EventRouter {
    pub fn new(filter: FileFilter, queue: mpsc::Sender<ShotFile>) -> Self {
        Self { filter, queue }
    }

    /// Queue every matching file created by `event`.
    ///
    /// Returns the number of files queued. Waits while the queue is full.
    pub async fn route(&self, event: Event) -> Result<usize, WatchError> {
        if !matches!(event.kind, EventKind::Create(_)) {
            crate::debug_event!("watcher", "ignored", "{:?}", event.kind);
            return Ok(0);
        }

        let mut queued = 0;
        for path in event.paths {
            if !self.filter.matches(&path) {
                crate::debug_event!("watcher", "unmatched", "{}", path.display());
                continue;
            }

            crate::log_event!("watcher", "new file", "{}", path.display());
            self.queue
                .send(ShotFile::from_path(path))
                .await
                .map_err(|_| WatchError::QueueClosed)?;
            queued += 1;
        }

        Ok(queued)
    }
}
