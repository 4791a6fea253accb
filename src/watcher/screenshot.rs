//! Directory watcher feeding the upload queue.

use std::future::Future;
use std::path::PathBuf;

use notify::{Event, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::Settings;
use crate::file::ShotFile;
use crate::upload::Uploader;

use super::error::WatchError;
use super::filter::FileFilter;
use super::router::EventRouter;
use super::worker::{UPLOAD_QUEUE_DEPTH, UploadWorker};

/// Capacity of the channel between notify's thread and the watch loop.
const EVENT_CHANNEL_SIZE: usize = 100;

/// Watches one directory (non-recursive) for newly created files.
pub struct ScreenshotWatcher {
    /// Directory being watched.
    watch_dir: PathBuf,
    /// Filter and queue for matching files.
    router: EventRouter,
    /// Channel for receiving file events.
    event_rx: mpsc::Receiver<notify::Result<Event>>,
    /// The underlying file watcher.
    _watcher: notify::RecommendedWatcher,
}

impl ScreenshotWatcher {
    /// Subscribe to `settings.local_path`, queueing matches onto `queue`.
    pub fn new(settings: &Settings, queue: mpsc::Sender<ShotFile>) -> Result<Self, WatchError> {
        let filter = FileFilter::new(&settings.filter)?;
        let watch_dir = settings.local_path.clone();

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.blocking_send(res);
        })?;

        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .map_err(|e| WatchError::PathWatchFailed {
                path: watch_dir.clone(),
                reason: e.to_string(),
            })?;

        crate::debug_event!("watcher", "filter", "{}", filter.as_str());

        Ok(Self {
            watch_dir,
            router: EventRouter::new(filter, queue),
            event_rx: rx,
            _watcher: watcher,
        })
    }

    /// Main event loop. Returns when `shutdown` resolves.
    ///
    /// Shutdown is honoured even while waiting for room on a full upload
    /// queue. Subscription errors are logged and do not stop the loop. Dropping
    /// the watcher on return closes the upload queue.
    pub async fn watch(mut self, shutdown: impl Future<Output = ()>) -> Result<(), WatchError> {
        crate::log_event!("watcher", "started", "{}", self.watch_dir.display());
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    crate::log_event!("watcher", "stopping");
                    return Ok(());
                }

                res = self.event_rx.recv() => {
                    match res {
                        Some(Ok(event)) => {
                            // Routing waits while the upload queue is full
                            tokio::select! {
                                _ = &mut shutdown => {
                                    crate::log_event!("watcher", "stopping");
                                    return Ok(());
                                }
                                routed = self.router.route(event) => {
                                    routed?;
                                }
                            }
                        }
                        Some(Err(e)) => {
                            tracing::error!("[watcher] file watch error: {e}");
                        }
                        None => return Err(WatchError::ChannelClosed),
                    }
                }
            }
        }
    }
}

/// Watch `settings.local_path` and upload matches until `shutdown`
/// resolves or an upload fails under [`ErrorPolicy::Exit`].
///
/// On shutdown, files already queued are still uploaded before returning.
///
/// [`ErrorPolicy::Exit`]: crate::config::ErrorPolicy::Exit
pub async fn run(
    uploader: Uploader,
    shutdown: impl Future<Output = ()>,
) -> Result<usize, WatchError> {
    let (queue_tx, queue_rx) = mpsc::channel(UPLOAD_QUEUE_DEPTH);
    let watcher = ScreenshotWatcher::new(uploader.settings(), queue_tx)?;

    let mut worker = tokio::spawn(UploadWorker::new(uploader, queue_rx).run());
    let watch = watcher.watch(shutdown);
    tokio::pin!(watch);

    let joined = tokio::select! {
        result = &mut watch => match result {
            // A closed queue means the worker stopped; its result says why
            Ok(()) | Err(WatchError::QueueClosed) => (&mut worker).await,
            Err(e) => return Err(e),
        },
        joined = &mut worker => joined,
    };

    joined.map_err(|e| WatchError::WorkerFailed {
        reason: e.to_string(),
    })?
}
