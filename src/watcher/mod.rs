//! Directory watcher driving the upload pipeline.
//!
//! # Architecture
//!
//! ```text
//! notify::RecommendedWatcher (non-recursive, local_path)
//!         |  mpsc
//! ScreenshotWatcher loop --- EventRouter (Create + FileFilter)
//!         |  bounded queue
//! UploadWorker --- spawn_blocking(Uploader::upload), one at a time
//! ```

mod error;
mod filter;
mod router;
mod screenshot;
mod worker;

pub use error::WatchError;
pub use filter::FileFilter;
pub use router::EventRouter;
pub use screenshot::{ScreenshotWatcher, run};
pub use worker::{UPLOAD_QUEUE_DEPTH, UploadWorker};
