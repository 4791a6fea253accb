pub mod cli;
pub mod config;
pub mod desktop;
pub mod file;
pub mod logging;
pub mod naming;
pub mod relocate;
pub mod upload;
pub mod watcher;

pub use config::{ErrorPolicy, Settings};
pub use file::ShotFile;
pub use upload::{UploadError, Uploader};
pub use watcher::{ScreenshotWatcher, WatchError};
