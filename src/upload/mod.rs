//! Upload pipeline: rename, transfer, clean up, publish the URL.
//!
//! # Architecture
//!
//! ```text
//! Uploader::upload(file)
//!   1. Connector::connect      agent + SSH session
//!   2. relocate                hashed name, archive or in place
//!   3. RemoteSession::send_file  SCP into remote_path
//!   4. trash                   only without an archive dir
//!   5. Clipboard::set_text     best effort
//!   6. Notifier::notify
//! ```
//!
//! Every step returns an [`UploadError`]; nothing here exits the process.

mod error;
mod pipeline;
pub mod ssh;
mod transport;

pub use error::UploadError;
pub use pipeline::{Uploader, public_url};
pub use ssh::SshConnector;
pub use transport::{Connector, RemoteSession, remote_file_path};
