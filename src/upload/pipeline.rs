//! The per-file upload sequence.

use crate::config::Settings;
use crate::desktop::{Clipboard, DesktopNotifier, Notifier, SystemClipboard};
use crate::file::ShotFile;
use crate::naming;
use crate::relocate::{relocate, trash};

use super::{Connector, SshConnector, UploadError};

/// Runs the upload pipeline for one file at a time.
///
/// Owns its collaborators so it can be moved onto a blocking thread.
pub struct Uploader {
    settings: Settings,
    connector: Box<dyn Connector>,
    clipboard: Box<dyn Clipboard>,
    notifier: Box<dyn Notifier>,
}

impl Uploader {
    pub fn new(
        settings: Settings,
        connector: Box<dyn Connector>,
        clipboard: Box<dyn Clipboard>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            settings,
            connector,
            clipboard,
            notifier,
        }
    }

    /// Uploader wired to SSH, the system clipboard and desktop notifications.
    pub fn system(settings: Settings) -> Self {
        let notifier = DesktopNotifier::new(settings.notification.clone());
        Self::new(
            settings,
            Box::new(SshConnector::new()),
            Box::new(SystemClipboard::new()),
            Box::new(notifier),
        )
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Upload `file` and return its final descriptor with the public URL.
    ///
    /// Without an archive directory the returned path no longer exists.
    /// A failure leaves the file wherever the last successful step put it.
    pub fn upload(&mut self, file: ShotFile) -> Result<ShotFile, UploadError> {
        crate::log_event!("upload", "start", "{}", file.path.display());

        let mut session = self.connector.connect(&self.settings)?;

        let file = relocate(&self.settings, &file, naming::unix_now())?;

        let remote = session.send_file(&file.path, &self.settings.remote_path, &file.name)?;
        crate::log_event!(
            "upload",
            "sent",
            "{} -> {}:{remote}",
            file.name,
            self.settings.hostname
        );

        if self.settings.archive_dir().is_none() {
            trash(&file).map_err(UploadError::Deletion)?;
            crate::debug_event!("upload", "removed local copy", "{}", file.path.display());
        } else {
            crate::debug_event!("upload", "archived", "{}", file.path.display());
        }

        let url = public_url(&self.settings.remote_url, &file.name);

        if let Err(e) = self.clipboard.set_text(&url) {
            tracing::warn!("[upload] could not copy URL to clipboard: {e}");
        }

        if self.settings.notification.enabled {
            self.notifier
                .notify(&url)
                .map_err(UploadError::Notification)?;
        }

        crate::log_event!("upload", "done", "{url}");
        Ok(ShotFile {
            url: Some(url),
            ..file
        })
    }
}

/// Public URL of an uploaded file: `{prefix}/{name}`.
pub fn public_url(prefix: &str, name: &str) -> String {
    format!("{prefix}/{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url() {
        assert_eq!(
            public_url("https://example.com/s", "abc.png"),
            "https://example.com/s/abc.png"
        );
    }
}
