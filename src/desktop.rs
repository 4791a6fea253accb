//! Clipboard and desktop notification seams.
//!
//! The pipeline talks to the desktop through [`Clipboard`] and [`Notifier`]
//! so tests can record calls instead of touching the real session.

use thiserror::Error;

use crate::config::NotificationConfig;

#[derive(Error, Debug)]
pub enum DesktopError {
    #[error("clipboard unavailable: {reason}")]
    Clipboard { reason: String },

    #[error("notification failed: {reason}")]
    Notification { reason: String },
}

impl From<arboard::Error> for DesktopError {
    fn from(e: arboard::Error) -> Self {
        DesktopError::Clipboard {
            reason: e.to_string(),
        }
    }
}

impl From<notify_rust::error::Error> for DesktopError {
    fn from(e: notify_rust::error::Error) -> Self {
        DesktopError::Notification {
            reason: e.to_string(),
        }
    }
}

/// Somewhere to put the uploaded URL.
pub trait Clipboard: Send {
    fn set_text(&mut self, text: &str) -> Result<(), DesktopError>;
}

/// Announces a finished upload.
pub trait Notifier: Send {
    fn notify(&mut self, url: &str) -> Result<(), DesktopError>;
}

/// The system clipboard.
///
/// The handle is opened on first write and kept for the lifetime of the
/// owner. On X11 and Wayland the copied text is served by this handle and
/// disappears once it is dropped, unless a clipboard manager took it over.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a handle to the system clipboard is currently held.
    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), DesktopError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        self.inner.insert(clipboard).set_text(text)?;
        Ok(())
    }
}

/// Native desktop notifications.
///
/// The URL is part of the body text. Notifications are not clickable;
/// the clipboard is the way to open the link.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    config: NotificationConfig,
}

impl DesktopNotifier {
    pub fn new(config: NotificationConfig) -> Self {
        Self { config }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&mut self, url: &str) -> Result<(), DesktopError> {
        let mut notification = notify_rust::Notification::new();
        notification
            .summary(&self.config.title)
            .body(&notification_body(&self.config, url));

        #[cfg(target_os = "macos")]
        notification.subtitle(&self.config.subtitle);

        #[cfg(all(unix, not(target_os = "macos")))]
        notification.appname("shotput");

        notification.show()?;
        Ok(())
    }
}

/// Notification text carrying the URL as the link.
///
/// Platforms without subtitles get it folded into the body.
fn notification_body(config: &NotificationConfig, url: &str) -> String {
    if cfg!(target_os = "macos") || config.subtitle.is_empty() {
        format!("{}\n{url}", config.body)
    } else {
        format!("{}. {}\n{url}", config.subtitle, config.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_carries_url() {
        let config = NotificationConfig::default();
        let body = notification_body(&config, "https://example.com/abc.png");
        assert!(body.contains("The URL is now in your clipboard."));
        assert!(body.ends_with("https://example.com/abc.png"));
    }

    #[test]
    fn test_system_clipboard_opens_lazily() {
        let clipboard = SystemClipboard::new();
        assert!(!clipboard.is_open());
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_subtitle_folded_into_body() {
        let config = NotificationConfig::default();
        let body = notification_body(&config, "u");
        assert!(body.starts_with("Upload finished. "));
    }
}
