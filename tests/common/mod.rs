//! Recording fakes for the upload pipeline.

#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use shotput::Settings;
use shotput::desktop::{Clipboard, DesktopError, Notifier};
use shotput::upload::{Connector, RemoteSession, UploadError, Uploader, remote_file_path};

pub const REMOTE_URL: &str = "https://files.example.com/shots";
pub const REMOTE_PATH: &str = "/var/www/shots";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Connect {
        address: String,
        username: String,
    },
    Send {
        local: PathBuf,
        remote: String,
        existed: bool,
    },
    Clipboard(String),
    Notify(String),
}

/// Which fake collaborator should fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct Failures {
    pub agent: bool,
    pub transfer: bool,
    pub clipboard: bool,
    pub notify: bool,
}

#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    pub fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sends(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Send { .. }))
            .collect()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Notify(url) => Some(url),
                _ => None,
            })
            .collect()
    }
}

struct FakeConnector {
    recorder: Recorder,
    failures: Failures,
}

impl Connector for FakeConnector {
    fn connect(&mut self, settings: &Settings) -> Result<Box<dyn RemoteSession>, UploadError> {
        if self.failures.agent {
            return Err(UploadError::AgentUnavailable {
                source: io::Error::new(io::ErrorKind::NotFound, "SSH_AUTH_SOCK is not set"),
            });
        }
        self.recorder.push(Call::Connect {
            address: settings.remote_address(),
            username: settings.username.clone(),
        });
        Ok(Box::new(FakeSession {
            recorder: self.recorder.clone(),
            failures: self.failures,
        }))
    }
}

struct FakeSession {
    recorder: Recorder,
    failures: Failures,
}

impl RemoteSession for FakeSession {
    fn send_file(
        &mut self,
        local: &Path,
        remote_dir: &str,
        name: &str,
    ) -> Result<String, UploadError> {
        let remote = remote_file_path(remote_dir, name);
        if self.failures.transfer {
            return Err(UploadError::Transfer {
                path: local.to_path_buf(),
                remote,
                source: io::Error::new(io::ErrorKind::BrokenPipe, "connection reset"),
            });
        }
        self.recorder.push(Call::Send {
            local: local.to_path_buf(),
            remote: remote.clone(),
            existed: local.exists(),
        });
        Ok(remote)
    }
}

struct FakeClipboard {
    recorder: Recorder,
    fail: bool,
}

impl Clipboard for FakeClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), DesktopError> {
        if self.fail {
            return Err(DesktopError::Clipboard {
                reason: "no display".to_string(),
            });
        }
        self.recorder.push(Call::Clipboard(text.to_string()));
        Ok(())
    }
}

struct FakeNotifier {
    recorder: Recorder,
    fail: bool,
}

impl Notifier for FakeNotifier {
    fn notify(&mut self, url: &str) -> Result<(), DesktopError> {
        if self.fail {
            return Err(DesktopError::Notification {
                reason: "notification daemon not running".to_string(),
            });
        }
        self.recorder.push(Call::Notify(url.to_string()));
        Ok(())
    }
}

/// Settings pointing at `watch_dir` with a fake remote.
pub fn settings(watch_dir: &Path, archive: Option<&Path>) -> Settings {
    Settings {
        username: "alice".to_string(),
        hostname: "files.example.com".to_string(),
        remote_path: REMOTE_PATH.to_string(),
        remote_url: REMOTE_URL.to_string(),
        local_path: watch_dir.to_path_buf(),
        archive_path: archive.map(Path::to_path_buf),
        ..Settings::default()
    }
}

/// Uploader wired to recording fakes.
pub fn uploader(settings: Settings, failures: Failures) -> (Uploader, Recorder) {
    let recorder = Recorder::default();
    let uploader = Uploader::new(
        settings,
        Box::new(FakeConnector {
            recorder: recorder.clone(),
            failures,
        }),
        Box::new(FakeClipboard {
            recorder: recorder.clone(),
            fail: failures.clipboard,
        }),
        Box::new(FakeNotifier {
            recorder: recorder.clone(),
            fail: failures.notify,
        }),
    );
    (uploader, recorder)
}

/// 40 lowercase hex characters followed by `ext`.
pub fn is_hashed_name(name: &str, ext: &str) -> bool {
    name.strip_suffix(ext).is_some_and(|stem| {
        stem.len() == 40 && stem.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    })
}

pub fn dir_entries(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    entries.sort();
    entries
}
