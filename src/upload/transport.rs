//! Transport traits between the pipeline and the remote host.

use std::path::Path;

use crate::config::Settings;

use super::UploadError;

/// Opens an authenticated session to the configured remote host.
pub trait Connector: Send {
    /// Obtain credentials and connect.
    ///
    /// Fails with `AgentUnavailable` or `Connection`.
    fn connect(&mut self, settings: &Settings) -> Result<Box<dyn RemoteSession>, UploadError>;
}

/// An open session able to copy files to the remote host.
pub trait RemoteSession {
    /// Copy `local` to `remote_dir/name` and return the remote path.
    ///
    /// Fails with `Transfer`.
    fn send_file(
        &mut self,
        local: &Path,
        remote_dir: &str,
        name: &str,
    ) -> Result<String, UploadError>;
}

/// Remote destination for `name` inside `remote_dir`.
///
/// Remote paths are POSIX paths regardless of the local platform.
pub fn remote_file_path(remote_dir: &str, name: &str) -> String {
    let dir = remote_dir.trim_end_matches('/');
    if dir.is_empty() {
        if remote_dir.starts_with('/') {
            format!("/{name}")
        } else {
            name.to_string()
        }
    } else {
        format!("{dir}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_file_path() {
        assert_eq!(remote_file_path("/var/www/shots", "a.png"), "/var/www/shots/a.png");
        assert_eq!(remote_file_path("/var/www/shots/", "a.png"), "/var/www/shots/a.png");
        assert_eq!(remote_file_path("shots", "a.png"), "shots/a.png");
        assert_eq!(remote_file_path("/", "a.png"), "/a.png");
        // Empty means the login directory
        assert_eq!(remote_file_path("", "a.png"), "a.png");
    }
}
