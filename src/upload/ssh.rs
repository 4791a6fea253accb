//! SSH transport backed by libssh2.
//!
//! Credentials come from the running SSH agent (`SSH_AUTH_SOCK`); private
//! keys are never read by this process. Files are copied with SCP.

use std::fs::File;
use std::io;
use std::net::TcpStream;
use std::path::Path;

use ssh2::Session;

use crate::config::Settings;

use super::transport::{Connector, RemoteSession, remote_file_path};
use super::UploadError;

/// Mode given to uploaded files where the local mode is unknown.
#[cfg(not(unix))]
const DEFAULT_FILE_MODE: i32 = 0o644;

/// Permission bits sent with the file, taken from the local copy.
#[cfg(unix)]
fn file_mode(metadata: &std::fs::Metadata) -> i32 {
    use std::os::unix::fs::PermissionsExt;
    (metadata.permissions().mode() & 0o777) as i32
}

#[cfg(not(unix))]
fn file_mode(_metadata: &std::fs::Metadata) -> i32 {
    DEFAULT_FILE_MODE
}

/// Connects with `ssh2`, authenticating through the SSH agent.
#[derive(Debug, Default)]
pub struct SshConnector;

impl SshConnector {
    pub fn new() -> Self {
        Self
    }
}

fn agent_error(e: impl Into<io::Error>) -> UploadError {
    UploadError::AgentUnavailable { source: e.into() }
}

impl Connector for SshConnector {
    fn connect(&mut self, settings: &Settings) -> Result<Box<dyn RemoteSession>, UploadError> {
        let socket = std::env::var_os("SSH_AUTH_SOCK")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                agent_error(io::Error::new(
                    io::ErrorKind::NotFound,
                    "SSH_AUTH_SOCK is not set",
                ))
            })?;
        crate::debug_event!("ssh", "agent", "{}", Path::new(&socket).display());

        let address = settings.remote_address();
        let connection_error = |e: io::Error| UploadError::Connection {
            address: address.clone(),
            source: e,
        };

        let mut session = Session::new().map_err(|e| connection_error(e.into()))?;

        // Agent first: without it there is nothing to authenticate with.
        let mut agent = session.agent().map_err(agent_error)?;
        agent.connect().map_err(agent_error)?;
        agent.list_identities().map_err(agent_error)?;
        let identities = agent.identities().map_err(agent_error)?;
        if identities.is_empty() {
            return Err(agent_error(io::Error::new(
                io::ErrorKind::NotFound,
                "agent holds no identities",
            )));
        }

        let tcp = TcpStream::connect(&address).map_err(connection_error)?;
        session.set_tcp_stream(tcp);
        session.handshake().map_err(|e| connection_error(e.into()))?;

        for identity in &identities {
            match agent.userauth(&settings.username, identity) {
                Ok(()) => break,
                Err(e) => {
                    crate::debug_event!("ssh", "key rejected", "{}: {e}", identity.comment());
                }
            }
        }
        let _ = agent.disconnect();

        if !session.authenticated() {
            return Err(connection_error(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("no agent identity accepted for user '{}'", settings.username),
            )));
        }

        crate::log_event!("ssh", "connected", "{}@{address}", settings.username);
        Ok(Box::new(SshSession { session }))
    }
}

/// Authenticated libssh2 session.
pub struct SshSession {
    session: Session,
}

impl SshSession {
    fn copy(&self, local: &Path, remote: &str) -> io::Result<()> {
        let mut file = File::open(local)?;
        let metadata = file.metadata()?;

        let mut channel =
            self.session
                .scp_send(Path::new(remote), file_mode(&metadata), metadata.len(), None)?;
        io::copy(&mut file, &mut channel)?;

        channel.send_eof()?;
        channel.wait_eof()?;
        channel.close()?;
        channel.wait_close()?;
        Ok(())
    }
}

impl RemoteSession for SshSession {
    fn send_file(
        &mut self,
        local: &Path,
        remote_dir: &str,
        name: &str,
    ) -> Result<String, UploadError> {
        let remote = remote_file_path(remote_dir, name);
        self.copy(local, &remote)
            .map_err(|source| UploadError::Transfer {
                path: local.to_path_buf(),
                remote: remote.clone(),
                source,
            })?;
        Ok(remote)
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        let _ = self.session.disconnect(None, "upload finished", None);
    }
}
