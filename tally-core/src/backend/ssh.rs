use std::io;
use std::net::TcpStream;
use std::path::Path;

use ssh2::{Session, Sftp};

use super::{Backend, DirEntry, EntryKind};
use crate::config::SshCredentials;
use crate::error::{Result, TallyError};

/// Backend over an SSH session's SFTP channel.
///
/// The session is established in `connect` and torn down in `disconnect`;
/// authentication or network failures are terminal, with no retry.
pub struct SshBackend {
    credentials: SshCredentials,
    session: Option<Session>,
    sftp: Option<Sftp>,
}

impl SshBackend {
    pub fn new(credentials: SshCredentials) -> Self {
        Self {
            credentials,
            session: None,
            sftp: None,
        }
    }
}

impl Backend for SshBackend {
    fn connect(&mut self) -> Result<()> {
        let stream = TcpStream::connect((self.credentials.host.as_str(), self.credentials.port))
            .map_err(|e| {
                TallyError::ConnectionError(format!(
                    "{}:{}: {e}",
                    self.credentials.host, self.credentials.port
                ))
            })?;

        let mut session = Session::new().map_err(connection_error)?;
        session.set_tcp_stream(stream);
        session.handshake().map_err(connection_error)?;
        session
            .userauth_password(&self.credentials.username, &self.credentials.password)
            .map_err(|e| {
                TallyError::ConnectionError(format!(
                    "authentication failed for {}@{}: {e}",
                    self.credentials.username, self.credentials.host
                ))
            })?;

        let sftp = session.sftp().map_err(connection_error)?;

        self.session = Some(session);
        self.sftp = Some(sftp);
        Ok(())
    }

    fn list_dir(&mut self, path: &str) -> io::Result<Vec<DirEntry>> {
        let sftp = self
            .sftp
            .as_ref()
            .ok_or_else(|| io::Error::other("sftp channel not open"))?;

        let listing = sftp.readdir(Path::new(path)).map_err(io::Error::other)?;

        Ok(listing
            .into_iter()
            .filter_map(|(child, stat)| {
                let name = child.file_name()?.to_string_lossy().into_owned();
                // The mode bits arrive with the listing; no extra round trip.
                let kind = if stat.perm.is_none() {
                    EntryKind::Unknown
                } else if stat.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                };
                Some(DirEntry { name, kind })
            })
            .collect())
    }

    fn disconnect(&mut self) {
        // Channel before session; both Options make repeat calls no-ops.
        self.sftp.take();
        if let Some(session) = self.session.take() {
            let _ = session.disconnect(None, "scan finished", None);
        }
    }
}

fn connection_error(e: ssh2::Error) -> TallyError {
    TallyError::ConnectionError(e.to_string())
}
