use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::backend::{Backend, LocalBackend, SshBackend};
use crate::classify::ExtensionSet;
use crate::error::{Result, TallyError};

pub const DEFAULT_SSH_PORT: u16 = 22;

/// Where the scan root lives.
#[derive(Debug, Clone)]
pub enum ConnectionKind {
    Local,
    Ssh(SshCredentials),
}

/// Credentials for the SSH session backing a remote scan.
#[derive(Debug, Clone)]
pub struct SshCredentials {
    pub host: String,
    pub username: String,
    pub password: String,
    pub port: u16,
}

/// Validated scan configuration. Immutable for the duration of a scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub connection: ConnectionKind,
    pub root: String,
    pub extensions: ExtensionSet,
    /// Collect the full path of every matched file in the result.
    pub collect_paths: bool,
}

/// On-disk configuration schema (config.json).
#[derive(Debug, Serialize, Deserialize)]
struct RawConfig {
    connection_type: String,
    directory: String,
    extensions: Vec<String>,
    #[serde(default, alias = "hostname")]
    host: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    collect_paths: bool,
}

impl ScanConfig {
    /// Load and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => TallyError::PathNotFound(path.to_path_buf()),
            _ => TallyError::Io(e),
        })?;
        let raw: RawConfig = serde_json::from_str(&text)
            .map_err(|e| TallyError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        if raw.directory.is_empty() {
            return Err(TallyError::InvalidConfig(
                "\"directory\" must not be empty".to_string(),
            ));
        }

        let connection = match raw.connection_type.as_str() {
            "local" => ConnectionKind::Local,
            "ssh" => ConnectionKind::Ssh(SshCredentials {
                host: required(raw.host, "host")?,
                username: required(raw.username, "username")?,
                password: required(raw.password, "password")?,
                port: raw.port.unwrap_or(DEFAULT_SSH_PORT),
            }),
            other => {
                return Err(TallyError::InvalidConfig(format!(
                    "connection_type must be \"local\" or \"ssh\", got {other:?}"
                )));
            }
        };

        Ok(Self {
            connection,
            root: raw.directory,
            extensions: ExtensionSet::new(&raw.extensions),
            collect_paths: raw.collect_paths,
        })
    }

    /// Select the backend implementation for this configuration.
    ///
    /// Selection happens once, before traversal begins; the engine never
    /// branches on the connection kind again.
    pub fn backend(&self) -> Box<dyn Backend + Send> {
        match &self.connection {
            ConnectionKind::Local => Box::new(LocalBackend::new(&self.root)),
            ConnectionKind::Ssh(credentials) => Box::new(SshBackend::new(credentials.clone())),
        }
    }
}

fn required(field: Option<String>, name: &str) -> Result<String> {
    field.filter(|value| !value.is_empty()).ok_or_else(|| {
        TallyError::InvalidConfig(format!(
            "\"{name}\" is required when connection_type is \"ssh\""
        ))
    })
}

/// Write a sample configuration file a user can edit.
pub fn write_sample(path: &Path) -> Result<()> {
    let sample = RawConfig {
        connection_type: "local".to_string(),
        directory: "/var/log".to_string(),
        extensions: vec![".log".to_string(), ".txt".to_string()],
        host: Some("example.com".to_string()),
        username: Some("user".to_string()),
        password: Some("secret".to_string()),
        port: Some(DEFAULT_SSH_PORT),
        collect_paths: false,
    };
    let json = serde_json::to_string_pretty(&sample).expect("sample config serializes");
    fs::write(path, json + "\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<ScanConfig> {
        let raw: RawConfig = serde_json::from_str(json).expect("test json parses");
        ScanConfig::from_raw(raw)
    }

    #[test]
    fn test_local_config() {
        let config = parse(
            r#"{
                "connection_type": "local",
                "directory": "/srv/data",
                "extensions": ["TXT", ".py"]
            }"#,
        )
        .unwrap();

        assert!(matches!(config.connection, ConnectionKind::Local));
        assert_eq!(config.root, "/srv/data");
        assert!(config.extensions.matches("a.txt"));
        assert!(config.extensions.matches("b.PY"));
        assert!(!config.collect_paths);
    }

    #[test]
    fn test_ssh_config_with_defaults() {
        let config = parse(
            r#"{
                "connection_type": "ssh",
                "directory": "/remote",
                "extensions": [],
                "host": "files.example.com",
                "username": "scanner",
                "password": "hunter2"
            }"#,
        )
        .unwrap();

        match config.connection {
            ConnectionKind::Ssh(ref credentials) => {
                assert_eq!(credentials.host, "files.example.com");
                assert_eq!(credentials.port, DEFAULT_SSH_PORT);
            }
            ConnectionKind::Local => panic!("expected ssh connection"),
        }
    }

    #[test]
    fn test_hostname_alias() {
        let config = parse(
            r#"{
                "connection_type": "ssh",
                "directory": "/remote",
                "extensions": [],
                "hostname": "files.example.com",
                "username": "scanner",
                "password": "hunter2",
                "port": 2222
            }"#,
        )
        .unwrap();

        match config.connection {
            ConnectionKind::Ssh(ref credentials) => {
                assert_eq!(credentials.host, "files.example.com");
                assert_eq!(credentials.port, 2222);
            }
            ConnectionKind::Local => panic!("expected ssh connection"),
        }
    }

    #[test]
    fn test_ssh_missing_credentials() {
        let err = parse(
            r#"{
                "connection_type": "ssh",
                "directory": "/remote",
                "extensions": [],
                "host": "files.example.com"
            }"#,
        )
        .unwrap_err();

        assert!(matches!(err, TallyError::InvalidConfig(_)));
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_unknown_connection_type() {
        let err = parse(
            r#"{
                "connection_type": "ftp",
                "directory": "/remote",
                "extensions": []
            }"#,
        )
        .unwrap_err();

        assert!(matches!(err, TallyError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_directory_rejected() {
        let err = parse(
            r#"{
                "connection_type": "local",
                "directory": "",
                "extensions": []
            }"#,
        )
        .unwrap_err();

        assert!(matches!(err, TallyError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let temp = tempfile::tempdir().unwrap();
        let err = ScanConfig::load(&temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, TallyError::PathNotFound(_)));
    }

    #[test]
    fn test_sample_round_trips() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        write_sample(&path).unwrap();

        let config = ScanConfig::load(&path).unwrap();
        assert!(matches!(config.connection, ConnectionKind::Local));
        assert_eq!(config.extensions.len(), 2);
    }

    #[test]
    fn test_malformed_json() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        let err = ScanConfig::load(&path).unwrap_err();
        assert!(matches!(err, TallyError::InvalidConfig(_)));
    }
}
