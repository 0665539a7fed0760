pub mod backend;
pub mod classify;
pub mod config;
pub mod count;
pub mod error;
pub mod scanner;

pub use backend::{Backend, DirEntry, EntryKind, LocalBackend, SshBackend, join_child};
pub use classify::{ExtensionSet, suffix_of};
pub use config::{ConnectionKind, DEFAULT_SSH_PORT, ScanConfig, SshCredentials, write_sample};
pub use count::{CountResult, SkippedDir, format_count};
pub use error::{Result, TallyError};
pub use scanner::{CancellationToken, ScanMessage, ScanProgress, Scanner};
