mod local;
mod ssh;

pub use local::LocalBackend;
pub use ssh::SshBackend;

use std::io;

use crate::error::Result;

/// How the backend classified a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// Classification failed (stat error); the entry is skipped.
    Unknown,
}

/// A single child of a listed directory. Transient: produced by one
/// `list_dir` call and consumed immediately by the traversal engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// Uniform listing contract over local and remote filesystems.
///
/// One backend instance serves exactly one scan: the traversal engine
/// connects before visiting the root and disconnects on every exit path.
pub trait Backend {
    /// Validate the root and establish any session state. Failures here are
    /// fatal to the scan.
    fn connect(&mut self) -> Result<()>;

    /// List the immediate children of a directory, with type information
    /// taken from the listing itself (no per-entry round trips).
    ///
    /// Errors are recoverable: the engine records the directory as skipped
    /// and continues with the rest of the tree.
    fn list_dir(&mut self, path: &str) -> io::Result<Vec<DirEntry>>;

    /// Release the connection. Idempotent: safe when never connected and
    /// safe to call twice.
    fn disconnect(&mut self);

    /// Total directory count under `path`, when cheap enough to pre-compute.
    ///
    /// Used to scale the progress display; `None` means the total is
    /// unknown and progress is open-ended.
    fn dir_total(&mut self, path: &str) -> Option<u64> {
        let _ = path;
        None
    }
}

/// Join a parent path and child name with exactly one separator, collapsing
/// any trailing separators on the parent.
pub fn join_child(parent: &str, name: &str) -> String {
    let trimmed = parent.trim_end_matches('/');
    if trimmed.is_empty() {
        format!("/{name}")
    } else {
        format!("{trimmed}/{name}")
    }
}
