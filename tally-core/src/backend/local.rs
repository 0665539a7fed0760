use std::fs;
use std::io;
use std::path::PathBuf;

use super::{Backend, DirEntry, EntryKind};
use crate::error::{Result, TallyError};

/// Backend over the host filesystem.
#[derive(Debug)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Backend for LocalBackend {
    fn connect(&mut self) -> Result<()> {
        if !self.root.exists() {
            return Err(TallyError::PathNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(TallyError::NotADirectory(self.root.clone()));
        }
        Ok(())
    }

    fn list_dir(&mut self, path: &str) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            // file_type on the entry does not follow symlinks, so a link to
            // a directory is listed as a file and never descended into.
            let kind = match entry.file_type() {
                Ok(ft) if ft.is_dir() => EntryKind::Directory,
                Ok(_) => EntryKind::File,
                Err(_) => EntryKind::Unknown,
            };
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }
        Ok(entries)
    }

    fn disconnect(&mut self) {}

    /// Counting pre-pass so the presentation layer can render a bounded
    /// progress bar. Unreadable subtrees are ignored, matching the scan's
    /// own skip behavior.
    fn dir_total(&mut self, path: &str) -> Option<u64> {
        let mut total = 0u64;
        let mut stack = vec![PathBuf::from(path)];

        while let Some(dir) = stack.pop() {
            total += 1;
            if let Ok(entries) = fs::read_dir(&dir) {
                for entry in entries.flatten() {
                    if entry.file_type().is_ok_and(|ft| ft.is_dir()) {
                        stack.push(entry.path());
                    }
                }
            }
        }

        Some(total)
    }
}
