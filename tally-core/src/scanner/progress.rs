/// Progress update during scanning
#[derive(Debug, Clone)]
pub enum ScanMessage {
    /// Connection established and traversal about to begin. `dir_total`
    /// carries the expected directory count when the backend can pre-compute
    /// it; `None` means progress is open-ended.
    Started { dir_total: Option<u64> },
    /// Progress update, one per visited directory
    Progress(ScanProgress),
    /// A directory listing failed; its subtree was skipped
    SkippedDir { path: String, reason: String },
    /// Scan completed
    Completed,
    /// Scan was cancelled; a partial result is still returned
    Cancelled,
}

/// Scanning progress statistics
#[derive(Debug, Clone, Default)]
pub struct ScanProgress {
    /// Number of directories visited so far (monotonically increasing)
    pub dirs_visited: u64,
    /// Number of file entries seen
    pub files_seen: u64,
    /// Number of files that matched the extension set
    pub files_matched: u64,
    /// Number of directories skipped due to listing failures
    pub dirs_skipped: u64,
    /// Number of entries whose type could not be determined
    pub stat_errors: u64,
    /// Directory currently being scanned
    pub current_path: Option<String>,
}
