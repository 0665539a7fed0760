use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};

use super::progress::{ScanMessage, ScanProgress};
use crate::backend::{Backend, EntryKind, join_child};
use crate::classify::suffix_of;
use crate::config::ScanConfig;
use crate::count::{CountAggregator, CountResult};
use crate::error::Result;

/// Cancellation token for stopping scans
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Sequential extension-counting traversal over a backend.
///
/// The walk is depth-first and pre-order, driven by an explicit stack so
/// that depth is bounded and the cancellation token can be checked before
/// every descent.
pub struct Scanner {
    config: ScanConfig,
    cancel_token: CancellationToken,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Scan using the backend selected by the configuration.
    /// Returns a receiver for progress updates and spawns scanning in background.
    pub fn scan(self) -> (Receiver<ScanMessage>, JoinHandle<Result<CountResult>>) {
        let backend = self.config.backend();
        self.scan_with(backend)
    }

    /// Scan through an explicit backend. The seam for tests: inject a fake
    /// backend and the engine runs without filesystem or network access.
    pub fn scan_with(
        self,
        backend: Box<dyn Backend + Send>,
    ) -> (Receiver<ScanMessage>, JoinHandle<Result<CountResult>>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = std::thread::spawn(move || self.scan_sync(backend, tx));
        (rx, handle)
    }

    /// Synchronous scan (runs in thread)
    fn scan_sync(
        self,
        mut backend: Box<dyn Backend + Send>,
        tx: Sender<ScanMessage>,
    ) -> Result<CountResult> {
        if let Err(e) = backend.connect() {
            backend.disconnect();
            return Err(e);
        }

        let dir_total = backend.dir_total(&self.config.root);
        let _ = tx.send(ScanMessage::Started { dir_total });

        let mut aggregator = CountAggregator::new(&self.config.extensions, self.config.collect_paths);
        let mut progress = ScanProgress::default();
        let mut stack = vec![self.config.root.clone()];
        let mut cancelled = false;

        while let Some(dir) = stack.pop() {
            if self.cancel_token.is_cancelled() {
                cancelled = true;
                break;
            }

            progress.dirs_visited += 1;
            progress.current_path = Some(dir.clone());

            match backend.list_dir(&dir) {
                Ok(entries) => {
                    for entry in entries {
                        match entry.kind {
                            EntryKind::Directory => {
                                stack.push(join_child(&dir, &entry.name));
                            }
                            EntryKind::File => {
                                progress.files_seen += 1;
                                if self.config.extensions.matches(&entry.name) {
                                    let suffix = suffix_of(&entry.name);
                                    aggregator.increment(&suffix, &join_child(&dir, &entry.name));
                                    progress.files_matched += 1;
                                }
                            }
                            EntryKind::Unknown => {
                                progress.stat_errors += 1;
                            }
                        }
                    }
                }
                Err(e) => {
                    progress.dirs_skipped += 1;
                    aggregator.record_skip(&dir, e.to_string());
                    let _ = tx.send(ScanMessage::SkippedDir {
                        path: dir.clone(),
                        reason: e.to_string(),
                    });
                }
            }

            // Fire-and-forget: the channel is unbounded, so a slow consumer
            // never stalls the walk.
            let _ = tx.send(ScanMessage::Progress(progress.clone()));
        }

        backend.disconnect();

        let _ = tx.send(if cancelled {
            ScanMessage::Cancelled
        } else {
            ScanMessage::Completed
        });

        Ok(aggregator.finalize())
    }
}
