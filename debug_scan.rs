// Run with: cargo run --example debug_scan -- /path/to/scan
// Add to tally-core/Cargo.toml: [[example]] name = "debug_scan" path = "../debug_scan.rs"

use std::time::Instant;

use tally_core::{ConnectionKind, ExtensionSet, ScanConfig, ScanMessage, Scanner};

fn main() {
    let root = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let extensions: Vec<String> = std::env::args().skip(2).collect();

    println!("Scanning: {root} (extensions: {extensions:?})");

    let config = ScanConfig {
        connection: ConnectionKind::Local,
        root,
        extensions: ExtensionSet::new(&extensions),
        collect_paths: false,
    };

    let start = Instant::now();
    let (rx, handle) = Scanner::new(config).scan();

    for msg in rx {
        match msg {
            ScanMessage::Started { dir_total } => {
                println!("[{:>6.1}s] STARTED total={dir_total:?}", start.elapsed().as_secs_f64());
            }
            ScanMessage::Progress(p) => {
                println!(
                    "[{:>6.1}s] dirs={:<8} files={:<8} matched={:<8} skipped={:<4} path={}",
                    start.elapsed().as_secs_f64(),
                    p.dirs_visited,
                    p.files_seen,
                    p.files_matched,
                    p.dirs_skipped,
                    p.current_path.unwrap_or_default(),
                );
            }
            ScanMessage::SkippedDir { path, reason } => {
                println!("[{:>6.1}s] SKIPPED {path}: {reason}", start.elapsed().as_secs_f64());
            }
            ScanMessage::Completed => {
                println!("[{:>6.1}s] COMPLETED", start.elapsed().as_secs_f64());
            }
            ScanMessage::Cancelled => {
                println!("[{:>6.1}s] CANCELLED", start.elapsed().as_secs_f64());
            }
        }
    }

    match handle.join().expect("scan thread panicked") {
        Ok(result) => {
            println!("\nFinal: {} matched", tally_core::format_count(result.total));
            for (ext, count) in &result.per_extension {
                println!("  {ext:>12} : {count}");
            }
        }
        Err(e) => println!("\nScan failed: {e}"),
    }
}
