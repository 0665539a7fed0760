use std::fmt::Write;

use tally_core::{CountResult, format_count};

const RULE_WIDTH: usize = 60;

/// Render the final count table: one right-aligned row per extension, a
/// total row, then skipped directories and matched paths when present.
pub fn render(result: &CountResult, cancelled: bool) -> String {
    let mut out = String::new();

    let title = if cancelled {
        "File counts (partial, scan interrupted)"
    } else {
        "File counts"
    };

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

    for (extension, count) in &result.per_extension {
        let label = if extension.is_empty() {
            "(no extension)"
        } else {
            extension
        };
        let _ = writeln!(out, "{label:>15} : {:>10}", format_count(*count));
    }

    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    let _ = writeln!(out, "{:>15} : {:>10}", "total", format_count(result.total));

    if !result.skipped.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Skipped {} of the tree (listing failures):",
            if result.skipped.len() == 1 {
                "1 directory".to_string()
            } else {
                format!("{} directories", result.skipped.len())
            }
        );
        for skip in &result.skipped {
            let _ = writeln!(out, "  {} ({})", skip.path, skip.reason);
        }
    }

    if let Some(paths) = &result.matched_paths {
        let _ = writeln!(out);
        let _ = writeln!(out, "Matched files:");
        for path in paths {
            let _ = writeln!(out, "  {path}");
        }
    }

    out
}
