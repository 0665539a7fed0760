mod progress;
mod walker;

pub use progress::{ScanMessage, ScanProgress};
pub use walker::{CancellationToken, Scanner};
