mod progress;
mod report;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use tally_core::{CancellationToken, ConnectionKind, ScanConfig, ScanMessage, Scanner};

use progress::Renderer;

/// tally - count files by extension on local or SSH-reachable trees
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Count files matching a set of extensions under a local or remote directory")]
#[command(version)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Write a sample configuration file and exit
    #[arg(long)]
    init: bool,

    /// Print every matched file path after the summary
    #[arg(short, long)]
    list_files: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    if args.init {
        tally_core::write_sample(&args.config)?;
        println!("Wrote sample configuration to {}", args.config.display());
        return Ok(());
    }

    let mut config = ScanConfig::load(&args.config)?;
    if args.list_files {
        config.collect_paths = true;
    }

    print_banner(&config);

    let cancel_token = CancellationToken::new();
    let handler_token = cancel_token.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, finishing up...");
        handler_token.cancel();
    })?;

    let scanner = Scanner::new(config.clone()).with_cancellation(cancel_token);
    let (rx, handle) = scanner.scan();

    let mut renderer = Renderer::new();
    let mut cancelled = false;
    for msg in rx {
        match msg {
            ScanMessage::Started { dir_total } => renderer.start(dir_total),
            ScanMessage::Progress(p) => renderer.update(&p),
            ScanMessage::SkippedDir { path, reason } => renderer.warn_skip(&path, &reason),
            ScanMessage::Cancelled => cancelled = true,
            ScanMessage::Completed => {}
        }
    }
    renderer.finish();

    let result = match handle.join() {
        Ok(result) => result?,
        Err(_) => return Err(eyre!("scan thread panicked")),
    };

    print!("{}", report::render(&result, cancelled));
    Ok(())
}

fn print_banner(config: &ScanConfig) {
    match &config.connection {
        ConnectionKind::Local => println!("Scanning {} (local)", config.root),
        ConnectionKind::Ssh(credentials) => println!(
            "Scanning {} (ssh://{}@{}:{})",
            config.root, credentials.username, credentials.host, credentials.port
        ),
    }

    if config.extensions.is_empty() {
        println!("Extensions: all files");
    } else {
        let extensions: Vec<&str> = config.extensions.iter().collect();
        println!("Extensions: {}", extensions.join(", "));
    }
}
