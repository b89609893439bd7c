//! BBS terminal binary
//!
//! # Usage
//!
//! ```bash
//! bbs-tui
//! bbs-tui --posts posts.json --utc-offset 1 --zone-label CET
//! bbs-tui --reset-session --log-file bbs.log --log-level debug
//! ```

use std::{fs::File, sync::Mutex};

use bbs_app::Runtime;
use bbs_tui::{Args, TerminalDriver};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.app_config()?;
    let frame = args.frame_interval()?;
    let posts = args.open_posts()?;
    let session = args.open_session();

    tracing::info!(session = %args.session_path().display(), "starting BBS terminal");

    let driver = TerminalDriver::new(frame)?;
    let runtime = Runtime::new(driver, config, posts, session);
    runtime.run().await?;

    Ok(())
}

/// Install a file logger. The terminal belongs to the UI, so without
/// `--log-file` nothing is logged.
fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();

    Ok(())
}
