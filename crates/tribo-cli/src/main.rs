//! Tribo CLI application
//!
//! Serves tribonacci numbers over HTTP or computes one on the command line.
//!
//! ```bash
//! tribo serve --bind 0.0.0.0:8080 --cache-size-limit 100000
//! tribo get 10            # prints 44
//! tribo config show       # prints the effective configuration
//! ```
//!
//! Set RUST_LOG=debug for verbose logging.

mod args;
mod commands;
mod logging;
mod router;

use args::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    router::route(cli).await
}
