//! # simplehttp - send one request from the terminal
//!
//! ```bash
//! simplehttp get https://httpbin.org/get
//! simplehttp post https://httpbin.org/post Content-Type:text/plain --data hello
//! simplehttp --catalog resources.yaml get httpbin/status/404 -v
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).

use clap::Parser;
use simplehttp::{execute, Cli};

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    if let Err(e) = execute(Cli::parse()) {
        for line in e.report_lines() {
            eprintln!("{line}");
        }
        std::process::exit(1);
    }
}
