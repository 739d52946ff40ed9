//! Vitrina CLI - product catalog with offline-first sync.

use clap::Parser;

use vitrina_cli::cli::Cli;
use vitrina_cli::commands::Notice;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    vitrina_cli::init_tracing(cli.verbose);

    if let Err(e) = vitrina_cli::run(cli).await {
        eprintln!("{}", Notice::error(&e));
        std::process::exit(1);
    }
}
