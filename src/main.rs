mod app;
mod cli;
mod config;
mod console;
mod consts;
mod controller;
mod error;
mod frontmatter;
mod output;
mod scheduler;
mod utils;
mod vault;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_filter().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = app::run(cli).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
