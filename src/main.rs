//! Editlink CLI - resolve browser tabs to editable content entries

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod cookie;
mod endpoint;
mod error;
mod notify;
mod pipeline;
mod store;

use cli::{Cli, CommandContext, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Commands::Completions { shell } = cli.command {
        cli::completions::run(shell);
        return Ok(());
    }

    let ctx = CommandContext::new(cli.format, cli.config.as_deref())?;

    match cli.command {
        Commands::Lookup { tabs } => cli::lookup::run(&ctx, tabs).await,
        Commands::Open { tab_id } => cli::open::open(&ctx, tab_id),
        Commands::Forget { tab_id } => cli::open::forget(&ctx, tab_id),
        Commands::Status => cli::status::run(&ctx, cli.config.as_deref()),
        Commands::Completions { .. } => Ok(()),
    }
}
