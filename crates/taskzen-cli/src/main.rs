mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use taskzen_core::AppConfig;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Store errors are never fatal to the board; surface them as a JSON
        // error response instead of a panic or a bare Debug dump.
        output::output_error(&e.to_string());
    }
}

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TASKZEN_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(
            *shell,
            &mut Cli::command(),
            "taskzen",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let config = AppConfig::load();
    let dir = context::resolve_data_dir(cli.dir, &config)?;
    let seed_demo = cli.seed || config.seed_demo;

    let mut ctx = CliContext::load(dir, seed_demo).await?;

    match cli.command {
        Commands::Card(card_cmd) => handlers::card::handle(&mut ctx, card_cmd.action).await?,
        Commands::Tag(tag_cmd) => handlers::tag::handle(&mut ctx, tag_cmd.action).await?,
        Commands::Board(board_cmd) => handlers::board::handle(&mut ctx, board_cmd.action).await?,
        Commands::Profile(profile_cmd) => {
            handlers::profile::handle(&mut ctx, profile_cmd.action).await?
        }
        Commands::Export(args) => handlers::export::handle_export(&ctx, args).await?,
        Commands::Import(args) => handlers::export::handle_import(&mut ctx, args).await?,
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
