mod cli;
mod client;
mod commands;
mod config;
mod error;
mod fetch;
mod output;
mod services;
mod shape;
mod types;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use client::GitHubClient;
use config::Config;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let verbose = cli.verbose;
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "gh_project_badge=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't talk to GitHub
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "gh-project-badge", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        Commands::Services => {
            commands::services::list();
        }
        // Badge commands print an error badge before failing
        command => {
            let config = Config::load()?;
            let client = GitHubClient::new(&config)?;

            let result = match &command {
                Commands::Project(args) => commands::badge::project(&client, args).await,
                Commands::Cards(args) => commands::badge::cards(&client, args).await,
                // Already handled above
                _ => Ok(()),
            };

            if let Err(e) = &result {
                commands::badge::print_error_badge(services::DEFAULT_LABEL, e);
            }
            result?;
        }
    }

    Ok(())
}
