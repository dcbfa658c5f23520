mod cli;
mod commands;
mod infra;
mod shared;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use shared::env_var::EnvVars;

#[tokio::main]
async fn main() -> ExitCode {
    let Cli { command } = Cli::parse();
    let env = EnvVars::load();
    shared::logging::init(env.log_filter.as_deref());

    match run(command, &env).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, env: &EnvVars) -> anyhow::Result<()> {
    match command {
        Commands::Analyze(args) => {
            let config = shared::config::load_config()?;
            args.run(&config.analyze, env).await
        }
        Commands::Publish(args) => {
            let config = shared::config::load_config()?;
            args.run(&config).await
        }
        Commands::Config(cmd) => cmd.run(),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "issue-digest",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
