use anyhow::Result;
use clap::Parser;
use tocsplit::cli::{Cli, Commands};
use tocsplit::commands;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Info { path } => commands::info::run(&path),
        Commands::Toc { path, json } => commands::toc::run(&path, json),
        Commands::Split {
            path,
            output_dir,
            toc,
        } => commands::split::run(&path, &output_dir, toc.as_deref()),
        Commands::Extract {
            path,
            pages,
            output,
        } => commands::extract::run(&path, &pages, &output),
    };

    if let Err(err) = result {
        error!("{:#}", err);
        std::process::exit(1);
    }
    Ok(())
}
