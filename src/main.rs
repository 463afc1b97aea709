mod config;
mod engine;
mod fetcher;
mod run;
mod safeguard;

use std::io::Write;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = config::Cli::parse();

    // Diagnostics go to stderr; stdout carries results only.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let (source, opts) = config::resolve(cli)?;
    let http = fetcher::HttpFetcher::new()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run::execute(&source, &opts, &http, &engine::Engine, &mut out).await?;
    out.flush()?;
    Ok(())
}
