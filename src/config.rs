use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

#[derive(Parser)]
#[command(name = "pagedate", version, about = "Extract publication dates from web pages")]
pub struct Cli {
    /// Fast mode: disable extensive search
    #[arg(short, long)]
    pub fast: bool,

    /// Input file for batch processing, one URL per line (similar to wget -i)
    #[arg(short, long)]
    pub inputfile: Option<PathBuf>,

    /// Prioritize the original publication date over the last update
    #[arg(long)]
    pub original: bool,

    /// Earliest acceptable date (YYYY-MM-DD)
    #[arg(short = 'm', long)]
    pub mindate: Option<String>,

    /// Latest acceptable date (YYYY-MM-DD)
    #[arg(short = 'M', long)]
    pub maxdate: Option<String>,

    /// Fetch a single URL instead of reading standard input
    #[arg(short, long)]
    pub url: Option<String>,

    /// Increase output verbosity
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where the run takes its document(s) from. Resolved once at startup;
/// a batch file overrides the single-URL and stdin paths.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    Url(String),
    Stdin,
    BatchFile(PathBuf),
}

/// Validated run options, immutable after `resolve`.
#[derive(Debug, Clone)]
pub struct Options {
    pub extensive_search: bool,
    pub original_date: bool,
    pub verbose: bool,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

/// Turn parsed arguments into an input source and validated options.
/// Malformed date bounds are a usage error, reported before any processing.
pub fn resolve(cli: Cli) -> Result<(InputSource, Options)> {
    let source = if let Some(path) = cli.inputfile {
        InputSource::BatchFile(path)
    } else if let Some(url) = cli.url {
        InputSource::Url(url)
    } else {
        InputSource::Stdin
    };

    let opts = Options {
        extensive_search: !cli.fast,
        original_date: cli.original,
        verbose: cli.verbose,
        min_date: parse_bound(cli.mindate.as_deref(), "--mindate")?,
        max_date: parse_bound(cli.maxdate.as_deref(), "--maxdate")?,
    };

    Ok((source, opts))
}

fn parse_bound(raw: Option<&str>, flag: &str) -> Result<Option<NaiveDate>> {
    raw.map(|s| {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("{flag} expects YYYY-MM-DD, got '{s}'"))
    })
    .transpose()
}

// ── Tests ──
