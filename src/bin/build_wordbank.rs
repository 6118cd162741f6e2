// Offline word-bank builder.
// Run with: cargo run --bin build_wordbank -- words.txt wordbank.json --dict cmudict.dict
use anyhow::{Context, Result};
use clap::Parser;
use coach_core::builder::WordBankBuilder;
use coach_core::config::CoachConfig;
use coach_core::dictionary::CmuDictionary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "build_wordbank", about = "Convert a word list into an IPA word bank")]
struct Args {
    /// Word list, one word per line
    words: PathBuf,

    /// Destination JSON file (overwritten)
    output: Option<PathBuf>,

    /// CMU pronouncing dictionary in its plain-text format
    #[arg(long)]
    dict: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, default_value = "coach.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = CoachConfig::load(&args.config)?;
    let output = config.resolve_bank_path(args.output.as_deref());
    let dict_path = args.dict.unwrap_or_else(|| config.dictionary_path.clone());

    let dictionary = CmuDictionary::from_file(&dict_path)
        .with_context(|| format!("reading dictionary {}", dict_path.display()))?;
    let builder = WordBankBuilder::new(dictionary).with_progress_interval(config.progress_interval);
    let report = builder
        .run(&args.words, &output)
        .with_context(|| format!("building {} from {}", output.display(), args.words.display()))?;

    println!(
        "Wrote {} entries -> {} (ok: {}  miss: {})",
        report.written,
        output.display(),
        report.hits,
        report.misses
    );
    Ok(())
}
