// Console round of the pronunciation quiz.
// Run with: cargo run --bin quiz -- --words frequency.txt --difficulty easy
use anyhow::{bail, Context, Result};
use clap::Parser;
use coach_core::audio::{AudioRenderer, CommandRenderer, RenderOutcome, SilentRenderer};
use coach_core::challenge::OptionView;
use coach_core::config::CoachConfig;
use coach_core::core::types::Difficulty;
use coach_core::words::FrequencyList;
use coach_core::{ChallengeCache, ChallengeService, DistractorGenerator, WordBank};
use crossterm::style::Stylize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quiz", about = "Pick the correct pronunciation")]
struct Args {
    /// Word bank produced by build_wordbank
    #[arg(long)]
    bank: Option<PathBuf>,

    /// Frequency-ranked word list
    #[arg(long)]
    words: Option<PathBuf>,

    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,

    /// Seed for reproducible option sets
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "coach.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let config = CoachConfig::load(&args.config)?;

    let Some(words_path) = args.words.or_else(|| config.frequency_list_path.clone()) else {
        bail!("no word list given; pass --words or set frequency_list_path");
    };
    let words = FrequencyList::from_file(&words_path)
        .with_context(|| format!("reading word list {}", words_path.display()))?;

    let renderer: Arc<dyn AudioRenderer> = match &config.tts_command {
        Some(command) => {
            Arc::new(CommandRenderer::new(command.clone()).with_timeout(config.render_timeout()))
        }
        None => Arc::new(SilentRenderer),
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let bank = Arc::new(WordBank::new(config.resolve_bank_path(args.bank.as_deref())));
    let cache = Arc::new(ChallengeCache::new(renderer));
    let generator = DistractorGenerator::new().with_max_attempts(config.max_attempts);
    let service = ChallengeService::new(words, generator, cache)
        .with_word_bank(bank)
        .with_rng(rng);

    let challenge = service.generate(args.difficulty)?;

    println!("{}", challenge.content.as_str().bold());
    if let Some(ipa) = &challenge.ipa {
        println!("IPA: {}", ipa.as_str().cyan());
    }
    let speak = config.tts_command.is_some();
    if !speak {
        println!("{}", "No tts_command configured; options have no audio.".dark_grey());
    }
    for option in &challenge.options {
        let audio = if speak {
            service.audio(challenge.id, &option.letter.to_string())
        } else {
            None
        };
        println!("{}", option_line(option, audio.as_ref()));
    }
    println!("{}", challenge.hint.as_str().dark_grey());
    print!("> ");
    stdout().flush()?;

    let mut input = String::new();
    stdin().read_line(&mut input)?;
    match service.submit(challenge.id, input.trim()) {
        Some(outcome) if outcome.is_correct => {
            println!("{} +{} XP", "Correct!".green(), outcome.xp_earned);
        }
        Some(outcome) => {
            println!("{} The answer was {}.", "Not quite.".red(), outcome.correct_answer);
        }
        None => println!("Challenge {} is no longer available.", challenge.id),
    }
    Ok(())
}

/// One listing line per option. Only the letter and the audio it points at
/// are shown; the spoken text would give the answer away.
fn option_line(option: &OptionView, audio: Option<&RenderOutcome>) -> String {
    let letter = option.letter.to_string().yellow();
    match audio {
        Some(RenderOutcome::Audio(bytes)) => {
            format!("  {letter})  {} bytes of audio at {}", bytes.len(), option.audio_url)
        }
        Some(RenderOutcome::Empty { reason }) => format!("  {letter})  no audio: {reason}"),
        None => format!("  {letter})  {}", option.audio_url),
    }
}
