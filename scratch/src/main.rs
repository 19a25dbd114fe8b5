//! Song-title scratch card, terminal edition.
//!
//! Hides a handful of song titles from the selected libraries behind `*`
//! and lets the player scratch characters open until every title is known.
//!
//! ```bash
//! cargo run -p scratch -- --config configuration.toml --libraries 1,2
//! ```

mod play;
mod render;

use clap::Parser;
use scratch_core::config::DEFAULT_CONFIG_FILE;
use scratch_core::library::{self, Library};
use scratch_core::{GameConfig, ProgressWriter, ScratchSession, SessionConfig, SessionError};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "scratch")]
#[command(about = "Guess the song titles hidden on a scratch card", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Libraries to play with, as comma-separated numbers (skips the prompt)
    #[arg(short, long)]
    libraries: Option<String>,

    /// Override the number of hidden titles
    #[arg(long)]
    count: Option<usize>,

    /// Override the initial number of opens
    #[arg(long, allow_negative_numbers = true)]
    chances: Option<i64>,

    /// Do not write Answer.txt, Question.txt and Temp.txt
    #[arg(long)]
    no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), SessionError> {
    let mut config = GameConfig::load(&cli.config).await?;
    if let Some(count) = cli.count {
        config = config.with_answer_count(count)?;
    }
    if let Some(chances) = cli.chances {
        config = config.with_chances(chances);
    }

    let libraries = library::discover(&config.path.dict_folder).await?;

    println!("Song title scratch card");
    println!();
    println!("Available libraries:");
    for (i, lib) in libraries.iter().enumerate() {
        println!("{}. {} (game version: {})", i + 1, lib.name, lib.version);
    }

    let input = match cli.libraries {
        Some(list) => list,
        None => prompt_selection()?,
    };
    let selected = select_libraries(&input, &libraries)?;

    let corpus = library::load_corpus(selected.iter().copied()).await;
    for lib in &selected {
        println!("Loaded library \"{}\".", lib.name);
    }
    println!("Total titles selected: {}", corpus.len());

    let versions = libraries.iter().map(Library::corpus_version).collect();
    let mut session_config = SessionConfig::from_game_config(&config);
    if cli.no_progress {
        session_config = session_config.without_progress();
    }

    let mut session = ScratchSession::new(&session_config, corpus, versions)?;
    if session_config.write_progress {
        let writer = ProgressWriter::create(&config.path.output_folder).await?;
        session = session.with_progress(writer);
    }

    let status = play::run_game(session).await?;
    log::info!("Game ended: {status:?}");
    Ok(())
}

fn prompt_selection() -> io::Result<String> {
    println!("Choose library numbers, separated by commas:");
    print!("\n>> ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input)
}

fn select_libraries<'a>(
    input: &str,
    libraries: &'a [Library],
) -> Result<Vec<&'a Library>, SessionError> {
    let selection = library::parse_selection(input, libraries.len())?;
    for index in &selection.ignored {
        println!("Library \"{index}\" does not exist, ignored.");
    }
    Ok(selection
        .indices
        .iter()
        .map(|&index| &libraries[index - 1])
        .collect())
}
