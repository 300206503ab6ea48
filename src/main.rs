use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vocab_boost::config::AppConfig;
use vocab_boost::ingest::json::import_entries;
use vocab_boost::{Card, Grade, LibraryStats, ReviewSession, Store, Timestamp, VocabEntry};

/// Spaced-repetition vocabulary library.
#[derive(Parser, Debug)]
#[command(name = "vocab-boost", about = "Study bilingual vocabulary with SM-2 scheduling")]
struct Cli {
    /// Path to config file (default: <config dir>/vocab-boost/config.toml)
    #[arg(long, env = "VOCAB_BOOST_CONFIG")]
    config: Option<PathBuf>,

    /// Library database (overrides the config file)
    #[arg(long, env = "VOCAB_BOOST_DB")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List collections
    Collections,
    /// Show the cards of a collection
    Show { collection: i64 },
    /// Create an empty collection
    NewCollection { name: String },
    /// Save extracted entries from a JSON file as a new collection
    Import {
        file: PathBuf,
        /// Collection name (defaults to the name in the file, then the file name)
        #[arg(long)]
        name: Option<String>,
    },
    /// Save a single entry into the quick-saves collection
    QuickSave {
        #[arg(long)]
        word: String,
        #[arg(long)]
        definition: String,
        #[arg(long, default_value = "")]
        example_en: String,
        #[arg(long, default_value = "")]
        example_vn: String,
    },
    /// List cards due for review
    Due {
        #[arg(long)]
        json: bool,
    },
    /// Grade one card: hard, good or easy
    Grade { card: i64, grade: Grade },
    /// Review all due cards interactively
    Review,
    /// Show learning progress
    Stats {
        #[arg(long)]
        json: bool,
    },
    DeleteCard { card: i64 },
    DeleteCollection { collection: i64 },
    /// Move the simulated clock forward one day
    AdvanceDay,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.config.as_deref(), cli.database.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let store = Store::open(&config.database_path, config.clock)
        .with_context(|| format!("opening {}", config.database_path.display()))?
        .with_quick_saves_name(&config.quick_saves_collection);
    info!("Using {:?} clock", store.time_source());

    match cli.command {
        Command::Collections => {
            let library = store.load_library()?;
            if library.collections.is_empty() {
                println!("No collections yet. Import a list or quick-save a word.");
            }
            let now = store.current_time()?;
            for collection in &library.collections {
                println!(
                    "[{}] {} ({} cards, {} due) created {}",
                    collection.id,
                    collection.name,
                    collection.cards.len(),
                    collection.due_cards(now).count(),
                    format_timestamp(collection.created_at)
                );
            }
        }
        Command::Show { collection } => {
            let collection = store.load_collection(collection)?;
            println!("{} ({} cards)", collection.name, collection.cards.len());
            for card in &collection.cards {
                print_card(card);
            }
        }
        Command::NewCollection { name } => {
            let id = store.create_collection(&name)?;
            println!("Collection '{}' created with id {}", name, id);
        }
        Command::Import { file, name } => {
            let list = import_entries(&file)?;
            let name = name.or(list.name).unwrap_or_default();
            match store.save_all_to_new_collection(&name, &list.entries)? {
                Some(id) => println!("Saved {} cards to collection {}", list.entries.len(), id),
                None => println!("Nothing to save in {}", file.display()),
            }
        }
        Command::QuickSave {
            word,
            definition,
            example_en,
            example_vn,
        } => {
            let entry = VocabEntry::new(&word, &definition).with_examples(&example_en, &example_vn);
            let id = store.quick_save(&entry)?;
            println!("Saved '{}' as card {}", word, id);
        }
        Command::Due { json } => {
            let due = store.due_cards()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&due)?);
            } else {
                println!("{} cards due", due.len());
                for card in &due {
                    print_card(card);
                }
            }
        }
        Command::Grade { card, grade } => {
            let schedule = store.grade_card(card, grade)?;
            println!(
                "Card {} graded {}: next review in {} day(s), on {}",
                card,
                grade,
                schedule.interval,
                schedule
                    .next_review_at
                    .map(format_timestamp)
                    .unwrap_or_else(|| "now".to_string())
            );
        }
        Command::Review => run_review(&store)?,
        Command::Stats { json } => {
            let library = store.load_library()?;
            let stats =
                LibraryStats::from_cards(library.cards(), store.current_time()?, config.mastered_after);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Library size: {}", stats.total);
                println!("Due today:    {}", stats.due_today);
                println!("New:          {} ({}%)", stats.new, stats.percent_of_total(stats.new));
                println!(
                    "Learning:     {} ({}%)",
                    stats.learning,
                    stats.percent_of_total(stats.learning)
                );
                println!(
                    "Mastered:     {} ({}%)",
                    stats.mastered,
                    stats.percent_of_total(stats.mastered)
                );
            }
        }
        Command::DeleteCard { card } => {
            store.delete_card(card)?;
            println!("Card {} deleted", card);
        }
        Command::DeleteCollection { collection } => {
            store.delete_collection(collection)?;
            println!("Collection {} deleted", collection);
        }
        Command::AdvanceDay => {
            let now = store.advance_day()?;
            println!("Simulated date is now {}", format_timestamp(now));
        }
    }

    Ok(())
}

/// Prompt loop: Enter reveals the definition, h/g/e grades, q quits.
fn run_review(store: &Store) -> Result<()> {
    let mut session = ReviewSession::start(store)?;
    if session.is_completed() {
        println!("Nothing is due. Come back later!");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(card) = session.current_card() {
        println!("\n{}", session.progress_message());
        println!("  {}", card.entry.word);
        if session.show_definition {
            println!("  = {}", card.entry.definition);
            if !card.entry.example_en.is_empty() {
                println!("  e.g. {} / {}", card.entry.example_en, card.entry.example_vn);
            }
            print!("[h]ard / [g]ood / [e]asy / [q]uit > ");
        } else {
            print!("[Enter] reveal / [q]uit > ");
        }
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        match line.trim() {
            "q" | "quit" => break,
            "" => session.toggle_definition(),
            input if session.show_definition => match input.parse::<Grade>() {
                Ok(grade) => {
                    let schedule = session
                        .grade_current_card(store, grade)?
                        .context("no card to grade")?;
                    println!("  next review in {} day(s)", schedule.interval);
                }
                Err(e) => println!("  {e}"),
            },
            _ => session.toggle_definition(),
        }
    }

    println!(
        "\nReviewed {} of {} cards",
        session.reviewed_count(),
        session.total_count()
    );
    Ok(())
}

fn print_card(card: &Card) {
    let due = match card.schedule.next_review_at {
        Some(at) => format_timestamp(at),
        None => "now".to_string(),
    };
    println!(
        "  #{} {} = {} (interval {}d, ease {:.2}, reps {}, due {})",
        card.id,
        card.entry.word,
        card.entry.definition,
        card.schedule.interval,
        card.schedule.ease_factor,
        card.schedule.repetition_count,
        due
    );
}

/// Formats epoch millis as YYYY-MM-DD in local time
fn format_timestamp(millis: Timestamp) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        None => millis.to_string(),
    }
}
