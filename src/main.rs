use anyhow::{Context, Result};
use cardbox::add::{add_cards, add_random};
use cardbox::app::local_today;
use cardbox::export::export;
use cardbox::init::init;
use cardbox::random::parse_nouns;
use cardbox::review::study;
use cardbox::stats::stats;
use cardbox::utils::plural;
use cardbox::{App, Database, Field};
use clap::{Parser, Subcommand};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Subcommand)]
enum Command {
    /// Create a new card box
    Init {
        /// Seed the card box with a few sample cards
        #[arg(long)]
        sample: bool,
    },
    /// Add one card, random cards, or cards typed in interactively
    Add {
        #[arg(requires = "back")]
        front: Option<String>,
        back: Option<String>,
        /// Number of random cards to add
        #[arg(long, conflicts_with = "front", requires = "nouns")]
        random: Option<usize>,
        /// Noun list for random cards, one noun per line
        #[arg(long)]
        nouns: Option<PathBuf>,
    },
    /// Print every card with its index
    List,
    /// Replace all four fields of a card
    Edit {
        index: usize,
        front: String,
        back: String,
        /// e.g. "October 4, 2024"
        date: String,
        /// e.g. "5 days"
        interval: String,
    },
    /// Delete cards by index (strictly ascending)
    Delete {
        #[arg(required = true, allow_negative_numbers = true)]
        indices: Vec<i64>,
    },
    /// Sort the card box by one field
    Sort {
        field: Field,
        #[arg(long)]
        reverse: bool,
    },
    /// Review all cards due today
    Review,
    /// Show due count and interval statistics
    Stats,
    /// Write the card box as CSV
    Export { out: PathBuf },
}

/// Spaced-repetition flashcards kept in a plain text file.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Path to card box
    #[arg(short, long, default_value = "flashcards.txt")]
    file: PathBuf,
    /// Append logs to this file as well as stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Could not open log file {:?}", path))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();
    Ok(())
}

fn open(database: Database) -> Result<App> {
    let mut app = App::new(database);
    app.load().with_context(|| {
        format!(
            "Could not load {:?}. Use `cardbox init` to create a card box.",
            app.database().path()
        )
    })?;
    Ok(app)
}

fn list(app: &App) {
    let titles = Field::ALL.map(|field| field.title());
    println!("{:>5}  {}", "#", titles.join(" | "));
    for (index, card) in app.deck().iter().enumerate() {
        println!("{:>5}  {}", index, card.to_fields().join(" | "));
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.log_file.as_deref())?;
    let database = Database::new(&args.file);

    match args.command {
        Command::Init { sample } => {
            let count = init(&database, sample, local_today())?;
            println!(
                "Created card box {:?} with {} card{}.",
                args.file,
                count,
                plural(count)
            );
        }
        Command::Add {
            front,
            back,
            random,
            nouns,
        } => {
            let mut app = open(database)?;
            let added = match (random, nouns, front, back) {
                (Some(count), Some(nouns), _, _) => {
                    let text = fs::read_to_string(&nouns)
                        .with_context(|| format!("Could not read nouns from {:?}", nouns))?;
                    add_random(&mut app, &parse_nouns(&text), count, &mut rand::rng())?;
                    count
                }
                (_, _, Some(front), Some(back)) => {
                    app.add_flashcard(&[front, back])?;
                    1
                }
                _ => add_cards(&mut app, io::stdin().lock(), io::stdout().lock())?,
            };
            app.save()?;
            println!("Added {} card{}.", added, plural(added));
        }
        Command::List => list(&open(database)?),
        Command::Edit {
            index,
            front,
            back,
            date,
            interval,
        } => {
            let mut app = open(database)?;
            app.edit_flashcard(index, &[front, back, date, interval])
                .with_context(|| format!("Discarding edits to card #{}", index))?;
            app.save()?;
        }
        Command::Delete { indices } => {
            let mut app = open(database)?;
            app.delete_flashcards(&indices)?;
            app.save()?;
            println!("Deleted {} card{}.", indices.len(), plural(indices.len()));
        }
        Command::Sort { field, reverse } => {
            let mut app = open(database)?;
            app.sort_flashcards(Some(field), reverse)?;
            app.save()?;
        }
        Command::Review => {
            let mut app = open(database)?;
            study(&mut app, io::stdin().lock(), io::stdout().lock())?;
        }
        Command::Stats => {
            let app = open(database)?;
            println!("{}", stats(app.deck(), app.today()));
        }
        Command::Export { out } => {
            let app = open(database)?;
            let file =
                File::create(&out).with_context(|| format!("Could not create {:?}", out))?;
            export(app.deck().as_slice(), BufWriter::new(file))?;
            println!("Exported {} card{} to {:?}.", app.deck().len(), plural(app.deck().len()), out);
        }
    }
    Ok(())
}
