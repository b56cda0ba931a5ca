use crate::database::Database;
use crate::models::Flashcard;
use anyhow::{anyhow, Result};
use chrono::NaiveDate;

const SAMPLE_CARDS: &[(&str, &str)] = &[
    ("What is the capital of Portugal?", "Lisbon"),
    ("What is the chemical symbol for iron?", "Fe"),
    ("Who wrote \"Pride and Prejudice\"?", "Jane Austen"),
    ("How many bones are in the adult human body?", "206"),
    ("What is the smallest prime number?", "2"),
    ("Which planet has the most moons?", "Saturn"),
    ("What gas do plants absorb from the air?", "Carbon dioxide"),
    ("In which year did the Berlin Wall fall?", "1989"),
];

/// A small deck of general-knowledge cards, all due today.
pub fn sample_deck(today: NaiveDate) -> Vec<Flashcard> {
    SAMPLE_CARDS
        .iter()
        .map(|&(front, back)| Flashcard::with_defaults(front, back, today))
        .collect()
}

/// Creates a new card box, optionally seeded with [`sample_deck`].
/// Returns the number of cards written.
pub fn init(database: &Database, sample: bool, today: NaiveDate) -> Result<usize> {
    if database.exists() {
        return Err(anyhow!(
            "File {:?} already exists! Use `cardbox add` to add new cards. Aborting.",
            database.path()
        ));
    }
    let cards = if sample {
        sample_deck(today)
    } else {
        Vec::new()
    };
    database.create(&cards)?;
    Ok(cards.len())
}

#[test]
fn test_init_refuses_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let database = Database::new(dir.path().join("flashcards.txt"));
    let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();

    assert_eq!(init(&database, true, today).unwrap(), SAMPLE_CARDS.len());
    assert_eq!(database.read_flashcards().unwrap(), sample_deck(today));

    let err = init(&database, false, today).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert_eq!(database.read_flashcards().unwrap().len(), SAMPLE_CARDS.len());
}

#[test]
fn test_init_empty() {
    let dir = tempfile::tempdir().unwrap();
    let database = Database::new(dir.path().join("flashcards.txt"));
    let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
    assert_eq!(init(&database, false, today).unwrap(), 0);
    assert_eq!(std::fs::read_to_string(database.path()).unwrap(), "0\n");
}
