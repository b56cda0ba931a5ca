//! Flat-file persistence for a deck.
//!
//! # Format
//! ```text
//! 2
//! What is the chemical symbol for gold?
//! Au
//! October 4, 2024
//! 1 day
//! Who wrote "Hamlet"?
//! William Shakespeare
//! March 14, 2025
//! 12 days
//! ```
//!
//! A header line with the card count, then four lines per card: front, back,
//! review date and review interval. There is no escaping, so fronts and backs
//! cannot contain line breaks. Blank or extra lines anywhere are an error.

use crate::error::{Error, Result};
use crate::models::{Flashcard, FIELD_COUNT};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Serializes `cards` in deck order.
pub fn encode(cards: &[Flashcard]) -> Result<String> {
    for (i, card) in cards.iter().enumerate() {
        if has_line_break(card.front()) || has_line_break(card.back()) {
            return Err(Error::invalid(format!(
                "card #{} contains a line break and cannot be stored",
                i + 1
            )));
        }
    }
    let mut out = format!("{}\n", cards.len());
    for card in cards {
        for field in card.to_fields() {
            out.push_str(&field);
            out.push('\n');
        }
    }
    Ok(out)
}

/// Parses a whole database. Either every declared card is returned or the
/// input is rejected.
pub fn decode(text: &str) -> Result<Vec<Flashcard>> {
    let mut lines = text.lines();
    let header = lines
        .next()
        .ok_or_else(|| Error::DatabaseFormat(String::from("missing card count header")))?;
    let count: usize = header.parse().map_err(|_| {
        Error::DatabaseFormat(format!("header {:?} is not a card count", header))
    })?;
    debug!(count, "decoding flashcards");

    let mut cards = Vec::new();
    for n in 1..=count {
        let fields: Vec<&str> = lines.by_ref().take(FIELD_COUNT).collect();
        let [front, back, date, interval] = fields.as_slice() else {
            return Err(Error::DatabaseFormat(format!(
                "file is too short: expected {} cards, card #{} is incomplete",
                count, n
            )));
        };
        let card = Flashcard::parse(front, back, date, interval).map_err(|err| {
            Error::DatabaseFormat(format!("card #{} is incorrectly formatted: {}", n, err))
        })?;
        cards.push(card);
    }

    if lines.next().is_some() {
        return Err(Error::DatabaseFormat(format!(
            "file is too long: expected only {} cards",
            count
        )));
    }
    Ok(cards)
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

/// A deck stored in a single text file.
#[derive(Clone, Debug)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Database { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn read_flashcards(&self) -> Result<Vec<Flashcard>> {
        let text = fs::read_to_string(&self.path).map_err(|source| match source.kind() {
            io::ErrorKind::InvalidData => {
                Error::DatabaseFormat(format!("{:?} is not valid UTF-8 text", self.path))
            }
            _ => Error::DatabaseRead {
                path: self.path.clone(),
                source,
            },
        })?;
        let cards = decode(&text)?;
        info!(path = %self.path.display(), count = cards.len(), "read flashcards");
        Ok(cards)
    }

    /// Replaces the file's contents with `cards`. The whole file is encoded
    /// before the old one is truncated.
    pub fn write_flashcards(&self, cards: &[Flashcard]) -> Result<()> {
        let text = encode(cards)?;
        fs::write(&self.path, text).map_err(|source| self.write_error(source))?;
        info!(path = %self.path.display(), count = cards.len(), "wrote flashcards");
        Ok(())
    }

    /// Like [`Database::write_flashcards`], but fails if the file exists.
    pub fn create(&self, cards: &[Flashcard]) -> Result<()> {
        let text = encode(cards)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|source| self.write_error(source))?;
        file.write_all(text.as_bytes())
            .map_err(|source| self.write_error(source))?;
        info!(path = %self.path.display(), count = cards.len(), "created database");
        Ok(())
    }

    fn write_error(&self, source: io::Error) -> Error {
        Error::DatabaseWrite {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn regular_cards() -> Vec<Flashcard> {
        vec![
            Flashcard::from_epoch_day("Front", "Back", -137989, 3).unwrap(),
            Flashcard::from_epoch_day("Flashcards are", "useful for learning", -70672, 12).unwrap(),
        ]
    }

    const REGULAR: &str = "2
Front
Back
March 14, 1592
3 days
Flashcards are
useful for learning
July 4, 1776
12 days
";

    fn format_error(text: &str) -> String {
        let err = decode(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DatabaseFormat, "{err}");
        err.to_string()
    }

    #[test]
    fn encodes_header_and_four_lines_per_card() {
        let text = encode(&regular_cards()).unwrap();
        assert_eq!(text, REGULAR);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "2");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn decodes_what_it_encodes() {
        let decks = [
            regular_cards(),
            vec![
                Flashcard::from_epoch_day("", "", 0, 1).unwrap(),
                Flashcard::from_epoch_day("", "", 0, 1).unwrap(),
            ],
            vec![],
            vec![Flashcard::new("Front", "Back", day(2020, 2, 29), 9).unwrap()],
            vec![Flashcard::new("  spaced  ", "día", day(9999, 12, 31), i64::MAX).unwrap()],
        ];
        for cards in decks {
            let text = encode(&cards).unwrap();
            assert_eq!(decode(&text).unwrap(), cards);
        }
    }

    #[test]
    fn empty_deck_is_just_a_header() {
        assert_eq!(encode(&[]).unwrap(), "0\n");
        assert!(decode("0\n").unwrap().is_empty());
        assert!(decode("0").unwrap().is_empty());
    }

    #[test]
    fn rejects_line_breaks_in_fields() {
        let today = day(2025, 1, 1);
        for card in [
            Flashcard::with_defaults("two\nlines", "b", today),
            Flashcard::with_defaults("f", "carriage\rreturn", today),
        ] {
            let err = encode(&[card]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn short_file_is_rejected() {
        let text = "2\nFront\nBack\nMarch 14, 1592\n3 days\nFlashcards are\nuseful\n";
        assert!(format_error(text).contains("too short"));
        assert!(format_error("1\n").contains("too short"));
    }

    #[test]
    fn long_file_is_rejected() {
        let text = format!("{}extra\n", REGULAR);
        assert!(format_error(&text).contains("too long"));
        let text = format!("{}\n", REGULAR);
        assert!(format_error(&text).contains("too long"));
    }

    #[test]
    fn header_must_be_a_count() {
        format_error("");
        format_error("Front\nBack\nMarch 14, 1592\n3 days\n");
        format_error("1.0\nFront\nBack\nMarch 14, 1592\n3 days\n");
        format_error("-1\n");
    }

    #[test]
    fn bad_fields_are_wrapped_with_their_complaint() {
        let illegal = "1\nFront\nBack\nFebruary 30, 2023\n3 days\n";
        let message = format_error(illegal);
        assert!(message.contains("card #1"), "{message}");
        assert!(message.contains("February 30, 2023"), "{message}");

        format_error("1\nFront\nBack\n2023-02-03\n3 days\n");
        format_error("1\nFront\nBack\nMar 14, 1592\n3 days\n");
        format_error("1\nFront\nBack\nMarch 14, 92\n3 days\n");

        let message = format_error("1\nFront\nBack\nMarch 14, 1592\nthree days\n");
        assert!(message.contains("three days"), "{message}");
        format_error("1\nFront\nBack\nMarch 14, 1592\n0 days\n");
    }

    #[test]
    fn database_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("flashcards.txt"));
        assert!(!db.exists());

        db.write_flashcards(&regular_cards()).unwrap();
        assert_eq!(fs::read_to_string(db.path()).unwrap(), REGULAR);
        assert_eq!(db.read_flashcards().unwrap(), regular_cards());

        // rewriting truncates
        db.write_flashcards(&regular_cards()[..1]).unwrap();
        assert_eq!(db.read_flashcards().unwrap(), regular_cards()[..1].to_vec());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("does not exist"));
        assert_eq!(db.read_flashcards().unwrap_err().kind(), ErrorKind::DatabaseRead);
    }

    #[test]
    fn non_utf8_file_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("flashcards.txt"));
        fs::write(db.path(), b"1\nFr\xffnt\nBack\nMarch 14, 1592\n3 days\n").unwrap();
        assert_eq!(db.read_flashcards().unwrap_err().kind(), ErrorKind::DatabaseFormat);
    }

    #[test]
    fn unwritable_destination_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("no-such-dir").join("flashcards.txt"));
        let err = db.write_flashcards(&regular_cards()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DatabaseWrite);
    }

    #[test]
    fn failed_encode_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("flashcards.txt"));
        db.write_flashcards(&regular_cards()).unwrap();

        let bad = Flashcard::with_defaults("a\nb", "c", day(2025, 1, 1));
        db.write_flashcards(&[bad]).unwrap_err();
        assert_eq!(fs::read_to_string(db.path()).unwrap(), REGULAR);
    }

    #[test]
    fn create_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("flashcards.txt"));
        db.create(&[]).unwrap();
        assert!(db.read_flashcards().unwrap().is_empty());
        let err = db.create(&regular_cards()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DatabaseWrite);
        assert_eq!(fs::read_to_string(db.path()).unwrap(), "0\n");
    }
}
