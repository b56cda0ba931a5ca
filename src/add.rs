use crate::app::App;
use crate::random::random_sides;
use crate::utils::read_line;
use anyhow::{anyhow, Result};
use rand::Rng;
use std::io::{self, BufRead, Write};

/// Lets the user add as many cards as they want. An empty front ends the
/// loop. Returns the number of cards added.
pub fn add_cards<R, W>(app: &mut App, mut stdin: R, mut stdout: W) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut added = 0;
    loop {
        stdout.write_all(b"Front: ")?;
        stdout.flush()?;
        let front = match read_line(&mut stdin) {
            Ok(front) => front,
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Ok(added),
            Err(err) => return Err(err.into()),
        };
        if front.is_empty() {
            return Ok(added);
        }
        stdout.write_all(b"Back:  ")?;
        stdout.flush()?;
        let back = read_line(&mut stdin)?;
        app.add_flashcard(&[front, back])?;
        added += 1;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
    }
}

/// Adds `count` cards made of random nouns.
pub fn add_random<G: Rng>(app: &mut App, nouns: &[String], count: usize, rng: &mut G) -> Result<()> {
    for _ in 0..count {
        let sides = random_sides(nouns, rng)
            .ok_or_else(|| anyhow!("Need at least two nouns to make random cards."))?;
        app.add_flashcard(&sides)?;
    }
    Ok(())
}

#[cfg(test)]
fn test_app(dir: &tempfile::TempDir) -> App {
    use crate::database::Database;
    use chrono::NaiveDate;

    App::new(Database::new(dir.path().join("flashcards.txt")))
        .with_clock(|| NaiveDate::from_ymd_opt(2025, 5, 10).unwrap())
}

#[test]
fn test_add_cards_until_empty_front() {
    use std::io::Cursor;

    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(&dir);
    let mut stdout = Cursor::new(Vec::new());
    let stdin = Cursor::new(b"a\nb\nc\nd\n\ne\nf\n");

    assert_eq!(add_cards(&mut app, stdin, &mut stdout).unwrap(), 2);

    // Check prompts
    let stdout_vec = stdout.into_inner();
    assert_eq!(
        String::from_utf8_lossy(&stdout_vec),
        "Front: Back:  \nFront: Back:  \nFront: "
    );

    let fronts: Vec<&str> = app.deck().iter().map(|c| c.front()).collect();
    assert_eq!(fronts, vec!["a", "c"]);
    assert_eq!(app.deck().get(1).unwrap().back(), "d");
}

#[test]
fn test_add_cards_stops_at_end_of_input() {
    use std::io::Cursor;

    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(&dir);
    let stdin = Cursor::new(b"a\nb\n");
    assert_eq!(add_cards(&mut app, stdin, io::sink()).unwrap(), 1);
}

#[test]
fn test_add_random_needs_two_nouns() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(&dir);
    let mut rng = StdRng::seed_from_u64(3);
    let nouns: Vec<String> = ["river", "lamp", "garden"].map(String::from).to_vec();

    add_random(&mut app, &nouns, 5, &mut rng).unwrap();
    assert_eq!(app.deck().len(), 5);
    for card in app.deck() {
        assert_eq!(card.review_interval(), 1);
        assert_eq!(card.review_date(), app.today());
    }

    let err = add_random(&mut app, &nouns[..1], 1, &mut rng).unwrap_err();
    assert!(err.to_string().contains("at least two nouns"));
    assert_eq!(app.deck().len(), 5);
}
