use crate::app::App;
use crate::deck::Deck;
use crate::error::{Error, Result};
use crate::models::Flashcard;
use crate::utils::{clear, plural, read_line};
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Which side of the current card is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    /// `index` points into the deck the session was started on.
    Reviewing { index: usize, side: Side },
    Success,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    NothingDue,
    Started { due: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradeOutcome {
    /// Another card is up, front side first.
    Next { index: usize },
    /// Every due card was recalled; the session is over.
    Finished,
}

/// Drives one pass over the due cards of a deck.
///
/// Cards graded as failed go to the back of the queue, so they come around
/// again only after every other due card has been graded once. The session
/// ends when every card has been recalled successfully.
#[derive(Clone, Debug, Default)]
pub struct ReviewSession {
    state: SessionState,
    queue: VecDeque<usize>,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of gradings still needed if every remaining card succeeds.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.queue.clear();
    }

    /// Queues every card due on `today`, in deck order.
    pub fn start(&mut self, deck: &Deck, today: NaiveDate) -> StartOutcome {
        self.queue = deck.due_indices(today).into();
        match self.queue.front() {
            None => {
                self.state = SessionState::Idle;
                info!("no flashcards due");
                StartOutcome::NothingDue
            }
            Some(&index) => {
                self.state = SessionState::Reviewing {
                    index,
                    side: Side::Front,
                };
                info!(due = self.queue.len(), "started review session");
                StartOutcome::Started {
                    due: self.queue.len(),
                }
            }
        }
    }

    pub fn flip(&mut self) -> Result<()> {
        match self.state {
            SessionState::Reviewing {
                index,
                side: Side::Front,
            } => {
                self.state = SessionState::Reviewing {
                    index,
                    side: Side::Back,
                };
                Ok(())
            }
            SessionState::Reviewing { .. } => Err(Error::invalid("the card is already flipped")),
            _ => Err(Error::invalid("no card is being reviewed")),
        }
    }

    /// Reschedules the current card and moves on to the next one.
    pub fn grade(&mut self, deck: &mut Deck, success: bool, today: NaiveDate) -> Result<GradeOutcome> {
        let index = match self.state {
            SessionState::Reviewing {
                index,
                side: Side::Back,
            } => index,
            SessionState::Reviewing { .. } => {
                return Err(Error::invalid("flip the card before grading it"))
            }
            _ => return Err(Error::invalid("no card is being reviewed")),
        };
        let card = deck
            .get_mut(index)
            .ok_or_else(|| Error::invalid(format!("card #{} is no longer in the deck", index + 1)))?;
        card.update_review(success, today);

        self.queue.pop_front();
        if !success {
            self.queue.push_back(index);
        }
        debug!(index, success, remaining = self.queue.len(), "graded flashcard");

        match self.queue.front() {
            None => {
                self.state = SessionState::Success;
                info!("review session complete");
                Ok(GradeOutcome::Finished)
            }
            Some(&next) => {
                self.state = SessionState::Reviewing {
                    index: next,
                    side: Side::Front,
                };
                Ok(GradeOutcome::Next { index: next })
            }
        }
    }

    pub fn current_card<'d>(&self, deck: &'d Deck) -> Option<&'d Flashcard> {
        match self.state {
            SessionState::Reviewing { index, .. } => deck.get(index),
            _ => None,
        }
    }
}

/// Tally of an interactive study session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub reviews: usize,
    pub cards: usize,
}

/// Lets the user study every due card until all of them have been recalled.
/// The deck is saved after every grading.
pub fn study<R, W>(app: &mut App, mut stdin: R, mut stdout: W) -> anyhow::Result<Tally>
where
    R: BufRead,
    W: Write,
{
    let cards = match app.start_study() {
        StartOutcome::NothingDue => {
            writeln!(stdout, "No cards due for review in {:?}", app.database().path())?;
            return Ok(Tally::default());
        }
        StartOutcome::Started { due } => due,
    };
    clear(&mut stdout)?;
    writeln!(stdout, "{} card{} to review\n", cards, plural(cards))?;

    let mut reviews = 0;
    while let Some(card) = app.current_card() {
        let (front, back) = (card.front().to_string(), card.back().to_string());
        write!(stdout, "F: {}", front)?;
        stdout.flush()?;
        read_line(&mut stdin)?;
        app.flip()?;

        writeln!(stdout, "B: {}", back)?;
        let success = ask_correct(&mut stdin, &mut stdout)?;
        let outcome = app.grade_review(success)?;
        app.save()?;
        reviews += 1;
        writeln!(stdout)?;
        clear(&mut stdout)?;
        stdout.flush()?;
        if outcome == GradeOutcome::Finished {
            break;
        }
    }

    writeln!(
        stdout,
        "{} review{} of {} card{}. Done.",
        reviews,
        plural(reviews),
        cards,
        plural(cards)
    )?;
    Ok(Tally { reviews, cards })
}

fn ask_correct<R: BufRead, W: Write>(stdin: &mut R, stdout: &mut W) -> anyhow::Result<bool> {
    loop {
        write!(stdout, "Correct? [y/n] ")?;
        stdout.flush()?;
        match read_line(&mut *stdin)?.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => continue,
        }
    }
}
