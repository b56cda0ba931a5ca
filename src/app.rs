use crate::database::Database;
use crate::deck::Deck;
use crate::error::{Error, Result};
use crate::models::{Field, Flashcard};
use crate::review::{GradeOutcome, ReviewSession, SessionState, Side, StartOutcome};
use chrono::{Local, NaiveDate};
use tracing::info;

/// Source of "today" for scheduling.
pub type Clock = fn() -> NaiveDate;

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// What a front end should be showing for the review session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionView<'a> {
    Idle,
    Card { card: &'a Flashcard, side: Side },
    Complete,
}

impl<'a> SessionView<'a> {
    /// The text on the visible side of the current card.
    pub fn text(&self) -> Option<&'a str> {
        match *self {
            SessionView::Card {
                card,
                side: Side::Front,
            } => Some(card.front()),
            SessionView::Card {
                card,
                side: Side::Back,
            } => Some(card.back()),
            _ => None,
        }
    }
}

/// The deck, where it is stored, and the review session running over it.
///
/// Operations that remove or reorder cards end any running review session,
/// since the session refers to cards by position.
#[derive(Debug)]
pub struct App {
    deck: Deck,
    database: Database,
    session: ReviewSession,
    clock: Clock,
}

impl App {
    pub fn new(database: Database) -> Self {
        App {
            deck: Deck::new(),
            database,
            session: ReviewSession::new(),
            clock: local_today,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Replaces the deck with the database contents. On error the current
    /// deck is kept.
    pub fn load(&mut self) -> Result<usize> {
        let cards = self.database.read_flashcards()?;
        self.deck = cards.into();
        self.session.reset();
        Ok(self.deck.len())
    }

    pub fn save(&self) -> Result<()> {
        self.database.write_flashcards(self.deck.as_slice())
    }

    pub fn add_flashcard<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<&Flashcard> {
        let today = self.today();
        self.deck.add(fields, today)
    }

    pub fn edit_flashcard<S: AsRef<str>>(&mut self, index: usize, fields: &[S]) -> Result<()> {
        self.deck.edit(index, fields)
    }

    /// Deletes the cards at `indices` (strictly ascending, non-negative).
    pub fn delete_flashcards(&mut self, indices: &[i64]) -> Result<()> {
        let indices = indices
            .iter()
            .map(|&i| {
                usize::try_from(i).map_err(|_| Error::invalid(format!("negative card index {}", i)))
            })
            .collect::<Result<Vec<_>>>()?;
        self.deck.delete(&indices)?;
        self.session.reset();
        Ok(())
    }

    pub fn sort_flashcards(&mut self, field: Option<Field>, reversed: bool) -> Result<()> {
        let field = field.ok_or(Error::NullInput("sort field"))?;
        self.deck.sort(field, reversed)?;
        self.session.reset();
        info!(%field, reversed, "sorted deck");
        Ok(())
    }

    pub fn start_study(&mut self) -> StartOutcome {
        let today = self.today();
        self.session.start(&self.deck, today)
    }

    pub fn flip(&mut self) -> Result<()> {
        self.session.flip()
    }

    pub fn grade_review(&mut self, success: bool) -> Result<GradeOutcome> {
        let today = self.today();
        self.session.grade(&mut self.deck, success, today)
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        self.session.current_card(&self.deck)
    }

    pub fn session_view(&self) -> SessionView<'_> {
        match self.session.state() {
            SessionState::Idle => SessionView::Idle,
            SessionState::Success => SessionView::Complete,
            SessionState::Reviewing { index, side } => match self.deck.get(index) {
                Some(card) => SessionView::Card { card, side },
                None => SessionView::Idle,
            },
        }
    }
}
