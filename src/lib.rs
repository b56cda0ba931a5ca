//! Spaced-repetition card box.
//!
//! Each card has a front, a back, a review date and a review interval in
//! days. Recalling a card pushes its next review out and lengthens the
//! interval by a factor of 1.6; forgetting it makes it due today again with
//! a one day interval.

pub mod add;
pub mod app;
pub mod database;
pub mod deck;
pub mod error;
pub mod export;
pub mod init;
pub mod models;
pub mod random;
pub mod review;
pub mod sort;
pub mod stats;
pub mod utils;

pub use app::{App, SessionView};
pub use database::Database;
pub use deck::Deck;
pub use error::{Error, ErrorKind, Result};
pub use models::{Field, Flashcard};
pub use review::{GradeOutcome, ReviewSession, SessionState, Side, StartOutcome};
