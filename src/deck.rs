use crate::error::{Error, Result};
use crate::models::{Field, Flashcard, FIELD_COUNT};
use crate::sort::merge_sort;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// The ordered collection of cards. Order is meaningful: it is the display
/// order and the order written to disk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Flashcard>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Flashcard> {
        self.cards.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Flashcard> {
        self.cards.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Flashcard> {
        self.cards.iter()
    }

    pub fn as_slice(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn into_vec(self) -> Vec<Flashcard> {
        self.cards
    }

    pub fn push(&mut self, card: Flashcard) {
        self.cards.push(card);
    }

    /// Indices of all cards due on `today`, in deck order.
    pub fn due_indices(&self, today: NaiveDate) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_due(today))
            .map(|(i, _)| i)
            .collect()
    }

    /// Appends a new card built from `[front, back]`, due today.
    pub fn add<S: AsRef<str>>(&mut self, fields: &[S], today: NaiveDate) -> Result<&Flashcard> {
        let [front, back] = fields else {
            return Err(Error::invalid(format!(
                "adding a card needs a front and a back, got {} fields",
                fields.len()
            )));
        };
        self.cards
            .push(Flashcard::with_defaults(front.as_ref(), back.as_ref(), today));
        debug!(index = self.cards.len() - 1, "added flashcard");
        Ok(&self.cards[self.cards.len() - 1])
    }

    /// Replaces the card at `index` with one parsed from all four fields.
    ///
    /// A malformed date or interval leaves the deck untouched and returns a
    /// recoverable [`Error::DateFormat`] or [`Error::IntervalFormat`].
    pub fn edit<S: AsRef<str>>(&mut self, index: usize, fields: &[S]) -> Result<()> {
        let [front, back, date, interval] = fields else {
            return Err(Error::invalid(format!(
                "editing a card needs {} fields, got {}",
                FIELD_COUNT,
                fields.len()
            )));
        };
        let len = self.cards.len();
        let Some(slot) = self.cards.get_mut(index) else {
            return Err(Error::invalid(format!(
                "card index {} out of range for {} cards",
                index, len
            )));
        };
        match Flashcard::parse(front.as_ref(), back.as_ref(), date.as_ref(), interval.as_ref()) {
            Ok(card) => {
                *slot = card;
                debug!(index, "edited flashcard");
                Ok(())
            }
            Err(err) => {
                warn!(index, error = %err, "discarding edits to flashcard");
                Err(err)
            }
        }
    }

    /// Removes the cards at `indices`, which must be strictly ascending and
    /// in range. Nothing is removed if any index is invalid.
    pub fn delete(&mut self, indices: &[usize]) -> Result<()> {
        for pair in indices.windows(2) {
            if pair[0] >= pair[1] {
                return Err(Error::invalid(format!(
                    "indices to delete must be strictly ascending, got {} before {}",
                    pair[0], pair[1]
                )));
            }
        }
        if let Some(&last) = indices.last() {
            if last >= self.cards.len() {
                return Err(Error::invalid(format!(
                    "card index {} out of range for {} cards",
                    last,
                    self.cards.len()
                )));
            }
        }
        // back to front so earlier removals don't shift later indices
        for &index in indices.iter().rev() {
            self.cards.remove(index);
        }
        debug!(count = indices.len(), "deleted flashcards");
        Ok(())
    }

    /// Reorders the deck by `field`. An empty deck is left as is.
    pub fn sort(&mut self, field: Field, reversed: bool) -> Result<()> {
        if self.cards.is_empty() {
            return Ok(());
        }
        self.cards = merge_sort(&self.cards, field, reversed)?;
        debug!(%field, reversed, "sorted flashcards");
        Ok(())
    }
}

impl From<Vec<Flashcard>> for Deck {
    fn from(cards: Vec<Flashcard>) -> Self {
        Deck { cards }
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Flashcard;
    type IntoIter = std::slice::Iter<'a, Flashcard>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
