use crate::error::{Error, Result};
use crate::models::{Field, Flashcard};

/// Sorts all cards by `field`, returning a new vector.
pub fn merge_sort(cards: &[Flashcard], field: Field, reversed: bool) -> Result<Vec<Flashcard>> {
    merge_sort_window(cards, field, reversed, 0, cards.len())
}

/// Sorts the `len` cards starting at `start`.
///
/// Ties are resolved purely by [`Flashcard::compare`], so equal cards keep
/// their relative order when sorting forwards and may swap when `reversed`.
pub fn merge_sort_window(
    cards: &[Flashcard],
    field: Field,
    reversed: bool,
    start: usize,
    len: usize,
) -> Result<Vec<Flashcard>> {
    if cards.is_empty() {
        return Err(Error::invalid("cannot sort an empty list of cards"));
    }
    if len == 0 {
        return Err(Error::invalid("cannot sort an empty window"));
    }
    let end = start
        .checked_add(len)
        .filter(|&end| end <= cards.len())
        .ok_or_else(|| {
            Error::invalid(format!(
                "window of {} cards at {} exceeds {} cards",
                len,
                start,
                cards.len()
            ))
        })?;
    Ok(sort_refs(&cards[start..end], field, reversed)
        .into_iter()
        .cloned()
        .collect())
}

fn sort_refs(cards: &[Flashcard], field: Field, reversed: bool) -> Vec<&Flashcard> {
    match cards {
        [only] => vec![only],
        [first, second] => {
            if first.compare(second, field, reversed) {
                vec![first, second]
            } else {
                vec![second, first]
            }
        }
        _ => {
            let (left, right) = cards.split_at(cards.len() / 2);
            merge(
                sort_refs(left, field, reversed),
                sort_refs(right, field, reversed),
                field,
                reversed,
            )
        }
    }
}

fn merge<'a>(
    left: Vec<&'a Flashcard>,
    right: Vec<&'a Flashcard>,
    field: Field,
    reversed: bool,
) -> Vec<&'a Flashcard> {
    let mut sorted = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l.compare(r, field, reversed),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        sorted.extend(next);
    }
    sorted
}
