//! Random flashcards built from a noun list, handy for filling a deck when
//! trying things out.

use rand::Rng;

const WORDS_PER_SIDE: usize = 2;

/// One noun per non-blank line.
pub fn parse_nouns(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Concatenates capitalized nouns, never the same one twice in a row.
/// Returns `None` when there are fewer than two nouns to pick from.
pub fn random_phrase<G: Rng>(nouns: &[String], rng: &mut G) -> Option<String> {
    if nouns.len() < 2 {
        return None;
    }
    let mut phrase = String::new();
    let mut last = None;
    for _ in 0..WORDS_PER_SIDE {
        let index = loop {
            let candidate = rng.random_range(0..nouns.len());
            if Some(candidate) != last {
                break candidate;
            }
        };
        phrase.push_str(&capitalize(&nouns[index]));
        last = Some(index);
    }
    Some(phrase)
}

/// Front and back text for a random card.
pub fn random_sides<G: Rng>(nouns: &[String], rng: &mut G) -> Option<[String; 2]> {
    Some([random_phrase(nouns, rng)?, random_phrase(nouns, rng)?])
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
