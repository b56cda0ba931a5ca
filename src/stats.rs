use crate::deck::Deck;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Counts {
    day: u64,
    week: u64,
    month: u64,
    quarter: u64,
    year: u64,
    more: u64,
}

impl Counts {
    fn increment_count(&mut self, days: i64) {
        match days {
            ..=1 => self.day += 1,
            2..7 => self.week += 1,
            7..30 => self.month += 1,
            30..90 => self.quarter += 1,
            90..365 => self.year += 1,
            _ => self.more += 1,
        }
    }

    fn total(&self) -> u64 {
        self.day + self.week + self.month + self.quarter + self.year + self.more
    }
}

/// Due count and review interval histogram of a deck.
#[derive(Debug, PartialEq, Eq)]
pub struct Stats {
    pub due: usize,
    pub intervals: Counts,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let c = &self.intervals;
        write!(
            f,
            concat!(
                "Due today: {}\n\n",
                "Review intervals:\n",
                "  =day     {}\n",
                "  <week    {}\n",
                "  <month   {}\n",
                "  <quarter {}\n",
                "  <year    {}\n",
                "  >=year   {}\n\n",
                "Total: {}"
            ),
            self.due,
            c.day,
            c.week,
            c.month,
            c.quarter,
            c.year,
            c.more,
            c.total(),
        )
    }
}

pub fn stats(deck: &Deck, today: NaiveDate) -> Stats {
    let mut intervals = Counts::default();
    for card in deck {
        intervals.increment_count(card.review_interval());
    }
    Stats {
        due: deck.due_indices(today).len(),
        intervals,
    }
}

#[test]
fn test_stats_buckets() {
    use crate::models::Flashcard;

    let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
    let tomorrow = NaiveDate::from_ymd_opt(2025, 5, 11).unwrap();
    let deck: Deck = [1, 1, 6, 7, 29, 30, 364, 365, 1000]
        .iter()
        .enumerate()
        .map(|(i, &n)| {
            let date = if i % 2 == 0 { today } else { tomorrow };
            Flashcard::new(format!("{i}"), "", date, n).unwrap()
        })
        .collect::<Vec<_>>()
        .into();

    let stats = stats(&deck, today);
    assert_eq!(stats.due, 5);
    assert_eq!(
        stats.intervals,
        Counts {
            day: 2,
            week: 1,
            month: 2,
            quarter: 1,
            year: 1,
            more: 2,
        }
    );
    assert!(stats.to_string().ends_with("Total: 9"));
    assert!(stats.to_string().starts_with("Due today: 5\n"));
}
