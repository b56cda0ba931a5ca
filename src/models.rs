use crate::error::{Error, Result};
use crate::utils::{format_date, format_interval, parse_date, parse_interval};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::fmt;
use struct_field_names_as_array::FieldNamesAsArray;

/// Number of text fields in a fully specified card.
pub const FIELD_COUNT: usize = 4;

// 1970-01-01 counted from 0001-01-01 as day one
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// One of the four sortable/editable attributes of a [`Flashcard`].
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Front,
    Back,
    ReviewDate,
    ReviewInterval,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Front,
        Field::Back,
        Field::ReviewDate,
        Field::ReviewInterval,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Field::Front => "Front",
            Field::Back => "Back",
            Field::ReviewDate => "Review Date",
            Field::ReviewInterval => "Review Interval",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, FieldNamesAsArray)]
pub struct Flashcard {
    front: String,
    back: String,
    review_date: NaiveDate,
    review_interval: i64,
}

impl Flashcard {
    /// Creates a card. The review interval is in days and must be at least one.
    pub fn new(
        front: impl Into<String>,
        back: impl Into<String>,
        review_date: NaiveDate,
        review_interval: i64,
    ) -> Result<Self> {
        if review_interval <= 0 {
            return Err(Error::invalid(format!(
                "review interval must be at least one day, got {}",
                review_interval
            )));
        }
        Ok(Flashcard {
            front: front.into(),
            back: back.into(),
            review_date,
            review_interval,
        })
    }

    /// A fresh card: due today, one day interval.
    pub fn with_defaults(front: impl Into<String>, back: impl Into<String>, today: NaiveDate) -> Self {
        Flashcard {
            front: front.into(),
            back: back.into(),
            review_date: today,
            review_interval: 1,
        }
    }

    /// Like [`Flashcard::new`], with the date given as days since 1970-01-01.
    pub fn from_epoch_day(
        front: impl Into<String>,
        back: impl Into<String>,
        epoch_day: i64,
        review_interval: i64,
    ) -> Result<Self> {
        let date = i32::try_from(epoch_day)
            .ok()
            .and_then(|days| days.checked_add(EPOCH_DAYS_FROM_CE))
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .ok_or_else(|| Error::invalid(format!("epoch day {} out of range", epoch_day)))?;
        Flashcard::new(front, back, date, review_interval)
    }

    /// Builds a card from its textual representation, as produced by
    /// [`Flashcard::to_fields`].
    pub fn parse(front: &str, back: &str, review_date: &str, review_interval: &str) -> Result<Self> {
        Flashcard::new(
            front,
            back,
            parse_date(review_date)?,
            parse_interval(review_interval)?,
        )
    }

    /// Builds a card from text fields: either `[front, back]` (defaults for
    /// the rest) or `[front, back, review date, review interval]`.
    pub fn from_fields<S: AsRef<str>>(fields: &[S], today: NaiveDate) -> Result<Self> {
        match fields {
            [front, back] => Ok(Flashcard::with_defaults(
                front.as_ref(),
                back.as_ref(),
                today,
            )),
            [front, back, date, interval] => Flashcard::parse(
                front.as_ref(),
                back.as_ref(),
                date.as_ref(),
                interval.as_ref(),
            ),
            _ => Err(Error::invalid(format!(
                "a card needs two or four fields, got {}",
                fields.len()
            ))),
        }
    }

    pub fn to_fields(&self) -> [String; FIELD_COUNT] {
        [
            self.front.clone(),
            self.back.clone(),
            format_date(self.review_date),
            format_interval(self.review_interval),
        ]
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    pub fn review_date(&self) -> NaiveDate {
        self.review_date
    }

    pub fn review_interval(&self) -> i64 {
        self.review_interval
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.review_date <= today
    }

    /// Reschedules the card after a review.
    ///
    /// On success the card is due again after the current interval, and the
    /// interval grows to `floor(interval * 1.6) + 1`. On failure the card is
    /// due today with a one day interval.
    pub fn update_review(&mut self, success: bool, today: NaiveDate) {
        if success {
            self.review_date = today
                .checked_add_days(Days::new(self.review_interval as u64))
                .unwrap_or(NaiveDate::MAX);
            self.review_interval = grow_interval(self.review_interval);
        } else {
            self.review_date = today;
            self.review_interval = 1;
        }
    }

    /// Whether `self` may come before `other` when ordering by `field`.
    ///
    /// The base relation is `<=` (case-insensitive for text). `reversed`
    /// negates it, so two cards that tie on `field` compare `true` forwards
    /// and `false` reversed.
    pub fn compare(&self, other: &Flashcard, field: Field, reversed: bool) -> bool {
        let in_order = match field {
            Field::Front => self.front.to_lowercase() <= other.front.to_lowercase(),
            Field::Back => self.back.to_lowercase() <= other.back.to_lowercase(),
            Field::ReviewDate => self.review_date <= other.review_date,
            Field::ReviewInterval => self.review_interval <= other.review_interval,
        };
        in_order != reversed
    }
}

// floor(x * 1.6) + 1, in exact integer arithmetic
fn grow_interval(interval: i64) -> i64 {
    (interval / 5)
        .saturating_mul(8)
        .saturating_add(interval % 5 * 8 / 5)
        .saturating_add(1)
}

impl fmt::Display for Flashcard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [front, back, date, interval] = self.to_fields();
        write!(
            f,
            "Flashcard(front: {:?}, back: {:?}, reviewDate: {:?}, reviewInterval: {:?})",
            front, back, date, interval
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn card_with_interval(interval: i64) -> Flashcard {
        Flashcard::new("q", "a", day(2025, 1, 1), interval).unwrap()
    }

    #[test]
    fn construction_rejects_non_positive_interval() {
        for interval in [0, -1, i64::MIN] {
            let err = Flashcard::new("f", "b", day(2025, 1, 1), interval).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn defaults_are_today_and_one_day() {
        let today = day(2025, 5, 10);
        let card = Flashcard::with_defaults("f", "b", today);
        assert_eq!(card.review_date(), today);
        assert_eq!(card.review_interval(), 1);
        assert!(card.is_due(today));
        assert!(!card.is_due(day(2025, 5, 9)));
    }

    #[test]
    fn epoch_days_may_be_negative() {
        let card = Flashcard::from_epoch_day("Front", "Back", -137989, 3).unwrap();
        assert_eq!(card.review_date(), day(1592, 3, 14));
        let card = Flashcard::from_epoch_day("Front", "Back", 18321, 9).unwrap();
        assert_eq!(card.review_date(), day(2020, 2, 29));
    }

    #[test]
    fn from_fields_accepts_two_or_four() {
        let today = day(2025, 5, 10);
        let short = Flashcard::from_fields(&["f", "b"], today).unwrap();
        assert_eq!(short, Flashcard::with_defaults("f", "b", today));

        let full = Flashcard::from_fields(&["f", "b", "October 4, 2024", "12 days"], today).unwrap();
        assert_eq!(full, Flashcard::new("f", "b", day(2024, 10, 4), 12).unwrap());
        assert_eq!(
            full.to_fields(),
            ["f", "b", "October 4, 2024", "12 days"].map(String::from)
        );

        for fields in [&["f"][..], &["f", "b", "c"][..], &[][..]] {
            let err = Flashcard::from_fields(fields, today).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn from_fields_reports_which_field_is_malformed() {
        let today = day(2025, 5, 10);
        let err = Flashcard::from_fields(&["f", "b", "Octember 4, 2024", "1 day"], today).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DateFormat);
        let err = Flashcard::from_fields(&["f", "b", "October 4, 2024", "0 days"], today).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IntervalFormat);
    }

    #[test]
    fn success_grows_interval_and_pushes_date() {
        let today = day(2025, 5, 10);
        let mut card = Flashcard::with_defaults("f", "b", today);

        card.update_review(true, today);
        assert_eq!(card.review_interval(), 2);
        assert_eq!(card.review_date(), day(2025, 5, 11));

        let tomorrow = day(2025, 5, 11);
        card.update_review(true, tomorrow);
        assert_eq!(card.review_interval(), 4);
        assert_eq!(card.review_date(), day(2025, 5, 13));
    }

    #[test]
    fn growth_matches_floor_of_one_point_six() {
        let today = day(2025, 1, 1);
        for interval in 1..2000 {
            let mut card = card_with_interval(interval);
            card.update_review(true, today);
            let expected = (interval as f64 * 1.6).floor() as i64 + 1;
            assert_eq!(card.review_interval(), expected, "interval {interval}");
            assert!(card.review_interval() > interval);
            assert_eq!(card.review_date(), today + Days::new(interval as u64));
        }
    }

    #[test]
    fn failure_resets_regardless_of_state() {
        let today = day(2025, 5, 10);
        for interval in [1, 2, 38, 10_000] {
            let mut card = card_with_interval(interval);
            card.update_review(false, today);
            assert_eq!(card.review_interval(), 1);
            assert_eq!(card.review_date(), today);
        }
    }

    #[test]
    fn huge_intervals_saturate() {
        let mut card = card_with_interval(i64::MAX);
        card.update_review(true, day(2025, 1, 1));
        assert_eq!(card.review_interval(), i64::MAX);
        assert_eq!(card.review_date(), NaiveDate::MAX);
    }

    #[test]
    fn text_fields_compare_case_insensitively() {
        let apple = Flashcard::with_defaults("apple", "Zebra", day(2025, 1, 1));
        let banana = Flashcard::with_defaults("Banana", "yak", day(2025, 1, 1));
        assert!(apple.compare(&banana, Field::Front, false));
        assert!(!banana.compare(&apple, Field::Front, false));
        assert!(banana.compare(&apple, Field::Back, false));
        assert!(!apple.compare(&banana, Field::Back, false));
    }

    #[test]
    fn reversed_compare_negates_ties_too() {
        let a = Flashcard::new("Same", "x", day(2025, 1, 1), 5).unwrap();
        let b = Flashcard::new("same", "y", day(2025, 1, 1), 5).unwrap();
        for field in [Field::Front, Field::ReviewDate, Field::ReviewInterval] {
            assert!(a.compare(&b, field, false), "{field}");
            assert!(!a.compare(&b, field, true), "{field}");
            assert!(!b.compare(&a, field, true), "{field}");
        }
    }

    #[test]
    fn display_shows_formatted_fields() {
        let card = Flashcard::new("Front", "Back", day(2024, 10, 4), 1).unwrap();
        assert_eq!(
            card.to_string(),
            r#"Flashcard(front: "Front", back: "Back", reviewDate: "October 4, 2024", reviewInterval: "1 day")"#
        );
        assert_eq!(Field::ReviewInterval.to_string(), "Review Interval");
    }
}
