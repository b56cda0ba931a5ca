use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::io;
use std::io::{BufRead, Write};

/// Date layout used on disk and in edit forms, e.g. `October 4, 2024`.
pub const DATE_FORMAT: &str = "%B %-d, %Y";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a date in exactly the form [`format_date`] writes it. Impossible
/// calendar dates such as `February 30, 2023`, abbreviated or lowercase
/// months, padded days, extra spaces and short years are rejected.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let error = || Error::DateFormat {
        value: s.to_string(),
    };
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| error())?;
    // chrono is lenient about case, abbreviations and whitespace
    if format_date(date) != s {
        return Err(error());
    }
    Ok(date)
}

pub fn format_interval(days: i64) -> String {
    if days == 1 {
        String::from("1 day")
    } else {
        format!("{} days", days)
    }
}

/// Parses a positive number of days with an optional ` day`/` days` suffix.
pub fn parse_interval(s: &str) -> Result<i64> {
    let lowered = s.to_lowercase();
    let number = lowered
        .strip_suffix(" days")
        .or_else(|| lowered.strip_suffix(" day"))
        .unwrap_or(&lowered);
    let days: i64 = number.parse().map_err(|_| Error::IntervalFormat {
        value: s.to_string(),
        reason: String::from("not a whole number of days"),
    })?;
    if days <= 0 {
        return Err(Error::IntervalFormat {
            value: s.to_string(),
            reason: String::from("must be at least one day"),
        });
    }
    Ok(days)
}

pub fn clear<W: Write>(stdout: &mut W) -> io::Result<()> {
    write!(stdout, "{esc}[2J{esc}[1;1H", esc = 27 as char)
}

/// Reads one line without its line terminator. An exhausted input yields an
/// `UnexpectedEof` error so interactive loops cannot spin forever.
pub fn read_line<R: BufRead>(mut stdin: R) -> io::Result<String> {
    let mut line = String::new();
    if stdin.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed",
        ));
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

pub fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
