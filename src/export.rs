use crate::models::Flashcard;
use anyhow::Result;
use std::io::Write;
use struct_field_names_as_array::FieldNamesAsArray;

/// Writes `cards` as `|`-delimited CSV with a header row, quoting with `#`.
pub fn export<W: Write>(cards: &[Flashcard], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'|')
        .quote(b'#')
        .has_headers(false)
        .from_writer(out);
    writer.write_record(Flashcard::FIELD_NAMES_AS_ARRAY)?;
    for card in cards {
        writer.serialize(card)?;
    }
    writer.flush()?;
    Ok(())
}

#[test]
fn test_export_writes_header_and_rows() {
    use chrono::NaiveDate;

    let cards = vec![
        Flashcard::new("a", "b", NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(), 1).unwrap(),
        Flashcard::new("x|y", "#z", NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(), 38).unwrap(),
    ];
    let mut out = Vec::new();
    export(&cards, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "front|back|review_date|review_interval\n\
         a|b|2025-05-10|1\n\
         #x|y#|###z#|2024-02-29|38\n"
    );
}
