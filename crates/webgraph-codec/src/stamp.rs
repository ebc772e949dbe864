//! Creation and modification dates.
//!
//! Dates are written as decimal epoch milliseconds.

use chrono::{DateTime, TimeZone, Utc};

use crate::clock::Clock;
use crate::document::Document;
use crate::field::FieldName;

pub fn format_date(date: DateTime<Utc>) -> String {
    date.timestamp_millis().to_string()
}

/// Parse a date written by [`format_date`].
///
/// Malformed input and millisecond values outside chrono's range yield None.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let ms = raw.trim().parse::<i64>().ok()?;
    Utc.timestamp_millis_opt(ms).single()
}

/// Write `DATECREA` and `DATEMODIF`.
///
/// The creation date is the supplied one when present, otherwise now. The
/// modification date is always now, so every encode advances it.
pub fn set_document_dates(
    document: &mut Document,
    creation_date: Option<DateTime<Utc>>,
    clock: &dyn Clock,
) {
    let now = clock.now();
    let created = creation_date.unwrap_or(now);
    document.add(FieldName::DateCreated, format_date(created));
    document.add(FieldName::DateModified, format_date(now));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn instant(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_supplied_creation_date_is_kept() {
        let clock = ManualClock::new(instant(2_000));
        let mut doc = Document::new();
        set_document_dates(&mut doc, Some(instant(1_000)), &clock);

        assert_eq!(doc.get(FieldName::DateCreated), Some("1000"));
        assert_eq!(doc.get(FieldName::DateModified), Some("2000"));
    }

    #[test]
    fn test_missing_creation_date_defaults_to_now() {
        let clock = ManualClock::new(instant(5_000));
        let mut doc = Document::new();
        set_document_dates(&mut doc, None, &clock);

        assert_eq!(doc.get(FieldName::DateCreated), Some("5000"));
        assert_eq!(doc.get(FieldName::DateModified), Some("5000"));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("1706540400000"), Some(instant(1_706_540_400_000)));
        assert_eq!(parse_date(&format_date(instant(42))), Some(instant(42)));
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_out_of_range_date() {
        assert_eq!(parse_date(&i64::MAX.to_string()), None);
        assert_eq!(parse_date(&i64::MIN.to_string()), None);
    }
}
