//! Date helpers.
//!
//! Training dates are persisted in the canonical textual form `DD.MM.YYYY`.
//! Any ordering or range comparison must go through [`parse_datum`] first:
//! comparing the stored strings lexically puts "05.01.2024" before
//! "01.12.2023".

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// Canonical persisted form of a training date.
pub const DATUM_FORMAT: &str = "%d.%m.%Y";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a date in the canonical stored form (`DD.MM.YYYY`).
pub fn parse_datum(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATUM_FORMAT).map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Render a date in the canonical stored form.
pub fn format_datum(d: &NaiveDate) -> String {
    d.format(DATUM_FORMAT).to_string()
}

/// Parse a user-supplied date, accepting ISO (`YYYY-MM-DD`) as well as the
/// canonical `DD.MM.YYYY` form.
pub fn parse_input_date(s: &str) -> AppResult<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    parse_datum(s)
}

/// Default statistics range: January 1 through December 31 of the current year.
pub fn current_year_bounds() -> (NaiveDate, NaiveDate) {
    let year = today().year();
    (
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(year, 12, 31).unwrap(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_round_trips() {
        let d = parse_datum("05.01.2024").unwrap();
        assert_eq!(format_datum(&d), "05.01.2024");
    }

    #[test]
    fn input_accepts_iso_and_canonical() {
        assert_eq!(
            parse_input_date("2024-01-05").unwrap(),
            parse_input_date("05.01.2024").unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_datum("2024-01-05").is_err());
        assert!(parse_input_date("yesterday").is_err());
    }

    #[test]
    fn calendar_order_differs_from_lexical_order() {
        let a = parse_datum("01.12.2023").unwrap();
        let b = parse_datum("05.01.2024").unwrap();
        assert!(a < b);
        assert!("01.12.2023" < "05.01.2024"); // lexical order happens to agree here
        let c = parse_datum("31.01.2024").unwrap();
        let d = parse_datum("01.02.2024").unwrap();
        assert!(c < d);
        assert!("31.01.2024" > "01.02.2024"); // ...but not here
    }
}
