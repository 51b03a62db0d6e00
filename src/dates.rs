//! Date parsing shared by the form endpoints.

use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::Error;

/// The `YYYY-MM-DD` format used in forms and in the database, chosen so that
/// string comparison on the stored column sorts chronologically.
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Parse an ISO `YYYY-MM-DD` date string.
pub(crate) fn parse_iso_date(raw: &str) -> Result<Date, Error> {
    Date::parse(raw.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(raw.to_owned()))
}

/// Today's date in UTC, used when a form omits the date.
pub(crate) fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

#[cfg(test)]
mod date_tests {
    use time::macros::date;

    use crate::Error;

    use super::parse_iso_date;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_iso_date("2025-01-05"), Ok(date!(2025 - 01 - 05)));
        assert_eq!(parse_iso_date(" 2025-01-05 "), Ok(date!(2025 - 01 - 05)));
    }

    #[test]
    fn rejects_other_formats() {
        assert_eq!(
            parse_iso_date("05/01/2025"),
            Err(Error::InvalidDate("05/01/2025".to_owned()))
        );
        assert_eq!(
            parse_iso_date(""),
            Err(Error::InvalidDate("".to_owned()))
        );
    }
}
