//! The permissive numeric coercion shared by the expense form endpoints.

use crate::Error;

/// Coerce a form field to a number, falling back to `default` when the field
/// is missing, blank, or unparseable. Values are never rejected on this path,
/// only defaulted.
pub(crate) fn parse_or_default(raw: Option<&str>, default: f64) -> f64 {
    raw.map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

/// Parse an optional form field that, when supplied, must be numeric.
///
/// Missing or blank fields become `None`; anything else must parse or the
/// caller gets [Error::InvalidNumber] carrying the field name.
pub(crate) fn parse_validated(
    raw: Option<&str>,
    field: &'static str,
) -> Result<Option<f64>, Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| Error::InvalidNumber(field)),
    }
}

/// Normalize the quantity unit tag, defaulting to "buc".
pub(crate) fn normalize_quantity_type(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|raw| !raw.is_empty())
        .unwrap_or("buc")
        .to_owned()
}
