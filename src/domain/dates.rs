//! Date parsing and display helpers.
//!
//! The backend exchanges ISO-8601 strings; the dashboard shows them either as
//! `dd/mm/yyyy` or spelled out in Portuguese ("23 de outubro de 2025").

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use crate::domain::types::TypeConstraintError;

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Parses RFC 3339 timestamps, naive timestamps or plain `YYYY-MM-DD` dates.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, TypeConstraintError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|datetime| datetime.date())
        .map_err(|_| TypeConstraintError::InvalidDate(value.to_string()))
}

/// Formats a date as `dd/mm/yyyy`.
pub fn format_short(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Formats a date as "23 de outubro de 2025" with the first letter capitalized.
pub fn format_full(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    let text = format!("{:02} de {} de {}", date.day(), month, date.year());
    capitalize_first(&text)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Deserializes an optional backend date, treating blanks and garbage as absent.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| parse_iso_date(&value).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_backend_formats() {
        assert_eq!(parse_iso_date("2025-10-23").unwrap(), date(2025, 10, 23));
        assert_eq!(
            parse_iso_date("2025-10-23T03:00:00.000Z").unwrap(),
            date(2025, 10, 23)
        );
        assert_eq!(
            parse_iso_date("2025-10-23T10:15:00").unwrap(),
            date(2025, 10, 23)
        );
        assert!(parse_iso_date("23/10/2025").is_err());
    }

    #[test]
    fn formats_short_and_full() {
        assert_eq!(format_short(date(2025, 3, 7)), "07/03/2025");
        assert_eq!(format_full(date(2025, 10, 23)), "23 de outubro de 2025");
    }

    #[test]
    fn capitalizes_first_letter() {
        assert_eq!(capitalize_first("março"), "Março");
        assert_eq!(capitalize_first(""), "");
    }
}
