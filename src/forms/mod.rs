//! Form definitions backing the dashboard routes.
//!
//! Every form is checked here before any backend call is made.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::dates::parse_iso_date;

pub mod auth;
pub mod book_day;
pub mod entry;
pub mod productivity;
pub mod records;

/// Notification shown when no specific message applies.
pub const MISSING_FIELDS_MESSAGE: &str = "Campos obrigatórios não preenchidos.";

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    /// `validator` failures; `order` lists the validated fields as the form shows them.
    #[error("validation errors: {errors}")]
    Validation {
        errors: ValidationErrors,
        order: &'static [&'static str],
    },

    /// Required fields left blank. `message` belongs to the first one in check order.
    #[error("{message}")]
    MissingFields {
        message: String,
        fields: Vec<&'static str>,
    },

    /// A single field holds an unacceptable value.
    #[error("{message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    #[error("malformed form payload: {0}")]
    Payload(String),
}

impl FormError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        FormError::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// The single notification surfaced to the user.
    pub fn message(&self) -> String {
        match self {
            FormError::Validation { errors, order } => {
                let mut messages = field_messages(errors);
                order
                    .iter()
                    .find_map(|field| messages.remove(*field))
                    .or_else(|| messages.into_values().next())
                    .unwrap_or_else(|| MISSING_FIELDS_MESSAGE.to_string())
            }
            FormError::MissingFields { message, .. } | FormError::InvalidField { message, .. } => {
                message.clone()
            }
            FormError::Payload(_) => MISSING_FIELDS_MESSAGE.to_string(),
        }
    }

    /// Messages keyed by offending field, for highlighting in templates.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        match self {
            FormError::Validation { errors, .. } => field_messages(errors),
            FormError::MissingFields { message, fields } => fields
                .iter()
                .enumerate()
                .map(|(position, field)| {
                    let text = if position == 0 {
                        message.clone()
                    } else {
                        "Campo obrigatório.".to_string()
                    };
                    (field.to_string(), text)
                })
                .collect(),
            FormError::InvalidField { field, message } => {
                BTreeMap::from([(field.to_string(), message.clone())])
            }
            FormError::Payload(_) => BTreeMap::new(),
        }
    }
}

/// Form checked with `validator` whose fields have a display order.
pub(crate) trait OrderedFields: Validate {
    /// Validated fields, top to bottom.
    const FIELD_ORDER: &'static [&'static str];

    /// Runs the `validator` rules; the first failing field in display order
    /// provides the notification.
    fn validate_in_order(&self) -> Result<(), FormError> {
        self.validate().map_err(|errors| FormError::Validation {
            errors,
            order: Self::FIELD_ORDER,
        })
    }
}

/// First message of every invalid field, ordered by field name.
fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errors)| {
            errors.first().map(|error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| "Valor inválido.".to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

/// Parses an urlencoded body, accepting repeated keys for list fields.
pub fn parse_form<F: DeserializeOwned>(body: &[u8]) -> Result<F, FormError> {
    serde_html_form::from_bytes(body).map_err(|err| FormError::Payload(err.to_string()))
}

/// Checks `(field, value, message)` triples in order.
///
/// Every blank field is reported; the message of the first one becomes the
/// notification.
pub(crate) fn check_required(checks: &[(&'static str, &str, &'static str)]) -> Result<(), FormError> {
    let missing: Vec<(&'static str, &'static str)> = checks
        .iter()
        .filter(|(_, value, _)| value.trim().is_empty())
        .map(|(field, _, message)| (*field, *message))
        .collect();

    match missing.first() {
        None => Ok(()),
        Some((_, message)) => Err(FormError::MissingFields {
            message: message.to_string(),
            fields: missing.iter().map(|(field, _)| *field).collect(),
        }),
    }
}

/// Parses a select value into one of the closed option enums.
pub(crate) fn parse_choice<T: FromStr>(
    field: &'static str,
    value: &str,
    message: &str,
) -> Result<T, FormError> {
    value
        .trim()
        .parse()
        .map_err(|_| FormError::invalid(field, message))
}

/// Parses an optional select value; blank means not chosen.
pub(crate) fn parse_optional_choice<T: FromStr>(
    field: &'static str,
    value: &str,
    message: &str,
) -> Result<Option<T>, FormError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_choice(field, value, message).map(Some)
}

/// Parses a date input value.
pub(crate) fn parse_date(
    field: &'static str,
    value: &str,
    message: &str,
) -> Result<NaiveDate, FormError> {
    parse_iso_date(value).map_err(|_| FormError::invalid(field, message))
}

/// Renders an optional date back into a date input value.
pub(crate) fn date_input(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_missing_field_wins() {
        let err = check_required(&[
            ("a", "filled", "A is required"),
            ("b", " ", "B is required"),
            ("c", "", "C is required"),
        ])
        .unwrap_err();

        assert_eq!(err.message(), "B is required");
        let fields = err.field_errors();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["b"], "B is required");
        assert!(fields.contains_key("c"));
    }

    #[derive(Validate)]
    struct Ordered {
        #[validate(length(min = 1, message = "Z first"))]
        zeta: String,
        #[validate(length(min = 1, message = "A second"))]
        alpha: String,
    }

    impl OrderedFields for Ordered {
        const FIELD_ORDER: &'static [&'static str] = &["zeta", "alpha"];
    }

    #[test]
    fn validation_message_follows_display_order() {
        let form = Ordered {
            zeta: String::new(),
            alpha: String::new(),
        };
        let err = form.validate_in_order().unwrap_err();

        assert_eq!(err.message(), "Z first");
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn complete_forms_pass() {
        assert!(check_required(&[("a", "x", "A is required")]).is_ok());
    }

    #[test]
    fn blank_optional_choice_is_none() {
        let parsed: Option<crate::domain::options::Shift> =
            parse_optional_choice("turno", "", "bad").unwrap();
        assert_eq!(parsed, None);
        let err = parse_optional_choice::<crate::domain::options::Shift>("turno", "3º", "bad")
            .unwrap_err();
        assert_eq!(err.field_errors()["turno"], "bad");
    }
}
