//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (non-empty backend identifiers,
//! sanitized free text, category prefixes) so that once a value reaches the
//! domain layer it can be treated as trusted.
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided text is shorter than the allowed minimum.
    #[error("value must have at least {0} characters")]
    TooShort(usize),
    /// Category prefix is not a single letter between A and Z.
    #[error("invalid category prefix")]
    InvalidPrefix,
    /// Provided value is not one of the known options.
    #[error("unknown option: {0}")]
    UnknownOption(String),
    /// Provided date could not be parsed.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(
    RecordId,
    "Opaque identifier assigned by the backend when a record is persisted."
);

/// Minimum number of characters accepted for free-text fields.
pub const FREE_TEXT_MIN_LEN: usize = 3;

/// Removes HTML markup, keeping the plain text as typed.
pub fn strip_markup(text: &str) -> String {
    let cleaned = ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(text)
        .to_string();
    cleaned
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

/// Sanitized free text with a minimum length.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct FreeText(String);

impl FreeText {
    /// Constructs a sanitized, trimmed value of at least three characters.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = strip_markup(&value.into());
        let inner = NonEmptyString::new(sanitized)?;
        if inner.as_str().chars().count() < FREE_TEXT_MIN_LEN {
            return Err(TypeConstraintError::TooShort(FREE_TEXT_MIN_LEN));
        }
        Ok(Self(inner.into_inner()))
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FreeText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for FreeText {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FreeText> for String {
    fn from(value: FreeText) -> Self {
        value.0
    }
}

/// Single upper-case letter classifying a child entry.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryPrefix(char);

impl CategoryPrefix {
    /// Accepts one letter between `A` and `Z`, ignoring surrounding spaces and case.
    pub fn new(value: &str) -> Result<Self, TypeConstraintError> {
        let mut chars = value.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_alphabetic() => {
                Ok(Self(letter.to_ascii_uppercase()))
            }
            (None, _) => Err(TypeConstraintError::EmptyString),
            _ => Err(TypeConstraintError::InvalidPrefix),
        }
    }

    /// All selectable prefixes in alphabetical order.
    pub fn all() -> impl Iterator<Item = CategoryPrefix> {
        ('A'..='Z').map(CategoryPrefix)
    }

    pub const fn letter(self) -> char {
        self.0
    }
}

impl Display for CategoryPrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CategoryPrefix {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CategoryPrefix> for String {
    fn from(value: CategoryPrefix) -> Self {
        value.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_rejects_blank_values() {
        assert_eq!(RecordId::new("  "), Err(TypeConstraintError::EmptyString));
        assert_eq!(RecordId::new(" P1 ").unwrap().as_str(), "P1");
    }

    #[test]
    fn free_text_requires_three_characters() {
        assert_eq!(FreeText::new("ab"), Err(TypeConstraintError::TooShort(3)));
        assert_eq!(FreeText::new("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn free_text_strips_markup() {
        let text = FreeText::new("<script>x</script>Generator inspected").unwrap();
        assert_eq!(text.as_str(), "Generator inspected");
    }

    #[test]
    fn free_text_keeps_plain_punctuation() {
        let text = FreeText::new("Gerador & radio < 50%").unwrap();
        assert_eq!(text.as_str(), "Gerador & radio < 50%");

        let tagged = FreeText::new("<b>Fiat</b> \"Uno\" d'água").unwrap();
        assert_eq!(tagged.as_str(), "Fiat \"Uno\" d'água");
    }

    #[test]
    fn category_prefix_accepts_single_letters() {
        assert_eq!(CategoryPrefix::new("a").unwrap().letter(), 'A');
        assert_eq!(CategoryPrefix::new("Z").unwrap().to_string(), "Z");
        assert_eq!(CategoryPrefix::new(""), Err(TypeConstraintError::EmptyString));
        assert_eq!(CategoryPrefix::new("AB"), Err(TypeConstraintError::InvalidPrefix));
        assert_eq!(CategoryPrefix::new("1"), Err(TypeConstraintError::InvalidPrefix));
        assert_eq!(CategoryPrefix::all().count(), 26);
    }
}
