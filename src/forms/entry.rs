use serde::{Deserialize, Serialize};

use crate::domain::entry::{ChildEntry, NewEntry};
use crate::domain::types::{CategoryPrefix, FREE_TEXT_MIN_LEN, FreeText, RecordId, TypeConstraintError};
use crate::forms::FormError;

pub const PREFIX_REQUIRED: &str = "prefixo é obrigatório";
pub const INFORMATION_REQUIRED: &str = "informação é obrigatório";

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
/// One child entry as typed in the composite editor.
///
/// A blank `id` means the entry was never persisted.
pub struct ChildEntryForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub prefixo: String,
    #[serde(default)]
    pub informacao: String,
}

impl From<&ChildEntry> for ChildEntryForm {
    fn from(entry: &ChildEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            prefixo: entry.prefixo.clone(),
            informacao: entry.informacao.clone(),
        }
    }
}

impl ChildEntryForm {
    /// Existing identifier, if the entry was already persisted.
    pub fn existing_id(&self) -> Option<RecordId> {
        RecordId::new(self.id.as_str()).ok()
    }

    /// Validates the entry and attaches it to `parent_id`.
    pub fn into_payload(self, parent_id: RecordId) -> Result<(Option<RecordId>, NewEntry), FormError> {
        let existing = self.existing_id();

        let prefixo = CategoryPrefix::new(&self.prefixo).map_err(|err| match err {
            TypeConstraintError::EmptyString => FormError::invalid("prefixo", PREFIX_REQUIRED),
            _ => FormError::invalid("prefixo", "prefixo deve ser uma letra de A a Z"),
        })?;
        let informacao = FreeText::new(self.informacao).map_err(|err| match err {
            TypeConstraintError::TooShort(_) => FormError::invalid(
                "informacao",
                format!("informação deve ter ao menos {FREE_TEXT_MIN_LEN} caracteres"),
            ),
            _ => FormError::invalid("informacao", INFORMATION_REQUIRED),
        })?;

        Ok((existing, NewEntry::new(prefixo, informacao, parent_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent() -> RecordId {
        RecordId::new("P1").unwrap()
    }

    #[test]
    fn new_entry_has_no_identifier() {
        let form = ChildEntryForm {
            id: String::new(),
            prefixo: "a".into(),
            informacao: "Generator inspected".into(),
        };
        let (existing, payload) = form.into_payload(parent()).unwrap();
        assert!(existing.is_none());
        assert_eq!(payload.prefixo.letter(), 'A');
        assert_eq!(payload.parent_id.as_str(), "P1");
    }

    #[test]
    fn persisted_entry_keeps_identifier() {
        let form = ChildEntryForm {
            id: "E9".into(),
            prefixo: "B".into(),
            informacao: "Radio returned".into(),
        };
        let (existing, _) = form.into_payload(parent()).unwrap();
        assert_eq!(existing.unwrap().as_str(), "E9");
    }

    #[test]
    fn missing_prefix_is_reported() {
        let form = ChildEntryForm {
            informacao: "Radio returned".into(),
            ..ChildEntryForm::default()
        };
        assert_eq!(form.into_payload(parent()).unwrap_err().message(), PREFIX_REQUIRED);
    }

    #[test]
    fn short_information_is_reported() {
        let form = ChildEntryForm {
            prefixo: "C".into(),
            informacao: "ok".into(),
            ..ChildEntryForm::default()
        };
        let err = form.into_payload(parent()).unwrap_err();
        assert!(err.field_errors().contains_key("informacao"));
    }

    #[test]
    fn blank_information_is_required() {
        let form = ChildEntryForm {
            prefixo: "C".into(),
            informacao: "   ".into(),
            ..ChildEntryForm::default()
        };
        assert_eq!(
            form.into_payload(parent()).unwrap_err().message(),
            INFORMATION_REQUIRED
        );
    }
}
