//! Child entries attached to a duty log or a productivity report.
//!
//! Every kind shares the same shape; they only differ in the backend
//! collection they are stored under.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryPrefix, FreeText, RecordId, TypeConstraintError};

/// Record type owning child entries.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ParentKind {
    BookDay,
    Productivity,
}

impl ParentKind {
    /// Entry collections shown by the composite editor, in display order.
    pub fn entry_kinds(self) -> &'static [EntryKind] {
        match self {
            ParentKind::BookDay => &[
                EntryKind::BarracksCharge,
                EntryKind::AdministrativeOccurrence,
                EntryKind::OperationalOccurrence,
                EntryKind::Gather,
            ],
            ParentKind::Productivity => &[EntryKind::ProductivityOccurrence],
        }
    }

    /// Dashboard path prefix of the parent screens.
    pub const fn base_path(self) -> &'static str {
        match self {
            ParentKind::BookDay => "/bookday",
            ParentKind::Productivity => "/productivity",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub enum EntryKind {
    BarracksCharge,
    AdministrativeOccurrence,
    OperationalOccurrence,
    Gather,
    ProductivityOccurrence,
}

impl EntryKind {
    pub const ALL: [EntryKind; 5] = [
        EntryKind::BarracksCharge,
        EntryKind::AdministrativeOccurrence,
        EntryKind::OperationalOccurrence,
        EntryKind::Gather,
        EntryKind::ProductivityOccurrence,
    ];

    /// Path segment identifying the kind in dashboard URLs.
    pub const fn slug(self) -> &'static str {
        match self {
            EntryKind::BarracksCharge => "barracks-charge",
            EntryKind::AdministrativeOccurrence => "administrative",
            EntryKind::OperationalOccurrence => "operational",
            EntryKind::Gather => "gather",
            EntryKind::ProductivityOccurrence => "occurrences",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            EntryKind::BarracksCharge => "Carga do quartel",
            EntryKind::AdministrativeOccurrence => "Ocorrências administrativas",
            EntryKind::OperationalOccurrence => "Ocorrências operacionais",
            EntryKind::Gather => "Juntadas",
            EntryKind::ProductivityOccurrence => "Ocorrências",
        }
    }

    pub const fn parent(self) -> ParentKind {
        match self {
            EntryKind::ProductivityOccurrence => ParentKind::Productivity,
            _ => ParentKind::BookDay,
        }
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for EntryKind {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.slug() == value)
            .ok_or_else(|| TypeConstraintError::UnknownOption(value.to_string()))
    }
}

/// One persisted child entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChildEntry {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(rename = "id_livro", default)]
    pub parent_id: String,
    #[serde(default)]
    pub prefixo: String,
    #[serde(default)]
    pub informacao: String,
}

/// Payload written when creating or updating a child entry.
///
/// The parent identifier is mandatory; an entry cannot exist before its
/// parent was persisted.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NewEntry {
    pub prefixo: CategoryPrefix,
    pub informacao: FreeText,
    #[serde(rename = "id_livro")]
    pub parent_id: RecordId,
}

impl NewEntry {
    #[must_use]
    pub fn new(prefixo: CategoryPrefix, informacao: FreeText, parent_id: RecordId) -> Self {
        Self {
            prefixo,
            informacao,
            parent_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn slugs_round_trip() {
        for kind in EntryKind::ALL {
            assert_eq!(kind.slug().parse::<EntryKind>(), Ok(kind));
        }
        assert!("unknown".parse::<EntryKind>().is_err());
    }

    #[test]
    fn book_day_owns_four_collections() {
        let kinds = ParentKind::BookDay.entry_kinds();
        assert_eq!(kinds.len(), 4);
        assert!(kinds.iter().all(|kind| kind.parent() == ParentKind::BookDay));
        assert_eq!(
            ParentKind::Productivity.entry_kinds(),
            &[EntryKind::ProductivityOccurrence]
        );
    }

    #[test]
    fn new_entry_payload_carries_parent_identifier() {
        let entry = NewEntry::new(
            CategoryPrefix::new("A").unwrap(),
            FreeText::new("Generator inspected").unwrap(),
            RecordId::new("P1").unwrap(),
        );
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({ "prefixo": "A", "informacao": "Generator inspected", "id_livro": "P1" })
        );
    }
}
