//! DTOs shaped for the composite editors and their child sub-forms.

use serde::Serialize;

use crate::domain::entry::{ChildEntry, EntryKind, ParentKind};
use crate::domain::options::SelectOption;
use crate::domain::types::RecordId;
use crate::forms::entry::ChildEntryForm;

/// One expandable child collection of the editor.
#[derive(Debug, Serialize)]
pub struct EntrySection {
    pub slug: &'static str,
    pub title: &'static str,
    pub entries: Vec<ChildEntry>,
}

impl EntrySection {
    pub fn new(kind: EntryKind, entries: Vec<ChildEntry>) -> Self {
        Self {
            slug: kind.slug(),
            title: kind.title(),
            entries,
        }
    }
}

/// Aggregated data required to render a composite editor.
#[derive(Debug)]
pub struct EditorPageData<P, F> {
    /// Parent record as loaded from the backend.
    pub record: P,
    /// Editable scalar fields.
    pub form: F,
    /// Rank options for the graduation selectors.
    pub graduations: Vec<SelectOption>,
    /// Child collections in display order.
    pub sections: Vec<EntrySection>,
}

/// Data required to render a child sub-form.
#[derive(Debug)]
pub struct EntryFormData {
    pub kind: EntryKind,
    pub parent_id: RecordId,
    pub form: ChildEntryForm,
}

/// Outcome of a saved child entry: where the owning editor section lives.
#[derive(Debug, PartialEq, Eq)]
pub struct EntrySaved {
    pub created: bool,
    pub redirect_to: String,
}

impl EntrySaved {
    pub fn new(kind: EntryKind, parent_id: &RecordId, created: bool) -> Self {
        Self {
            created,
            redirect_to: editor_section_url(kind.parent(), parent_id, kind),
        }
    }
}

/// URL of one section of a parent's editor.
pub fn editor_section_url(parent: ParentKind, parent_id: &RecordId, kind: EntryKind) -> String {
    format!("{}/{parent_id}/edit#{}", parent.base_path(), kind.slug())
}
