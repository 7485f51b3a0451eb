use crate::domain::entry::{ChildEntry, EntryKind, NewEntry};
use crate::domain::types::RecordId;
use crate::repository::api_client::Transport;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiRepository, EntryReader, EntryWriter};

/// Endpoint listing the entries of one parent.
pub(crate) const fn list_path(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::BarracksCharge => "/api/barrackschargeallbyid",
        EntryKind::AdministrativeOccurrence => "/api/administrativeOccurrencesallbyid",
        EntryKind::OperationalOccurrence => "/api/operationalOccurencesallid",
        EntryKind::Gather => "/api/gatherallbyid",
        EntryKind::ProductivityOccurrence => "/api/productivityoccurrencesallbyid",
    }
}

/// Endpoint prefix addressing single entries.
pub(crate) const fn item_path(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::BarracksCharge => "/api/barrackscharge",
        EntryKind::AdministrativeOccurrence => "/api/administrativeOccurrences",
        EntryKind::OperationalOccurrence => "/api/operationalOccurences",
        EntryKind::Gather => "/api/gather",
        EntryKind::ProductivityOccurrence => "/api/productivityoccurrences",
    }
}

impl<T: Transport> EntryReader for ApiRepository<T> {
    fn list_entries(
        &self,
        kind: EntryKind,
        parent_id: &RecordId,
    ) -> RepositoryResult<Vec<ChildEntry>> {
        self.fetch_list(format!("{}/{parent_id}", list_path(kind)))
            .map(|(_, entries)| entries)
    }
}

impl<T: Transport> EntryWriter for ApiRepository<T> {
    fn create_entry(&self, kind: EntryKind, entry: &NewEntry) -> RepositoryResult<()> {
        self.create(format!("{}/", item_path(kind)), entry)
            .map(|_| ())
    }

    fn update_entry(
        &self,
        kind: EntryKind,
        id: &RecordId,
        entry: &NewEntry,
    ) -> RepositoryResult<()> {
        self.update(format!("{}/{id}", item_path(kind)), entry)
    }
}
