//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::auth::{Credentials, SignedIn};
use crate::domain::book_day::{BookDay, NewBookDay, UpdateBookDay};
use crate::domain::entry::{ChildEntry, EntryKind, NewEntry};
use crate::domain::productivity::{NewProductivity, Productivity, UpdateProductivity};
use crate::domain::types::RecordId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AuthGateway, BookDayReader, BookDayWriter, EntryReader, EntryWriter, Pagination,
    ProductivityReader, ProductivityWriter,
};

mock! {
    pub Repository {}

    impl AuthGateway for Repository {
        fn sign_in(&self, credentials: &Credentials) -> RepositoryResult<SignedIn>;
    }

    impl BookDayReader for Repository {
        fn list_book_days(&self) -> RepositoryResult<Vec<BookDay>>;
        fn get_book_day(&self, id: &RecordId) -> RepositoryResult<Option<BookDay>>;
    }

    impl BookDayWriter for Repository {
        fn create_book_day(&self, new_book_day: &NewBookDay) -> RepositoryResult<Option<RecordId>>;
        fn update_book_day(&self, id: &RecordId, updates: &UpdateBookDay) -> RepositoryResult<()>;
        fn delete_book_day(&self, id: &RecordId) -> RepositoryResult<()>;
    }

    impl ProductivityReader for Repository {
        fn list_productivity(
            &self,
            pagination: Pagination,
        ) -> RepositoryResult<(usize, Vec<Productivity>)>;
        fn get_productivity(&self, id: &RecordId) -> RepositoryResult<Option<Productivity>>;
    }

    impl ProductivityWriter for Repository {
        fn create_productivity(
            &self,
            new_report: &NewProductivity,
        ) -> RepositoryResult<Option<RecordId>>;
        fn update_productivity(
            &self,
            id: &RecordId,
            updates: &UpdateProductivity,
        ) -> RepositoryResult<()>;
        fn delete_productivity(&self, id: &RecordId) -> RepositoryResult<()>;
    }

    impl EntryReader for Repository {
        fn list_entries(
            &self,
            kind: EntryKind,
            parent_id: &RecordId,
        ) -> RepositoryResult<Vec<ChildEntry>>;
    }

    impl EntryWriter for Repository {
        fn create_entry(&self, kind: EntryKind, entry: &NewEntry) -> RepositoryResult<()>;
        fn update_entry(
            &self,
            kind: EntryKind,
            id: &RecordId,
            entry: &NewEntry,
        ) -> RepositoryResult<()>;
    }
}
