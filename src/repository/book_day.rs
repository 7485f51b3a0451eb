use crate::domain::book_day::{BookDay, NewBookDay, UpdateBookDay};
use crate::domain::types::RecordId;
use crate::repository::api_client::Transport;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiRepository, BookDayReader, BookDayWriter, created_id};

const LIST_PATH: &str = "/api/bookDayall";
const ITEM_PATH: &str = "/api/bookDay";

impl<T: Transport> BookDayReader for ApiRepository<T> {
    fn list_book_days(&self) -> RepositoryResult<Vec<BookDay>> {
        self.fetch_list(LIST_PATH.to_string())
            .map(|(_, book_days)| book_days)
    }

    fn get_book_day(&self, id: &RecordId) -> RepositoryResult<Option<BookDay>> {
        self.fetch_optional(format!("{ITEM_PATH}/{id}"))
    }
}

impl<T: Transport> BookDayWriter for ApiRepository<T> {
    fn create_book_day(&self, new_book_day: &NewBookDay) -> RepositoryResult<Option<RecordId>> {
        let response = self.create(format!("{ITEM_PATH}/"), new_book_day)?;
        Ok(created_id(&response))
    }

    fn update_book_day(&self, id: &RecordId, updates: &UpdateBookDay) -> RepositoryResult<()> {
        self.update(format!("{ITEM_PATH}/{id}"), updates)
    }

    fn delete_book_day(&self, id: &RecordId) -> RepositoryResult<()> {
        self.remove(format!("{ITEM_PATH}/{id}"))
    }
}
