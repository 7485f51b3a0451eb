use crate::domain::productivity::{NewProductivity, Productivity, UpdateProductivity};
use crate::domain::types::RecordId;
use crate::repository::api_client::Transport;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ApiRepository, Pagination, ProductivityReader, ProductivityWriter, created_id,
};

const LIST_PATH: &str = "/api/productivityallbyid";
const ITEM_PATH: &str = "/api/productivity";

impl<T: Transport> ProductivityReader for ApiRepository<T> {
    fn list_productivity(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<(usize, Vec<Productivity>)> {
        self.fetch_list(format!(
            "{LIST_PATH}/{}/{}",
            pagination.page, pagination.per_page
        ))
    }

    fn get_productivity(&self, id: &RecordId) -> RepositoryResult<Option<Productivity>> {
        self.fetch_optional(format!("{ITEM_PATH}/{id}"))
    }
}

impl<T: Transport> ProductivityWriter for ApiRepository<T> {
    fn create_productivity(
        &self,
        new_report: &NewProductivity,
    ) -> RepositoryResult<Option<RecordId>> {
        let response = self.create(format!("{ITEM_PATH}/"), new_report)?;
        Ok(created_id(&response))
    }

    fn update_productivity(
        &self,
        id: &RecordId,
        updates: &UpdateProductivity,
    ) -> RepositoryResult<()> {
        self.update(format!("{ITEM_PATH}/{id}"), updates)
    }

    fn delete_productivity(&self, id: &RecordId) -> RepositoryResult<()> {
        self.remove(format!("{ITEM_PATH}/{id}"))
    }
}
