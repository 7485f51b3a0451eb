//! Uniform CRUD over the single-entity collections.

use crate::domain::access_control::{AccessControl, NewAccessControl};
use crate::domain::assessment::{Assessment, NewAssessment};
use crate::domain::people::{NewPerson, Person};
use crate::domain::reference::{
    Graduation, NewGraduation, NewPermission, NewProfile, NewSituation, NewUnit, Permission,
    Profile, Situation, Unit,
};
use crate::domain::types::RecordId;
use crate::repository::api_client::Transport;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiRepository, Pagination, RecordReader, RecordWriter, RestResource};

macro_rules! rest_resource {
    ($record:ty, $payload:ty, $list:expr, $item:expr) => {
        impl RestResource for $record {
            type Payload = $payload;

            const LIST_PATH: &'static str = $list;
            const ITEM_PATH: &'static str = $item;
        }
    };
}

rest_resource!(Graduation, NewGraduation, "/api/graduation", "/api/graduation");
rest_resource!(Unit, NewUnit, "/api/unityall", "/api/unity");
rest_resource!(Situation, NewSituation, "/api/situation", "/api/situation");
rest_resource!(Profile, NewProfile, "/api/profile", "/api/profile");
rest_resource!(Permission, NewPermission, "/api/permissionsall", "/api/permissions");
rest_resource!(Assessment, NewAssessment, "/api/assessmentall", "/api/assessment");
rest_resource!(Person, NewPerson, "/api/users", "/api/users");
rest_resource!(
    AccessControl,
    NewAccessControl,
    "/api/accesscontrol",
    "/api/accesscontrol"
);

impl<T: Transport> RecordReader for ApiRepository<T> {
    fn list_records<R: RestResource>(&self) -> RepositoryResult<Vec<R>> {
        self.fetch_list(R::LIST_PATH.to_string())
            .map(|(_, records)| records)
    }

    fn list_records_page<R: RestResource>(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<(usize, Vec<R>)> {
        self.fetch_list(format!(
            "{}/{}/{}",
            R::LIST_PATH,
            pagination.page,
            pagination.per_page
        ))
    }

    fn get_record<R: RestResource>(&self, id: &RecordId) -> RepositoryResult<Option<R>> {
        self.fetch_optional(format!("{}/{id}", R::ITEM_PATH))
    }
}

impl<T: Transport> RecordWriter for ApiRepository<T> {
    fn create_record<R: RestResource>(&self, payload: &R::Payload) -> RepositoryResult<()> {
        self.create(format!("{}/", R::ITEM_PATH), payload)
            .map(|_| ())
    }

    fn update_record<R: RestResource>(
        &self,
        id: &RecordId,
        payload: &R::Payload,
    ) -> RepositoryResult<()> {
        self.update(format!("{}/{id}", R::ITEM_PATH), payload)
    }

    fn delete_record<R: RestResource>(&self, id: &RecordId) -> RepositoryResult<()> {
        self.remove(format!("{}/{id}", R::ITEM_PATH))
    }
}
