use serde_json::Value;

use crate::domain::auth::{Credentials, SignedIn};
use crate::repository::api_client::{ApiRequest, Transport};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiRepository, AuthGateway};

const LOGIN_PATH: &str = "/api/login";

impl<T: Transport> AuthGateway for ApiRepository<T> {
    fn sign_in(&self, credentials: &Credentials) -> RepositoryResult<SignedIn> {
        let body: Value = serde_json::to_value(credentials)?;
        let response = self.call(ApiRequest::post(LOGIN_PATH, body))?;
        Ok(serde_json::from_value(response)?)
    }
}
