//! Signed-in user extracted from the cookie session.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_session::{Session, SessionExt, SessionInsertError};
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::auth::{SessionUser, SignedIn};

/// Session key holding the backend bearer token.
pub const TOKEN_KEY: &str = "token";
/// Session key holding the serialized [`SessionUser`].
pub const USER_KEY: &str = "user";

/// Token and user of the signed-in officer.
///
/// Extraction fails with 401 when there is no identity or the session lost
/// either value.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub token: String,
    pub user: SessionUser,
}

impl CurrentUser {
    /// Persists the login response into the session.
    pub fn store(signed_in: &SignedIn, session: &Session) -> Result<(), SessionInsertError> {
        session.insert(TOKEN_KEY, &signed_in.token)?;
        session.insert(USER_KEY, &signed_in.user)
    }

    pub fn load(session: &Session) -> Option<Self> {
        let token = session.get::<String>(TOKEN_KEY).ok().flatten()?;
        let user = session.get::<SessionUser>(USER_KEY).ok().flatten()?;
        Some(Self { token, user })
    }

    fn from_http_request(req: &HttpRequest) -> Result<Self, actix_web::Error> {
        if req.get_identity().is_err() {
            return Err(ErrorUnauthorized("not signed in"));
        }
        Self::load(&req.get_session()).ok_or_else(|| ErrorUnauthorized("session is incomplete"))
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::from_http_request(req))
    }
}
