//! Forced sign-out on unauthorized responses.

use actix_session::SessionExt;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::middleware::Next;
use actix_web::{Error, HttpResponse};
use actix_web_flash_messages::FlashMessage;

use crate::models::auth::TOKEN_KEY;

pub const SESSION_EXPIRED_MESSAGE: &str = "ATENÇÃO: Sua sessão expirou";
pub const SIGN_IN_PATH: &str = "/";

/// Turns every 401 of the wrapped routes into a redirect to the sign-in
/// screen.
///
/// The session is purged first; when it still held a token the backend
/// rejected it, so the user is told the session expired.
pub async fn redirect_unauthorized(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();
    let res = next.call(req).await?;

    if res.status() != StatusCode::UNAUTHORIZED {
        return Ok(res.map_into_left_body());
    }

    let had_token = session.get::<String>(TOKEN_KEY).ok().flatten().is_some();
    session.purge();
    if had_token {
        log::warn!("Session token rejected, signing out");
        FlashMessage::warning(SESSION_EXPIRED_MESSAGE).send();
    }

    let (request, _) = res.into_parts();
    let response = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, SIGN_IN_PATH))
        .finish();
    Ok(ServiceResponse::new(request, response).map_into_right_body())
}
