use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::auth::SignInForm;
use crate::models::auth::CurrentUser;
use crate::repository::ApiRepository;
use crate::routes::{alerts_context, redirect, render_template, run_blocking};
use crate::services::ServiceError;
use crate::services::auth::{self as auth_service, SIGN_IN_FAILED, SIGN_IN_SUCCESS, SIGN_OUT_SUCCESS};

#[get("/")]
pub async fn show_sign_in(
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if CurrentUser::load(&session).is_some() {
        return redirect("/home");
    }

    let context = alerts_context(&flash_messages);
    render_template(&tera, "auth/sign_in.html", &context)
}

#[post("/signin")]
pub async fn sign_in(
    request: HttpRequest,
    session: Session,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<SignInForm>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    match run_blocking(move || auth_service::sign_in(&repo, form)).await {
        Ok(signed_in) => {
            if let Err(err) = CurrentUser::store(&signed_in, &session) {
                log::error!("Failed to store the session: {err}");
                FlashMessage::error(SIGN_IN_FAILED).send();
                return redirect("/");
            }
            if let Err(err) = Identity::login(&request.extensions(), signed_in.user.id.clone()) {
                log::error!("Failed to mark the identity: {err}");
                session.purge();
                FlashMessage::error(SIGN_IN_FAILED).send();
                return redirect("/");
            }
            log::info!("Officer {} signed in", signed_in.user.id);
            FlashMessage::success(SIGN_IN_SUCCESS).send();
            redirect("/home")
        }
        Err(err @ (ServiceError::Invalid(_) | ServiceError::Backend(_))) => {
            FlashMessage::error(err.notification(SIGN_IN_FAILED)).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            FlashMessage::error(SIGN_IN_FAILED).send();
            redirect("/")
        }
    }
}

#[post("/signout")]
pub async fn sign_out(identity: Identity, session: Session) -> HttpResponse {
    identity.logout();
    session.purge();
    FlashMessage::info(SIGN_OUT_SUCCESS).send();
    redirect("/")
}
