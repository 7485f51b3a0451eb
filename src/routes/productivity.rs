use std::collections::BTreeMap;

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::domain::productivity::Productivity;
use crate::domain::options::{SelectOption, ServiceType, Shift};
use crate::domain::types::RecordId;
use crate::dto::editor::EditorPageData;
use crate::dto::list::ListQuery;
use crate::forms::productivity::{NewProductivityForm, ProductivityEditorForm};
use crate::models::auth::CurrentUser;
use crate::repository::ApiRepository;
use crate::routes::{
    base_context, error_response, failed_form_context, field_errors, redirect, render_template,
    rerenders_form, run_blocking, today,
};
use crate::services::SAVE_FAILED_MESSAGE;
use crate::services::productivity::{
    self as productivity_service, PRODUCTIVITY_CREATED, PRODUCTIVITY_DELETED,
    PRODUCTIVITY_LOAD_FAILED, PRODUCTIVITY_UPDATED,
};

const LIST_PATH: &str = "/productivity";

fn insert_options(context: &mut Context) {
    context.insert("service_types", &ServiceType::options());
    context.insert("shifts", &Shift::options());
}

fn render_new_form(
    tera: &Tera,
    mut context: Context,
    form: &NewProductivityForm,
    graduations: &[SelectOption],
    field_errors: &BTreeMap<String, String>,
) -> HttpResponse {
    insert_options(&mut context);
    context.insert("form", form);
    context.insert("graduations", graduations);
    context.insert("field_errors", field_errors);
    render_template(tera, "productivity/new.html", &context)
}

fn render_editor(
    tera: &Tera,
    mut context: Context,
    data: &EditorPageData<Productivity, ProductivityEditorForm>,
    field_errors: &BTreeMap<String, String>,
) -> HttpResponse {
    insert_options(&mut context);
    context.insert("record", &data.record);
    context.insert("form", &data.form);
    context.insert("graduations", &data.graduations);
    context.insert("sections", &data.sections);
    context.insert("field_errors", field_errors);
    render_template(tera, "productivity/editor.html", &context)
}

#[get("/productivity")]
pub async fn list_productivity(
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    query: web::Query<ListQuery>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let session_user = user.user.clone();
    let query = query.into_inner();

    match run_blocking(move || productivity_service::load_productivity(&repo, &session_user, &query))
        .await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "/productivity");
            context.insert("records", &data.records);
            context.insert("pages", &data.records.pages);
            context.insert("page", &data.records.page);
            context.insert("paged", &data.paged);
            context.insert("search_query", &data.search_query);
            render_template(&tera, "productivity/index.html", &context)
        }
        Err(err) => error_response(err, PRODUCTIVITY_LOAD_FAILED, "/home"),
    }
}

#[get("/productivity/new")]
pub async fn new_productivity(
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let session_user = user.user.clone();

    match run_blocking(move || productivity_service::load_new_productivity(&repo, &session_user, today()))
        .await
    {
        Ok((form, graduations)) => {
            let context = base_context(&flash_messages, &user, "/productivity");
            render_new_form(&tera, context, &form, &graduations, &BTreeMap::new())
        }
        Err(err) => error_response(err, PRODUCTIVITY_LOAD_FAILED, LIST_PATH),
    }
}

#[post("/productivity/new")]
pub async fn create_productivity(
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<NewProductivityForm>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let session_user = user.user.clone();
    let submitted = form.clone();

    let (create_repo, create_user) = (repo.clone(), session_user.clone());
    let result = run_blocking(move || {
        productivity_service::create_productivity(&create_repo, &create_user, form, today())
    })
    .await;

    match result {
        Ok(Some(id)) => {
            FlashMessage::success(PRODUCTIVITY_CREATED).send();
            redirect(&format!("{LIST_PATH}/{id}/edit"))
        }
        Ok(None) => {
            FlashMessage::success(PRODUCTIVITY_CREATED).send();
            redirect(LIST_PATH)
        }
        Err(err) if rerenders_form(&err) => {
            let loaded = run_blocking(move || {
                productivity_service::load_new_productivity(&repo, &session_user, today())
            })
            .await;
            match loaded {
                Ok((_, graduations)) => {
                    let context = failed_form_context(
                        &flash_messages,
                        &user,
                        "/productivity",
                        err.notification(SAVE_FAILED_MESSAGE),
                    );
                    render_new_form(&tera, context, &submitted, &graduations, &field_errors(&err))
                }
                Err(err) => error_response(err, PRODUCTIVITY_LOAD_FAILED, LIST_PATH),
            }
        }
        Err(err) => error_response(err, SAVE_FAILED_MESSAGE, LIST_PATH),
    }
}

#[get("/productivity/{id}/edit")]
pub async fn edit_productivity(
    id: web::Path<String>,
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let session_user = user.user.clone();
    let id = id.into_inner();

    match run_blocking(move || {
        let id = RecordId::new(id)?;
        productivity_service::load_productivity_editor(&repo, &session_user, &id)
    })
    .await
    {
        Ok(data) => {
            let context = base_context(&flash_messages, &user, "/productivity");
            render_editor(&tera, context, &data, &BTreeMap::new())
        }
        Err(err) => error_response(err, PRODUCTIVITY_LOAD_FAILED, LIST_PATH),
    }
}

#[post("/productivity/{id}/edit")]
pub async fn save_productivity(
    id: web::Path<String>,
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ProductivityEditorForm>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let session_user = user.user.clone();
    let id = id.into_inner();
    let submitted = form.clone();

    let (save_repo, save_user, save_id) = (repo.clone(), session_user.clone(), id.clone());
    let result = run_blocking(move || {
        let id = RecordId::new(save_id)?;
        productivity_service::save_productivity_editor(&save_repo, &save_user, &id, &form)
    })
    .await;

    match result {
        Ok(()) => {
            FlashMessage::success(PRODUCTIVITY_UPDATED).send();
            redirect(LIST_PATH)
        }
        Err(err) if rerenders_form(&err) => {
            let loaded = run_blocking(move || {
                let id = RecordId::new(id)?;
                productivity_service::load_productivity_editor(&repo, &session_user, &id)
            })
            .await;
            match loaded {
                Ok(mut data) => {
                    data.form = submitted;
                    let context = failed_form_context(
                        &flash_messages,
                        &user,
                        "/productivity",
                        err.notification(SAVE_FAILED_MESSAGE),
                    );
                    render_editor(&tera, context, &data, &field_errors(&err))
                }
                Err(err) => error_response(err, PRODUCTIVITY_LOAD_FAILED, LIST_PATH),
            }
        }
        Err(err) => error_response(err, SAVE_FAILED_MESSAGE, LIST_PATH),
    }
}

#[post("/productivity/{id}/delete")]
pub async fn delete_productivity(
    id: web::Path<String>,
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let session_user = user.user.clone();
    let id = id.into_inner();

    match run_blocking(move || {
        let id = RecordId::new(id)?;
        productivity_service::delete_productivity(&repo, &session_user, &id)
    })
    .await
    {
        Ok(()) => {
            FlashMessage::success(PRODUCTIVITY_DELETED).send();
            redirect(LIST_PATH)
        }
        Err(err) => error_response(err, SAVE_FAILED_MESSAGE, LIST_PATH),
    }
}
