use std::collections::BTreeMap;

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::domain::book_day::BookDay;
use crate::domain::options::{BookDayStatus, SelectOption, ServiceType, Shift};
use crate::domain::types::RecordId;
use crate::dto::editor::EditorPageData;
use crate::dto::list::ListQuery;
use crate::forms::book_day::{BookDayEditorForm, NewBookDayForm};
use crate::models::auth::CurrentUser;
use crate::repository::ApiRepository;
use crate::routes::{
    base_context, error_response, failed_form_context, field_errors, redirect, render_template,
    rerenders_form, run_blocking, today,
};
use crate::services::SAVE_FAILED_MESSAGE;
use crate::services::book_day::{
    self as book_day_service, BOOK_DAY_CREATED, BOOK_DAY_DELETED, BOOK_DAY_LOAD_FAILED,
    BOOK_DAY_UPDATE_FAILED, BOOK_DAY_UPDATED,
};

const LIST_PATH: &str = "/bookday";

fn insert_options(context: &mut Context) {
    context.insert("service_types", &ServiceType::options());
    context.insert("shifts", &Shift::options());
    context.insert("statuses", &BookDayStatus::options());
}

fn render_new_form(
    tera: &Tera,
    mut context: Context,
    form: &NewBookDayForm,
    graduations: &[SelectOption],
    field_errors: &BTreeMap<String, String>,
) -> HttpResponse {
    insert_options(&mut context);
    context.insert("form", form);
    context.insert("graduations", graduations);
    context.insert("field_errors", field_errors);
    render_template(tera, "bookday/new.html", &context)
}

fn render_editor(
    tera: &Tera,
    mut context: Context,
    data: &EditorPageData<BookDay, BookDayEditorForm>,
    field_errors: &BTreeMap<String, String>,
) -> HttpResponse {
    insert_options(&mut context);
    context.insert("record", &data.record);
    context.insert("form", &data.form);
    context.insert("graduations", &data.graduations);
    context.insert("sections", &data.sections);
    context.insert("field_errors", field_errors);
    render_template(tera, "bookday/editor.html", &context)
}

#[get("/bookday")]
pub async fn list_book_days(
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    query: web::Query<ListQuery>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let session_user = user.user.clone();
    let query = query.into_inner();

    match run_blocking(move || book_day_service::load_book_days(&repo, &session_user, &query))
        .await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "/bookday");
            context.insert("records", &data.records);
            context.insert("pages", &data.records.pages);
            context.insert("page", &data.records.page);
            context.insert("paged", &data.paged);
            context.insert("search_query", &data.search_query);
            render_template(&tera, "bookday/index.html", &context)
        }
        Err(err) => error_response(err, BOOK_DAY_LOAD_FAILED, "/home"),
    }
}

#[get("/bookday/new")]
pub async fn new_book_day(
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let session_user = user.user.clone();

    match run_blocking(move || book_day_service::load_new_book_day(&repo, &session_user, today()))
        .await
    {
        Ok((form, graduations)) => {
            let context = base_context(&flash_messages, &user, "/bookday");
            render_new_form(&tera, context, &form, &graduations, &BTreeMap::new())
        }
        Err(err) => error_response(err, BOOK_DAY_LOAD_FAILED, LIST_PATH),
    }
}

#[post("/bookday/new")]
pub async fn create_book_day(
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<NewBookDayForm>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let session_user = user.user.clone();
    let submitted = form.clone();

    let (create_repo, create_user) = (repo.clone(), session_user.clone());
    let result = run_blocking(move || {
        book_day_service::create_book_day(&create_repo, &create_user, form, today())
    })
    .await;

    match result {
        Ok(Some(id)) => {
            FlashMessage::success(BOOK_DAY_CREATED).send();
            redirect(&format!("{LIST_PATH}/{id}/edit"))
        }
        Ok(None) => {
            FlashMessage::success(BOOK_DAY_CREATED).send();
            redirect(LIST_PATH)
        }
        Err(err) if rerenders_form(&err) => {
            let loaded = run_blocking(move || {
                book_day_service::load_new_book_day(&repo, &session_user, today())
            })
            .await;
            match loaded {
                Ok((_, graduations)) => {
                    let context = failed_form_context(
                        &flash_messages,
                        &user,
                        "/bookday",
                        err.notification(SAVE_FAILED_MESSAGE),
                    );
                    render_new_form(&tera, context, &submitted, &graduations, &field_errors(&err))
                }
                Err(err) => error_response(err, BOOK_DAY_LOAD_FAILED, LIST_PATH),
            }
        }
        Err(err) => error_response(err, SAVE_FAILED_MESSAGE, LIST_PATH),
    }
}

#[get("/bookday/{id}/edit")]
pub async fn edit_book_day(
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
        book_day_service::load_book_day_editor(&repo, &session_user, &id)
    })
    .await
    {
        Ok(data) => {
            let context = base_context(&flash_messages, &user, "/bookday");
            render_editor(&tera, context, &data, &BTreeMap::new())
        }
        Err(err) => error_response(err, BOOK_DAY_LOAD_FAILED, LIST_PATH),
    }
}

#[post("/bookday/{id}/edit")]
pub async fn save_book_day(
    id: web::Path<String>,
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<BookDayEditorForm>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let session_user = user.user.clone();
    let id = id.into_inner();
    let submitted = form.clone();

    let (save_repo, save_user, save_id) = (repo.clone(), session_user.clone(), id.clone());
    let result = run_blocking(move || {
        let id = RecordId::new(save_id)?;
        book_day_service::save_book_day_editor(&save_repo, &save_user, &id, &form)
    })
    .await;

    match result {
        Ok(()) => {
            FlashMessage::success(BOOK_DAY_UPDATED).send();
            redirect(LIST_PATH)
        }
        Err(err) if rerenders_form(&err) => {
            let loaded = run_blocking(move || {
                let id = RecordId::new(id)?;
                book_day_service::load_book_day_editor(&repo, &session_user, &id)
            })
            .await;
            match loaded {
                Ok(mut data) => {
                    data.form = submitted;
                    let context = failed_form_context(
                        &flash_messages,
                        &user,
                        "/bookday",
                        err.notification(BOOK_DAY_UPDATE_FAILED),
                    );
                    render_editor(&tera, context, &data, &field_errors(&err))
                }
                Err(err) => error_response(err, BOOK_DAY_LOAD_FAILED, LIST_PATH),
            }
        }
        Err(err) => error_response(err, BOOK_DAY_UPDATE_FAILED, LIST_PATH),
    }
}

#[post("/bookday/{id}/delete")]
pub async fn delete_book_day(
    id: web::Path<String>,
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let session_user = user.user.clone();
    let id = id.into_inner();

    match run_blocking(move || {
        let id = RecordId::new(id)?;
        book_day_service::delete_book_day(&repo, &session_user, &id)
    })
    .await
    {
        Ok(()) => {
            FlashMessage::success(BOOK_DAY_DELETED).send();
            redirect(LIST_PATH)
        }
        Err(err) => error_response(err, BOOK_DAY_UPDATE_FAILED, LIST_PATH),
    }
}
