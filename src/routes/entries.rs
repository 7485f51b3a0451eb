use std::collections::BTreeMap;

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::domain::entry::EntryKind;
use crate::domain::types::{CategoryPrefix, RecordId};
use crate::dto::editor::{EntryFormData, editor_section_url};
use crate::forms::entry::ChildEntryForm;
use crate::models::auth::CurrentUser;
use crate::repository::ApiRepository;
use crate::routes::{
    base_context, error_response, failed_form_context, field_errors, redirect, render_template,
    rerenders_form, run_blocking,
};
use crate::services::ServiceResult;
use crate::services::entries::{
    self as entries_service, ENTRY_CREATED, ENTRY_SAVE_FAILED, ENTRY_UPDATED,
};

fn render_form(
    tera: &Tera,
    mut context: Context,
    data: &EntryFormData,
    field_errors: &BTreeMap<String, String>,
) -> HttpResponse {
    let prefixes: Vec<String> = CategoryPrefix::all().map(String::from).collect();
    let back_to = editor_section_url(data.kind.parent(), &data.parent_id, data.kind);

    context.insert("kind", data.kind.slug());
    context.insert("title", data.kind.title());
    context.insert("parent_id", &data.parent_id);
    context.insert("form", &data.form);
    context.insert("prefixes", &prefixes);
    context.insert("back_to", &back_to);
    context.insert("field_errors", field_errors);
    render_template(tera, "entries/form.html", &context)
}

/// Editor section to return to, or the home page when the path is malformed.
fn section_url(kind: &str, parent_id: &str) -> String {
    match (kind.parse::<EntryKind>(), RecordId::new(parent_id)) {
        (Ok(kind), Ok(parent_id)) => editor_section_url(kind.parent(), &parent_id, kind),
        _ => "/home".to_string(),
    }
}

#[get("/entries/{kind}/{parent_id}/new")]
pub async fn new_entry(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let session_user = user.user.clone();
    let (kind, parent_id) = path.into_inner();
    let back_to = section_url(&kind, &parent_id);

    match run_blocking(move || {
        let kind: EntryKind = kind.parse()?;
        let parent_id = RecordId::new(parent_id)?;
        entries_service::load_entry_form(&repo, &session_user, kind, parent_id, None)
    })
    .await
    {
        Ok(data) => {
            let context = base_context(&flash_messages, &user, data.kind.parent().base_path());
            render_form(&tera, context, &data, &BTreeMap::new())
        }
        Err(err) => error_response(err, ENTRY_SAVE_FAILED, &back_to),
    }
}

#[get("/entries/{kind}/{parent_id}/{entry_id}/edit")]
pub async fn edit_entry(
    path: web::Path<(String, String, String)>,
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let session_user = user.user.clone();
    let (kind, parent_id, entry_id) = path.into_inner();
    let back_to = section_url(&kind, &parent_id);

    match run_blocking(move || {
        let kind: EntryKind = kind.parse()?;
        let parent_id = RecordId::new(parent_id)?;
        let entry_id = RecordId::new(entry_id)?;
        entries_service::load_entry_form(&repo, &session_user, kind, parent_id, Some(&entry_id))
    })
    .await
    {
        Ok(data) => {
            let context = base_context(&flash_messages, &user, data.kind.parent().base_path());
            render_form(&tera, context, &data, &BTreeMap::new())
        }
        Err(err) => error_response(err, ENTRY_SAVE_FAILED, &back_to),
    }
}

#[post("/entries/{kind}/{parent_id}/save")]
pub async fn save_entry(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ChildEntryForm>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let session_user = user.user.clone();
    let (raw_kind, raw_parent_id) = path.into_inner();
    let back_to = section_url(&raw_kind, &raw_parent_id);
    let (kind, parent_id) = match (raw_kind.parse::<EntryKind>(), RecordId::new(raw_parent_id)) {
        (Ok(kind), Ok(parent_id)) => (kind, parent_id),
        (Err(err), _) | (_, Err(err)) => return error_response(err.into(), ENTRY_SAVE_FAILED, &back_to),
    };
    let submitted = form.clone();

    let save_parent = parent_id.clone();
    let result = run_blocking(move || {
        entries_service::save_entry(&repo, &session_user, kind, &save_parent, form)
    })
    .await;

    match result {
        Ok(saved) => {
            let message = if saved.created {
                ENTRY_CREATED
            } else {
                ENTRY_UPDATED
            };
            FlashMessage::success(message).send();
            redirect(&saved.redirect_to)
        }
        Err(err) if rerenders_form(&err) => {
            let context = failed_form_context(
                &flash_messages,
                &user,
                kind.parent().base_path(),
                err.notification(ENTRY_SAVE_FAILED),
            );
            let data = EntryFormData {
                kind,
                parent_id,
                form: submitted,
            };
            render_form(&tera, context, &data, &field_errors(&err))
        }
        Err(err) => error_response(err, ENTRY_SAVE_FAILED, &back_to),
    }
}

#[post("/entries/{kind}/{parent_id}/{entry_id}/delete")]
pub async fn delete_entry(
    path: web::Path<(String, String, String)>,
    user: CurrentUser,
) -> impl Responder {
    let (kind, parent_id, entry_id) = path.into_inner();
    let back_to = section_url(&kind, &parent_id);

    let result = (|| -> ServiceResult<()> {
        let kind: EntryKind = kind.parse()?;
        let parent_id = RecordId::new(parent_id)?;
        let entry_id = RecordId::new(entry_id)?;
        entries_service::delete_entry(&user.user, kind, &parent_id, &entry_id)
    })();

    match result {
        Ok(()) => redirect(&back_to),
        Err(err) => error_response(err, ENTRY_SAVE_FAILED, &back_to),
    }
}
