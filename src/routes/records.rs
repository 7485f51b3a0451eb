//! Single-entity screens under `/records/{resource}`.
//!
//! Every resource shares the same handlers; the path segment selects the form
//! type and, through it, the record type and backend collection.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::domain::options::{
    ActionType, AssessmentStatus, GraduationGroup, Operation, PermissionGroup, PersonStatus,
    ProfileLevel, Sex, SituationGroup, UnitLevel,
};
use crate::domain::types::RecordId;
use crate::dto::list::{ListQuery, RecordColumns, RecordTable};
use crate::forms::parse_form;
use crate::forms::records::{
    AccessControlForm, AssessmentForm, GraduationForm, PermissionForm, PersonForm, ProfileForm,
    RecordForm, SituationForm, UnitForm,
};
use crate::models::auth::CurrentUser;
use crate::repository::{ApiRepository, RestResource};
use crate::routes::{
    base_context, error_response, failed_form_context, field_errors, redirect, render_template,
    rerenders_form, run_blocking, today,
};
use crate::services::records::{self as records_service, FormChoices, ManagedRecord, RECORD_DELETED};
use crate::services::SAVE_FAILED_MESSAGE;

pub const RECORD_LOAD_FAILED: &str = "Erro ao buscar os dados.";

/// Resource path segments, in menu order.
pub const RESOURCES: [&str; 8] = [
    "access-control",
    "assessments",
    "people",
    "permissions",
    "profiles",
    "graduations",
    "situations",
    "units",
];

/// Binds `$form` to the form type of `$resource` and evaluates `$body`;
/// unknown resources evaluate `$fallback`.
macro_rules! with_form {
    ($resource:expr, $form:ident => $body:expr, else $fallback:expr) => {
        match $resource {
            "access-control" => {
                type $form = AccessControlForm;
                $body
            }
            "assessments" => {
                type $form = AssessmentForm;
                $body
            }
            "people" => {
                type $form = PersonForm;
                $body
            }
            "permissions" => {
                type $form = PermissionForm;
                $body
            }
            "profiles" => {
                type $form = ProfileForm;
                $body
            }
            "graduations" => {
                type $form = GraduationForm;
                $body
            }
            "situations" => {
                type $form = SituationForm;
                $body
            }
            "units" => {
                type $form = UnitForm;
                $body
            }
            _ => $fallback,
        }
    };
}

fn list_path<T: ManagedRecord>() -> &'static str {
    T::SCREEN.path()
}

fn insert_static_options(context: &mut Context) {
    context.insert("graduation_groups", &GraduationGroup::options());
    context.insert("unit_levels", &UnitLevel::options());
    context.insert("situation_groups", &SituationGroup::options());
    context.insert("profile_levels", &ProfileLevel::options());
    context.insert("permission_groups", &PermissionGroup::options());
    context.insert("operations", &Operation::options());
    context.insert("action_types", &ActionType::options());
    context.insert("assessment_statuses", &AssessmentStatus::options());
    context.insert("sexes", &Sex::options());
    context.insert("person_statuses", &PersonStatus::options());
}

struct FormView<'a, F> {
    resource: &'a str,
    record_id: Option<&'a str>,
    form: &'a F,
    choices: &'a FormChoices,
}

fn render_form<F>(
    tera: &Tera,
    mut context: Context,
    view: FormView<'_, F>,
    field_errors: &BTreeMap<String, String>,
) -> HttpResponse
where
    F: RecordForm,
    F::Record: ManagedRecord,
{
    insert_static_options(&mut context);
    context.insert("title", <F::Record as ManagedRecord>::SCREEN.title());
    context.insert("resource", view.resource);
    context.insert("list_path", list_path::<F::Record>());
    context.insert("record_id", &view.record_id);
    context.insert("form", view.form);
    context.insert("choices", view.choices);
    context.insert("field_errors", field_errors);
    render_template(tera, &format!("records/{}.html", view.resource), &context)
}

async fn list_page<F>(
    resource: &str,
    user: &CurrentUser,
    repo: ApiRepository,
    query: ListQuery,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
) -> HttpResponse
where
    F: RecordForm,
    F::Record: ManagedRecord + RecordColumns + Send + 'static,
{
    let session_user = user.user.clone();
    let result = run_blocking(move || {
        records_service::load_records::<F::Record, _>(&repo, &session_user, &query)
    })
    .await;

    match result {
        Ok(data) => {
            let mut context = base_context(flash_messages, user, list_path::<F::Record>());
            context.insert("title", <F::Record as ManagedRecord>::SCREEN.title());
            context.insert("resource", resource);
            context.insert("list_path", list_path::<F::Record>());
            context.insert("table", &RecordTable::new(&data.records.items));
            context.insert("pages", &data.records.pages);
            context.insert("page", &data.records.page);
            context.insert("total", &data.records.total);
            context.insert("paged", &data.paged);
            context.insert("search_query", &data.search_query);
            render_template(tera, "records/index.html", &context)
        }
        Err(err) => error_response(err, RECORD_LOAD_FAILED, "/home"),
    }
}

async fn form_page<F>(
    resource: &str,
    id: Option<String>,
    user: &CurrentUser,
    repo: ApiRepository,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
) -> HttpResponse
where
    F: RecordForm + Send + 'static,
    F::Record: ManagedRecord,
{
    let session_user = user.user.clone();
    let record_id = id.clone();
    let result = run_blocking(move || {
        let id = id.map(RecordId::new).transpose()?;
        records_service::load_record_form::<F, _>(&repo, &session_user, id.as_ref())
    })
    .await;

    match result {
        Ok((form, choices)) => {
            let context = base_context(flash_messages, user, list_path::<F::Record>());
            let view = FormView {
                resource,
                record_id: record_id.as_deref(),
                form: &form,
                choices: &choices,
            };
            render_form(tera, context, view, &BTreeMap::new())
        }
        Err(err) => error_response(err, RECORD_LOAD_FAILED, list_path::<F::Record>()),
    }
}

async fn save_page<F>(
    resource: &str,
    id: Option<String>,
    body: &[u8],
    user: &CurrentUser,
    repo: ApiRepository,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
) -> HttpResponse
where
    F: RecordForm + Send + 'static,
    F::Record: ManagedRecord + RestResource<Payload = F::Payload>,
{
    let form: F = match parse_form(body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse {resource} form: {err}");
            return error_response(err.into(), SAVE_FAILED_MESSAGE, list_path::<F::Record>());
        }
    };
    let submitted = form.clone();
    let session_user = user.user.clone();
    let (save_repo, save_user, save_id) = (repo.clone(), session_user.clone(), id.clone());

    let result = run_blocking(move || {
        let id = save_id.map(RecordId::new).transpose()?;
        records_service::save_record::<F, _>(&save_repo, &save_user, id.as_ref(), form, today())
    })
    .await;

    match result {
        Ok(message) => {
            FlashMessage::success(message).send();
            redirect(list_path::<F::Record>())
        }
        Err(err) if rerenders_form(&err) => {
            let loaded = run_blocking(move || {
                records_service::load_choices::<F::Record, _>(&repo)
            })
            .await;
            match loaded {
                Ok(choices) => {
                    let context = failed_form_context(
                        flash_messages,
                        user,
                        list_path::<F::Record>(),
                        err.notification(SAVE_FAILED_MESSAGE),
                    );
                    let view = FormView {
                        resource,
                        record_id: id.as_deref(),
                        form: &submitted,
                        choices: &choices,
                    };
                    render_form(tera, context, view, &field_errors(&err))
                }
                Err(err) => error_response(err, RECORD_LOAD_FAILED, list_path::<F::Record>()),
            }
        }
        Err(err) => error_response(err, SAVE_FAILED_MESSAGE, list_path::<F::Record>()),
    }
}

async fn delete_page<F>(id: String, user: &CurrentUser, repo: ApiRepository) -> HttpResponse
where
    F: RecordForm,
    F::Record: ManagedRecord,
{
    let session_user = user.user.clone();
    let result = run_blocking(move || {
        let id = RecordId::new(id)?;
        records_service::delete_record::<F::Record, _>(&repo, &session_user, &id)
    })
    .await;

    match result {
        Ok(()) => {
            FlashMessage::success(RECORD_DELETED).send();
            redirect(list_path::<F::Record>())
        }
        Err(err) => error_response(err, SAVE_FAILED_MESSAGE, list_path::<F::Record>()),
    }
}

#[get("/records/{resource}")]
pub async fn list_records(
    resource: web::Path<String>,
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    query: web::Query<ListQuery>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let query = query.into_inner();
    let resource = resource.into_inner();

    with_form!(resource.as_str(), Form => {
        list_page::<Form>(&resource, &user, repo, query, &flash_messages, &tera).await
    }, else HttpResponse::NotFound().finish())
}

#[get("/records/{resource}/new")]
pub async fn new_record(
    resource: web::Path<String>,
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let resource = resource.into_inner();

    with_form!(resource.as_str(), Form => {
        form_page::<Form>(&resource, None, &user, repo, &flash_messages, &tera).await
    }, else HttpResponse::NotFound().finish())
}

#[post("/records/{resource}/new")]
pub async fn create_record(
    resource: web::Path<String>,
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    body: web::Bytes,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let resource = resource.into_inner();

    with_form!(resource.as_str(), Form => {
        save_page::<Form>(&resource, None, &body, &user, repo, &flash_messages, &tera).await
    }, else HttpResponse::NotFound().finish())
}

#[get("/records/{resource}/{id}/edit")]
pub async fn edit_record(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let (resource, id) = path.into_inner();

    with_form!(resource.as_str(), Form => {
        form_page::<Form>(&resource, Some(id), &user, repo, &flash_messages, &tera).await
    }, else HttpResponse::NotFound().finish())
}

#[post("/records/{resource}/{id}/edit")]
pub async fn update_record(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    body: web::Bytes,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let (resource, id) = path.into_inner();

    with_form!(resource.as_str(), Form => {
        save_page::<Form>(&resource, Some(id), &body, &user, repo, &flash_messages, &tera).await
    }, else HttpResponse::NotFound().finish())
}

#[post("/records/{resource}/{id}/delete")]
pub async fn delete_record(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    let repo = repo.with_token(&user.token);
    let (resource, id) = path.into_inner();

    with_form!(resource.as_str(), Form => {
        delete_page::<Form>(id, &user, repo).await
    }, else HttpResponse::NotFound().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::Screen;

    #[test]
    fn every_record_screen_has_a_resource() {
        let record_paths: Vec<&str> = Screen::ALL
            .iter()
            .filter_map(|screen| screen.path().strip_prefix("/records/"))
            .collect();
        assert_eq!(record_paths.len(), RESOURCES.len());
        assert!(record_paths.iter().all(|path| RESOURCES.contains(path)));
    }

    #[test]
    fn resources_resolve_to_their_screen() {
        for resource in RESOURCES {
            let path = with_form!(resource, Form => {
                return_path::<Form>()
            }, else String::new());
            assert_eq!(path, format!("/records/{resource}"));
        }
    }

    fn return_path<F>() -> String
    where
        F: RecordForm,
        F::Record: ManagedRecord,
    {
        list_path::<F::Record>().to_string()
    }
}
