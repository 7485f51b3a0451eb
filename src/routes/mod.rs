//! HTTP handlers and the helpers they share.

use std::collections::{BTreeMap, HashMap};

use actix_web::error::BlockingError;
use actix_web::http::header;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tera::{Context, Tera, Value};

use crate::domain::dates::{format_full, format_short, parse_iso_date};
use crate::models::auth::CurrentUser;
use crate::services::home::available_screens;
use crate::services::{ServiceError, ServiceResult};

pub mod auth;
pub mod book_day;
pub mod entries;
pub mod home;
pub mod productivity;
pub mod records;

pub const UNAUTHORIZED_MESSAGE: &str = "Você não tem permissão para acessar esta página.";
pub const NOT_FOUND_MESSAGE: &str = "Registro não encontrado.";

/// One flash notification ready for the alerts partial.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub level: &'static str,
}

/// Maps flash levels onto the alert styles of the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

fn collect_alerts(flash_messages: &IncomingFlashMessages) -> Vec<Alert> {
    flash_messages
        .iter()
        .map(|message| Alert {
            message: message.content().to_string(),
            level: alert_level_to_str(&message.level()),
        })
        .collect()
}

/// Context holding only the pending notifications.
pub fn alerts_context(flash_messages: &IncomingFlashMessages) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &collect_alerts(flash_messages));
    context
}

/// Context shared by every signed-in page: notifications, user and menu.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &CurrentUser,
    current_page: &str,
) -> Context {
    let mut context = alerts_context(flash_messages);
    context.insert("current_user", &user.user);
    context.insert("current_page", current_page);
    context.insert("nav", &available_screens(&user.user));
    context
}

/// Base context for a form re-rendered after a failed submit.
///
/// The error is shown by this response, so it is not sent as a flash message.
pub fn failed_form_context(
    flash_messages: &IncomingFlashMessages,
    user: &CurrentUser,
    current_page: &str,
    message: String,
) -> Context {
    let mut context = base_context(flash_messages, user, current_page);
    let mut alerts = collect_alerts(flash_messages);
    alerts.push(Alert {
        message,
        level: alert_level_to_str(&Level::Error),
    });
    context.insert("alerts", &alerts);
    context
}

/// Whether a failed submit should re-render its form rather than redirect.
pub fn rerenders_form(err: &ServiceError) -> bool {
    !matches!(
        err,
        ServiceError::SessionExpired | ServiceError::Unauthorized | ServiceError::NotFound
    )
}

/// Offending fields of a failed submit, for highlighting.
pub fn field_errors(err: &ServiceError) -> BTreeMap<String, String> {
    match err {
        ServiceError::Invalid(err) => err.field_errors(),
        _ => BTreeMap::new(),
    }
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Runs a backend call on the blocking thread pool.
pub async fn run_blocking<F, T>(call: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(call).await.map_err(|err: BlockingError| {
        log::error!("Blocking task failed: {err}");
        ServiceError::Internal(err.to_string())
    })?
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Response for failures that do not re-render a form.
///
/// Expired sessions answer 401 so the middleware signs the user out.
pub fn error_response(err: ServiceError, fallback: &str, back_to: &str) -> HttpResponse {
    match err {
        ServiceError::SessionExpired => HttpResponse::Unauthorized().finish(),
        ServiceError::Unauthorized => {
            FlashMessage::error(UNAUTHORIZED_MESSAGE).send();
            redirect("/home")
        }
        ServiceError::NotFound => {
            FlashMessage::error(NOT_FOUND_MESSAGE).send();
            redirect(back_to)
        }
        err => {
            log::error!("Request failed: {err}");
            FlashMessage::error(err.notification(fallback)).send();
            redirect(back_to)
        }
    }
}

fn date_filter(value: &Value, format: fn(NaiveDate) -> String) -> Value {
    match value.as_str() {
        Some(text) => match parse_iso_date(text) {
            Ok(date) => Value::String(format(date)),
            Err(_) => Value::String(tera::escape_html(text)),
        },
        None => value.clone(),
    }
}

/// `dd/mm/yyyy`; values that are not dates pass through escaped.
pub struct DateBr;

impl tera::Filter for DateBr {
    fn filter(&self, value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
        Ok(date_filter(value, format_short))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Spelled-out Portuguese date.
pub struct DateFull;

impl tera::Filter for DateFull {
    fn filter(&self, value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
        Ok(date_filter(value, format_full))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Loads the templates and registers the date filters.
pub fn build_tera(templates_dir: &str) -> tera::Result<Tera> {
    let mut tera = Tera::new(templates_dir)?;
    tera.register_filter("date_br", DateBr);
    tera.register_filter("date_full", DateFull);
    Ok(tera)
}
