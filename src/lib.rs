//! Administrative dashboard of the environmental police battalion.
//!
//! The `data` feature exposes the domain, form and listing layers; `server`
//! adds the backend repository, services and the Actix-web application.

#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::ApiRepository;
#[cfg(feature = "server")]
use crate::repository::api_client::ApiClient;
#[cfg(feature = "server")]
use crate::routes::auth::{show_sign_in, sign_in, sign_out};
#[cfg(feature = "server")]
use crate::routes::book_day::{
    create_book_day, delete_book_day, edit_book_day, list_book_days, new_book_day, save_book_day,
};
#[cfg(feature = "server")]
use crate::routes::entries::{delete_entry, edit_entry, new_entry, save_entry};
#[cfg(feature = "server")]
use crate::routes::home::show_home;
#[cfg(feature = "server")]
use crate::routes::productivity::{
    create_productivity, delete_productivity, edit_productivity, list_productivity,
    new_productivity, save_productivity,
};
#[cfg(feature = "server")]
use crate::routes::records::{
    create_record, delete_record, edit_record, list_records, new_record, update_record,
};

pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
mod error_conversions;
pub mod forms;
pub mod listing;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod pagination;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
///
/// `client` is shared by every worker; backend calls run on the blocking pool.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig, client: Arc<ApiClient>) -> std::io::Result<()> {
    let repo = ApiRepository::new(client);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = routes::build_tera(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving on {}:{} against {}",
        bind_address.0,
        bind_address.1,
        server_config.api_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_sign_in)
            .service(sign_in)
            .service(
                web::scope("")
                    .wrap(actix_middleware::from_fn(middleware::redirect_unauthorized))
                    .service(show_home)
                    .service(list_book_days)
                    .service(new_book_day)
                    .service(create_book_day)
                    .service(edit_book_day)
                    .service(save_book_day)
                    .service(delete_book_day)
                    .service(list_productivity)
                    .service(new_productivity)
                    .service(create_productivity)
                    .service(edit_productivity)
                    .service(save_productivity)
                    .service(delete_productivity)
                    .service(new_entry)
                    .service(edit_entry)
                    .service(save_entry)
                    .service(delete_entry)
                    .service(list_records)
                    .service(new_record)
                    .service(create_record)
                    .service(edit_record)
                    .service(update_record)
                    .service(delete_record)
                    .service(sign_out),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
