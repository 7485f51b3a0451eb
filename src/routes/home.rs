use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::dates::format_full;
use crate::models::auth::CurrentUser;
use crate::routes::{base_context, render_template, today};

#[get("/home")]
pub async fn show_home(
    user: CurrentUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &user, "/home");
    context.insert("today", &format_full(today()));

    render_template(&tera, "home.html", &context)
}
