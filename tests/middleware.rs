use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::{
    App, HttpResponse,
    cookie::Key,
    http::{StatusCode, header},
    middleware::from_fn,
    test, web,
};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};

use sisgop::middleware::{SIGN_IN_PATH, redirect_unauthorized};
use sisgop::models::auth::TOKEN_KEY;

fn test_key() -> Key {
    Key::from(&[7u8; 64])
}

#[actix_web::test]
async fn redirects_unauthorized_to_signin() {
    let app = test::init_service(
        App::new()
            .wrap(from_fn(redirect_unauthorized))
            .default_service(web::to(|| async { HttpResponse::Unauthorized().finish() })),
    )
    .await;

    let req = test::TestRequest::default().to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        SIGN_IN_PATH
    );
}

#[actix_web::test]
async fn success_response_passes_through() {
    let app = test::init_service(
        App::new()
            .wrap(from_fn(redirect_unauthorized))
            .default_service(web::to(|| async { HttpResponse::Ok().finish() })),
    )
    .await;

    let req = test::TestRequest::default().to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn rejected_token_signs_the_user_out() {
    let app = test::init_service(
        App::new()
            .wrap(from_fn(redirect_unauthorized))
            .wrap(
                FlashMessagesFramework::builder(CookieMessageStore::builder(test_key()).build())
                    .build(),
            )
            .wrap(SessionMiddleware::new(CookieSessionStore::default(), test_key()))
            .default_service(web::to(|session: Session| async move {
                session.insert(TOKEN_KEY, "expired-token").unwrap();
                HttpResponse::Unauthorized().finish()
            })),
    )
    .await;

    let req = test::TestRequest::default().to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        SIGN_IN_PATH
    );
}
