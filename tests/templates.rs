use serde_json::json;
use tera::{Context, Tera};

use sisgop::routes::build_tera;

fn templates() -> Tera {
    build_tera("templates/**/*").unwrap()
}

#[test]
fn sign_in_page_renders_without_a_user() {
    let mut context = Context::new();
    context.insert("alerts", &json!([{ "message": "Até logo!", "level": "info" }]));

    let body = templates().render("auth/sign_in.html", &context).unwrap();

    assert!(body.contains(r#"action="/signin""#));
    assert!(body.contains("Até logo!"));
    assert!(!body.contains("/signout"));
}

#[test]
fn empty_record_list_shows_placeholder_row() {
    let mut context = Context::new();
    context.insert("alerts", &json!([]));
    context.insert("title", "Graduações");
    context.insert("list_path", "/records/graduations");
    context.insert("table", &json!({ "headers": ["Nome", "Sigla"], "rows": [] }));
    context.insert("paged", &false);
    context.insert("search_query", &json!(null));

    let body = templates().render("records/index.html", &context).unwrap();

    assert!(body.contains("Nenhum registro encontrado"));
    assert!(body.contains("graduations/new"));
}

#[test]
fn book_day_list_formats_dates() {
    let mut context = Context::new();
    context.insert("alerts", &json!([]));
    context.insert(
        "records",
        &json!({
            "items": [{
                "_id": "B1",
                "numero_parte": "12",
                "nome_guerra_relator": "Silva",
                "tipo_servico": "Oficial de Dia",
                "turno": null,
                "data_inicial": "2025-10-20",
                "status": null
            }],
            "pages": [],
            "page": 1,
            "total": 1
        }),
    );
    context.insert("pages", &json!([]));
    context.insert("page", &1);
    context.insert("paged", &false);
    context.insert("search_query", &json!("Silva"));

    let body = templates().render("bookday/index.html", &context).unwrap();

    assert!(body.contains("20/10/2025"));
    assert!(body.contains(r#"action="/bookday/B1/delete""#));
    assert!(body.contains(r#"value="Silva""#));
}

#[test]
fn date_filters_render_slashes_and_escape_other_text() {
    let mut tera = templates();
    tera.add_raw_template(
        "dates.html",
        "{{ start | date_br }}|{{ start | date_full }}|{{ note | date_br }}",
    )
    .unwrap();
    let mut context = Context::new();
    context.insert("start", "2025-10-23");
    context.insert("note", "<b>sem data</b>");

    let body = tera.render("dates.html", &context).unwrap();

    assert_eq!(
        body,
        "23/10/2025|23 de outubro de 2025|&lt;b&gt;sem data&lt;&#x2F;b&gt;"
    );
}

#[test]
fn record_form_highlights_invalid_fields() {
    let mut context = Context::new();
    context.insert("alerts", &json!([]));
    context.insert("title", "Graduações");
    context.insert("list_path", "/records/graduations");
    context.insert("record_id", &json!(null));
    context.insert(
        "form",
        &json!({
            "name_graduation": "",
            "sigla_graduation": "CAP",
            "group": "",
            "level": "3"
        }),
    );
    context.insert("field_errors", &json!({ "name_graduation": "Informe o nome." }));
    context.insert("graduation_groups", &json!([{ "value": "QOPM", "label": "QOPM" }]));

    let body = templates().render("records/graduations.html", &context).unwrap();

    assert!(body.contains("graduations/new"));
    assert!(body.contains("is-invalid"));
    assert!(body.contains("Informe o nome."));
}
