use chrono::NaiveDate;

use crate::domain::auth::{Screen, SessionUser};
use crate::domain::book_day::BookDay;
use crate::domain::entry::ParentKind;
use crate::domain::options::SelectOption;
use crate::domain::types::RecordId;
use crate::dto::editor::EditorPageData;
use crate::dto::list::{ListPageData, ListQuery};
use crate::forms::book_day::{BookDayEditorForm, NewBookDayForm};
use crate::listing::ListState;
use crate::pagination::Paginated;
use crate::repository::{BookDayReader, BookDayWriter, EntryReader, RecordReader};
use crate::services::entries::{load_graduation_options, load_sections};
use crate::services::{ServiceError, ServiceResult, ensure_screen, load_list};

pub const BOOK_DAY_CREATED: &str = "Livro de dia criado com sucesso!";
pub const BOOK_DAY_UPDATED: &str = "Livro de dia atualizado com sucesso!";
pub const BOOK_DAY_UPDATE_FAILED: &str = "Erro ao atualizar livro de dia.";
pub const BOOK_DAY_LOAD_FAILED: &str = "Erro ao buscar livro de dia.";
pub const BOOK_DAY_DELETED: &str = "Item removido com sucesso!";

/// Loads every duty log and filters it by the search term.
pub fn load_book_days<R>(
    repo: &R,
    user: &SessionUser,
    query: &ListQuery,
) -> ServiceResult<ListPageData<BookDay>>
where
    R: BookDayReader + ?Sized,
{
    ensure_screen(user, Screen::BookDay)?;

    let mut state = ListState::new();
    state.begin_load();
    load_list(&mut state, repo.list_book_days())?;

    let search_query = query.term();
    let records = state.into_visible(search_query.as_deref().unwrap_or_default());
    let total = records.len();

    Ok(ListPageData {
        records: Paginated::new(records, 1, total, total),
        paged: false,
        search_query,
    })
}

/// Creation form prefilled with the signed-in reporter, with the rank options.
pub fn load_new_book_day<R>(
    repo: &R,
    user: &SessionUser,
    today: NaiveDate,
) -> ServiceResult<(NewBookDayForm, Vec<SelectOption>)>
where
    R: RecordReader + ?Sized,
{
    ensure_screen(user, Screen::BookDay)?;

    let graduations = load_graduation_options(repo)?;
    Ok((NewBookDayForm::prefilled(user, today), graduations))
}

/// Opens a new duty log. Returns the identifier echoed by the backend, if any.
pub fn create_book_day<R>(
    repo: &R,
    user: &SessionUser,
    form: NewBookDayForm,
    today: NaiveDate,
) -> ServiceResult<Option<RecordId>>
where
    R: BookDayWriter + ?Sized,
{
    ensure_screen(user, Screen::BookDay)?;

    let unit = Some(user.unidade.id.clone());
    let new_book_day = form.into_domain(unit, today)?;

    repo.create_book_day(&new_book_day).map_err(|err| {
        log::error!("Failed to create book day: {err}");
        ServiceError::from(err)
    })
}

/// Loads the composite editor: the log, the rank options and its four
/// child collections.
pub fn load_book_day_editor<R>(
    repo: &R,
    user: &SessionUser,
    id: &RecordId,
) -> ServiceResult<EditorPageData<BookDay, BookDayEditorForm>>
where
    R: BookDayReader + EntryReader + RecordReader + ?Sized,
{
    ensure_screen(user, Screen::BookDay)?;

    let record = repo
        .get_book_day(id)
        .map_err(|err| {
            log::error!("Failed to load book day {id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)?;

    let graduations = load_graduation_options(repo)?;
    let sections = load_sections(repo, ParentKind::BookDay, id)?;

    Ok(EditorPageData {
        form: BookDayEditorForm::from(&record),
        record,
        graduations,
        sections,
    })
}

/// Checks the required fields in order and writes the scalar fields back.
pub fn save_book_day_editor<R>(
    repo: &R,
    user: &SessionUser,
    id: &RecordId,
    form: &BookDayEditorForm,
) -> ServiceResult<()>
where
    R: BookDayWriter + ?Sized,
{
    ensure_screen(user, Screen::BookDay)?;

    let updates = form.to_update()?;

    repo.update_book_day(id, &updates).map_err(|err| {
        log::error!("Failed to update book day {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn delete_book_day<R>(repo: &R, user: &SessionUser, id: &RecordId) -> ServiceResult<()>
where
    R: BookDayWriter + ?Sized,
{
    ensure_screen(user, Screen::BookDay)?;

    repo.delete_book_day(id).map_err(|err| {
        log::error!("Failed to delete book day {id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::repository::api_client::Method;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::repository::test::FakeBackend;
    use crate::services::test_support::{manager, officer};

    fn id() -> RecordId {
        RecordId::new("B1").unwrap()
    }

    fn stored_book_day() -> serde_json::Value {
        json!({
            "_id": "B1",
            "nome_completo_relator": "João da Silva",
            "rg_realtor": 123456,
            "graduacao_relator": {"_id": "g1", "sigla_graduation": "SGT"},
            "nome_guerra_relator": "Silva",
            "numero_parte": "42",
            "tipo_servico": "FISCAL DE DIA",
            "turno": "1º TURNO",
            "graduacao_sucessor": "g2",
            "nome_guerra_sucessor": "Souza",
            "quarto_hora": "02:00",
            "data_inicial": "2025-10-01T00:00:00.000Z",
            "data_final": "2025-10-02",
            "unidade": "u1",
            "status": "open"
        })
    }

    #[test]
    fn editor_loads_parent_ranks_and_children() {
        let backend = FakeBackend::new();
        backend
            .respond(Method::Get, "/api/bookDay/B1", stored_book_day())
            .respond(
                Method::Get,
                "/api/graduation",
                json!([{"_id": "g1", "sigla_graduation": "SGT", "group": "QPMP"}]),
            )
            .respond(
                Method::Get,
                "/api/barrackschargeallbyid/B1",
                json!([{"_id": "E1", "id_livro": "B1", "prefixo": "A", "informacao": "Radio ok"}]),
            );
        let repo = FakeBackend::repository(&backend);

        let data = load_book_day_editor(&repo, &manager(), &id()).unwrap();
        assert_eq!(data.form.rg_realtor, "123456");
        assert_eq!(data.form.data_inicial, "2025-10-01");
        assert_eq!(data.graduations[0].label, "SGT - QPMP");
        assert_eq!(data.sections.len(), 4);
        assert_eq!(data.sections[0].entries.len(), 1);

        let calls = backend.calls();
        assert_eq!(calls.len(), 6);
        assert!(calls.iter().all(|call| call.method == Method::Get));
    }

    #[test]
    fn missing_book_day_is_not_found() {
        let backend = FakeBackend::new();
        backend.respond(Method::Get, "/api/bookDay/B1", serde_json::Value::Null);
        let repo = FakeBackend::repository(&backend);

        assert!(matches!(
            load_book_day_editor(&repo, &manager(), &id()),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn failed_validation_never_calls_backend() {
        let mut repo = MockRepository::new();
        repo.expect_update_book_day().never();

        let form = BookDayEditorForm {
            nome_guerra_relator: "Silva".into(),
            ..BookDayEditorForm::default()
        };
        let err = save_book_day_editor(&repo, &manager(), &id(), &form).unwrap_err();
        match err {
            ServiceError::Invalid(err) => {
                assert_eq!(err.message(), "O RG do relator é obrigatório.");
                assert!(err.field_errors().contains_key("quarto_hora"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn valid_editor_issues_single_put() {
        let backend = FakeBackend::new();
        backend.respond(Method::Get, "/api/bookDay/B1", stored_book_day());
        let repo = FakeBackend::repository(&backend);

        let data = load_book_day_editor(&repo, &manager(), &id()).unwrap();
        let before = backend.calls().len();

        save_book_day_editor(&repo, &manager(), &id(), &data.form).unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), before + 1);
        let put = &calls[before];
        assert_eq!(put.method, Method::Put);
        assert_eq!(put.path, "/api/bookDay/B1");
        let body = put.body.as_ref().unwrap();
        assert_eq!(body["quarto_hora"], "02:00");
        assert_eq!(body["data_final"], "2025-10-02");
        assert!(body.get("barracks_charge").is_none());
    }

    #[test]
    fn backend_failure_keeps_message() {
        let mut repo = MockRepository::new();
        repo.expect_update_book_day()
            .returning(|_, _| Err(RepositoryError::Backend("Livro fechado".into())));

        let data_form = BookDayEditorForm {
            nome_guerra_relator: "Silva".into(),
            rg_realtor: "123456".into(),
            graduacao_relator: "g1".into(),
            data_inicial: "2025-10-01".into(),
            data_final: "2025-10-02".into(),
            graduacao_sucessor: "g2".into(),
            nome_guerra_sucessor: "Souza".into(),
            numero_parte: "42".into(),
            quarto_hora: "02:00".into(),
            ..BookDayEditorForm::default()
        };
        let err = save_book_day_editor(&repo, &manager(), &id(), &data_form).unwrap_err();
        assert_eq!(err.notification(BOOK_DAY_UPDATE_FAILED), "Livro fechado");
    }

    #[test]
    fn list_filters_by_reporter_and_part_number() {
        let mut repo = MockRepository::new();
        repo.expect_list_book_days().returning(|| {
            let first: BookDay = serde_json::from_value(stored_book_day()).unwrap();
            let mut second = first.clone();
            second.id = RecordId::new("B2").unwrap();
            second.nome_guerra_relator = "Pereira".into();
            second.numero_parte = "7".into();
            Ok(vec![first, second])
        });

        let query = ListQuery::new(Some("PEREI".into()), None);
        let data = load_book_days(&repo, &manager(), &query).unwrap();
        assert_eq!(data.records.items.len(), 1);
        assert_eq!(data.records.items[0].id.as_str(), "B2");
        assert_eq!(data.search_query.as_deref(), Some("PEREI"));
    }

    #[test]
    fn failed_list_renders_empty() {
        let mut repo = MockRepository::new();
        repo.expect_list_book_days()
            .returning(|| Err(RepositoryError::ConnectionError("refused".into())));

        let data = load_book_days(&repo, &manager(), &ListQuery::default()).unwrap();
        assert!(data.records.items.is_empty());
    }

    #[test]
    fn creating_attaches_reporter_unit() {
        let mut repo = MockRepository::new();
        repo.expect_create_book_day()
            .withf(|new_book_day| new_book_day.unidade.as_deref() == Some("u1"))
            .times(1)
            .returning(|_| Ok(RecordId::new("B9").ok()));

        let today = NaiveDate::from_ymd_opt(2025, 10, 23).unwrap();
        let mut form = NewBookDayForm::prefilled(&manager(), today);
        form.numero_parte = "42".into();
        form.tipo_servico = "FISCAL DE DIA".into();
        form.turno = "1º TURNO".into();
        form.graduacao_antecessor = "g2".into();
        form.nome_guerra_antecessor = "Souza".into();

        let created = create_book_day(&repo, &manager(), form, today).unwrap();
        assert_eq!(created.unwrap().as_str(), "B9");
    }

    #[test]
    fn creation_form_is_prefilled_with_reporter() {
        let backend = FakeBackend::new();
        let repo = FakeBackend::repository(&backend);

        let today = NaiveDate::from_ymd_opt(2025, 10, 23).unwrap();
        let (form, graduations) = load_new_book_day(&repo, &manager(), today).unwrap();
        assert_eq!(form.nome_guerra_relator, "Silva");
        assert_eq!(form.graduacao_relator, "g1");
        assert_eq!(form.data_inicial, "2025-10-23");
        assert!(graduations.is_empty());
    }

    #[test]
    fn officers_without_capability_are_rejected() {
        let repo = MockRepository::new();
        assert!(matches!(
            load_book_days(&repo, &officer(&[]), &ListQuery::default()),
            Err(ServiceError::Unauthorized)
        ));
    }
}
