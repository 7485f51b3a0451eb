//! Generic list and CRUD flow shared by the single-entity screens.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::access_control::AccessControl;
use crate::domain::assessment::Assessment;
use crate::domain::auth::{Screen, SessionUser};
use crate::domain::options::SelectOption;
use crate::domain::people::Person;
use crate::domain::reference::{Graduation, Permission, Profile, Situation, Unit};
use crate::domain::types::RecordId;
use crate::dto::list::{ListPageData, ListQuery};
use crate::forms::records::{FormMode, RecordForm};
use crate::listing::{ListState, Searchable};
use crate::pagination::Paginated;
use crate::repository::errors::RepositoryError;
use crate::repository::{DEFAULT_PAGE_SIZE, Pagination, RecordReader, RecordWriter, RestResource};
use crate::services::{ServiceError, ServiceResult, ensure_screen, load_list};

pub const RECORD_CREATED: &str = "Item criado com sucesso!";
pub const RECORD_UPDATED: &str = "Item atualizado com sucesso!";
pub const RECORD_DELETED: &str = "Item removido com sucesso!";

/// Select options a record form needs besides its own values.
#[derive(Debug, Default, Serialize)]
pub struct FormChoices {
    pub graduations: Vec<SelectOption>,
    pub units: Vec<SelectOption>,
    pub situations: Vec<SelectOption>,
    pub profiles: Vec<SelectOption>,
    pub permissions: Vec<SelectOption>,
}

/// A backend collection edited through the generic record screens.
pub trait ManagedRecord: RestResource + Searchable + Serialize {
    /// Screen listing the collection.
    const SCREEN: Screen;
    /// Whether the collection is listed through the paged endpoint.
    const PAGED: bool = false;
    const CREATED_MESSAGE: &'static str = RECORD_CREATED;
    const UPDATED_MESSAGE: &'static str = RECORD_UPDATED;

    /// Loads the lookup lists the form of this record needs.
    fn choices<R>(_repo: &R) -> ServiceResult<FormChoices>
    where
        R: RecordReader + ?Sized,
    {
        Ok(FormChoices::default())
    }
}

/// Fetches a whole lookup table as select options.
fn options<T, R>(repo: &R, option: impl Fn(&T) -> SelectOption) -> ServiceResult<Vec<SelectOption>>
where
    T: ManagedRecord,
    R: RecordReader + ?Sized,
{
    let mut state = ListState::new();
    state.begin_load();
    load_list(&mut state, repo.list_records::<T>())?;

    Ok(state.records().iter().map(option).collect())
}

impl ManagedRecord for Graduation {
    const SCREEN: Screen = Screen::Graduations;
}

impl ManagedRecord for Unit {
    const SCREEN: Screen = Screen::Units;
}

impl ManagedRecord for Situation {
    const SCREEN: Screen = Screen::Situations;
}

impl ManagedRecord for Permission {
    const SCREEN: Screen = Screen::Permissions;
    const CREATED_MESSAGE: &'static str = "Permissão criada com sucesso!";
    const UPDATED_MESSAGE: &'static str = "Permissão atualizada com sucesso!";
}

impl ManagedRecord for Profile {
    const SCREEN: Screen = Screen::Profiles;

    fn choices<R>(repo: &R) -> ServiceResult<FormChoices>
    where
        R: RecordReader + ?Sized,
    {
        Ok(FormChoices {
            // Profiles store permission names, which is what capabilities are parsed from.
            permissions: options::<Permission, _>(repo, |permission| {
                SelectOption::new(permission.name.as_str(), permission.name.as_str())
            })?,
            ..FormChoices::default()
        })
    }
}

impl ManagedRecord for Assessment {
    const SCREEN: Screen = Screen::Assessments;
    const CREATED_MESSAGE: &'static str = "Autuação criada com sucesso!";
    const UPDATED_MESSAGE: &'static str = "Dados atualizados com sucesso!";
}

impl ManagedRecord for AccessControl {
    const SCREEN: Screen = Screen::AccessControl;
    const PAGED: bool = true;
    const CREATED_MESSAGE: &'static str = "controle de acesso criado com sucesso!";
    const UPDATED_MESSAGE: &'static str = "Dados atualizados com sucesso!";
}

impl ManagedRecord for Person {
    const SCREEN: Screen = Screen::People;
    const CREATED_MESSAGE: &'static str = "Usuário criado com sucesso!";
    const UPDATED_MESSAGE: &'static str = "Dados atualizados com sucesso!";

    fn choices<R>(repo: &R) -> ServiceResult<FormChoices>
    where
        R: RecordReader + ?Sized,
    {
        Ok(FormChoices {
            graduations: options::<Graduation, _>(repo, |graduation| {
                SelectOption::new(graduation.id.as_str(), graduation.select_label())
            })?,
            units: options::<Unit, _>(repo, |unit| {
                SelectOption::new(unit.id.as_str(), unit.sigla_unity.as_str())
            })?,
            situations: options::<Situation, _>(repo, |situation| {
                SelectOption::new(situation.id.as_str(), situation.name_situation.as_str())
            })?,
            profiles: options::<Profile, _>(repo, |profile| {
                SelectOption::new(profile.id.as_str(), profile.name_profile.as_str())
            })?,
            permissions: Vec::new(),
        })
    }
}

/// Loads the list screen of `T`, filtered by the search term.
pub fn load_records<T, R>(
    repo: &R,
    user: &SessionUser,
    query: &ListQuery,
) -> ServiceResult<ListPageData<T>>
where
    T: ManagedRecord,
    R: RecordReader + ?Sized,
{
    ensure_screen(user, T::SCREEN)?;

    let mut state = ListState::new();
    state.begin_load();

    let pagination = Pagination::new(query.page(), DEFAULT_PAGE_SIZE);
    let mut total = None;
    if T::PAGED {
        match repo.list_records_page::<T>(pagination) {
            Ok((count, records)) => {
                total = Some(count);
                state.loaded(records);
            }
            Err(RepositoryError::SessionExpired) => return Err(ServiceError::SessionExpired),
            Err(err) => state.failed(&err),
        }
    } else {
        load_list(&mut state, repo.list_records::<T>())?;
    }

    let search_query = query.term();
    let records = state.into_visible(search_query.as_deref().unwrap_or_default());

    let records = if T::PAGED {
        Paginated::new(
            records,
            pagination.page,
            total.unwrap_or_default(),
            pagination.per_page,
        )
    } else {
        let count = records.len();
        Paginated::new(records, 1, count, count)
    };

    Ok(ListPageData {
        records,
        paged: T::PAGED,
        search_query,
    })
}

/// Form for a new record, or holding the values of record `id`.
pub fn load_record_form<F, R>(
    repo: &R,
    user: &SessionUser,
    id: Option<&RecordId>,
) -> ServiceResult<(F, FormChoices)>
where
    F: RecordForm,
    F::Record: ManagedRecord,
    R: RecordReader + ?Sized,
{
    ensure_screen(user, <F::Record as ManagedRecord>::SCREEN)?;

    let form = match id {
        None => F::default(),
        Some(id) => {
            let record = repo
                .get_record::<F::Record>(id)
                .map_err(|err| {
                    log::error!("Failed to load record {id}: {err}");
                    ServiceError::from(err)
                })?
                .ok_or(ServiceError::NotFound)?;
            F::from_record(&record)
        }
    };

    Ok((form, load_choices::<F::Record, R>(repo)?))
}

/// Lookup lists of the form of `T`.
pub fn load_choices<T, R>(repo: &R) -> ServiceResult<FormChoices>
where
    T: ManagedRecord,
    R: RecordReader + ?Sized,
{
    T::choices(repo)
}

/// Validates the form, then creates the record or updates record `id`.
///
/// Returns the notification to show on success.
pub fn save_record<F, R>(
    repo: &R,
    user: &SessionUser,
    id: Option<&RecordId>,
    form: F,
    today: NaiveDate,
) -> ServiceResult<&'static str>
where
    F: RecordForm,
    F::Record: ManagedRecord + RestResource<Payload = F::Payload>,
    R: RecordWriter + ?Sized,
{
    ensure_screen(user, <F::Record as ManagedRecord>::SCREEN)?;

    let mode = if id.is_some() {
        FormMode::Update
    } else {
        FormMode::Create
    };
    let payload = form.into_payload(mode, today)?;

    let result = match id {
        None => repo.create_record::<F::Record>(&payload),
        Some(id) => repo.update_record::<F::Record>(id, &payload),
    };
    result.map_err(|err| {
        log::error!("Failed to save record: {err}");
        ServiceError::from(err)
    })?;

    Ok(match mode {
        FormMode::Create => <F::Record as ManagedRecord>::CREATED_MESSAGE,
        FormMode::Update => <F::Record as ManagedRecord>::UPDATED_MESSAGE,
    })
}

pub fn delete_record<T, R>(repo: &R, user: &SessionUser, id: &RecordId) -> ServiceResult<()>
where
    T: ManagedRecord,
    R: RecordWriter + ?Sized,
{
    ensure_screen(user, T::SCREEN)?;

    repo.delete_record::<T>(id).map_err(|err| {
        log::error!("Failed to delete record {id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::forms::records::{AccessControlForm, PersonForm, UnitForm};
    use crate::repository::api_client::Method;
    use crate::repository::test::FakeBackend;
    use crate::services::test_support::{manager, officer};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 23).unwrap()
    }

    #[test]
    fn assessments_filter_on_operation_and_number_only() {
        let backend = FakeBackend::new();
        backend.respond(
            Method::Get,
            "/api/assessmentall",
            json!([
                {"_id": "A1", "operation": "OPERAÇÃO CURUPIRA", "number_assessment": "1001", "city": "Manaus"},
                {"_id": "A2", "operation": "OPERAÇÃO TABULEIRO", "number_assessment": "2002", "city": "Curupira"}
            ]),
        );
        let repo = FakeBackend::repository(&backend);

        let query = ListQuery::new(Some("curupira".into()), None);
        let data = load_records::<Assessment, _>(&repo, &manager(), &query).unwrap();
        assert_eq!(data.records.items.len(), 1);
        assert_eq!(data.records.items[0].id.as_str(), "A1");

        let query = ListQuery::new(Some("nothing".into()), None);
        let data = load_records::<Assessment, _>(&repo, &manager(), &query).unwrap();
        assert!(data.records.items.is_empty());
    }

    #[test]
    fn access_control_uses_paged_endpoint() {
        let backend = FakeBackend::new();
        backend.respond(
            Method::Get,
            "/api/accesscontrol/1/20",
            json!({"result": [{"_id": "C1", "nome": "Carlos", "placa": "ABC1D23"}], "count": 1}),
        );
        let repo = FakeBackend::repository(&backend);

        let data = load_records::<AccessControl, _>(&repo, &manager(), &ListQuery::default())
            .unwrap();
        assert!(data.paged);
        assert_eq!(data.records.total, 1);
        assert!(data.records.items[0].is_open());
    }

    #[test]
    fn creating_posts_to_collection() {
        let backend = FakeBackend::new();
        let repo = FakeBackend::repository(&backend);
        let form = UnitForm {
            name_unity: "Batalhão de Polícia Ambiental".into(),
            sigla_unity: "BPA".into(),
            level: "btl".into(),
        };

        let message = save_record(&repo, &manager(), None, form, today()).unwrap();
        assert_eq!(message, RECORD_CREATED);

        let calls = backend.calls();
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[0].path, "/api/unity/");
        assert_eq!(calls[0].body.as_ref().unwrap()["level"], "btl");
    }

    #[test]
    fn updating_puts_to_item() {
        let backend = FakeBackend::new();
        let repo = FakeBackend::repository(&backend);
        let form = AccessControlForm {
            nome: "Carlos".into(),
            setor: "Portaria".into(),
            data_entrada: "2025-10-20".into(),
            data_saida: "2025-10-21".into(),
            ..AccessControlForm::default()
        };

        let id = RecordId::new("C1").unwrap();
        let message = save_record(&repo, &manager(), Some(&id), form, today()).unwrap();
        assert_eq!(message, "Dados atualizados com sucesso!");

        let calls = backend.calls();
        assert_eq!(calls[0].method, Method::Put);
        assert_eq!(calls[0].path, "/api/accesscontrol/C1");
        assert_eq!(calls[0].body.as_ref().unwrap()["data_saida"], "2025-10-21");
    }

    #[test]
    fn invalid_person_is_not_sent() {
        let backend = FakeBackend::new();
        let repo = FakeBackend::repository(&backend);

        let err = save_record(&repo, &manager(), None, PersonForm::default(), today()).unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn person_form_loads_lookup_tables() {
        let backend = FakeBackend::new();
        backend
            .respond(
                Method::Get,
                "/api/graduation",
                json!([{"_id": "g1", "sigla_graduation": "CAP", "group": "QOPM"}]),
            )
            .respond(
                Method::Get,
                "/api/unityall",
                json!([{"_id": "u1", "sigla_unity": "BPA"}]),
            );
        let repo = FakeBackend::repository(&backend);

        let (form, choices) = load_record_form::<PersonForm, _>(&repo, &manager(), None).unwrap();
        assert!(form.nome.is_empty());
        assert_eq!(choices.graduations[0].label, "CAP - QOPM");
        assert_eq!(choices.units[0].value, "u1");
        assert!(choices.situations.is_empty());
    }

    #[test]
    fn backend_rejection_is_reported() {
        let backend = FakeBackend::new();
        backend.fail(
            Method::Delete,
            "/api/users/U9",
            400,
            json!({"message": "Usuário vinculado a livros"}),
        );
        let repo = FakeBackend::repository(&backend);

        let err = delete_record::<Person, _>(&repo, &manager(), &RecordId::new("U9").unwrap())
            .unwrap_err();
        assert_eq!(err.notification("x"), "Usuário vinculado a livros");
    }

    #[test]
    fn records_require_capability() {
        let backend = FakeBackend::new();
        let repo = FakeBackend::repository(&backend);
        assert!(matches!(
            load_records::<Unit, _>(&repo, &officer(&[]), &ListQuery::default()),
            Err(ServiceError::Unauthorized)
        ));
        assert!(backend.calls().is_empty());
    }
}
