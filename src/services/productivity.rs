use chrono::NaiveDate;

use crate::domain::auth::{Screen, SessionUser};
use crate::domain::entry::ParentKind;
use crate::domain::options::SelectOption;
use crate::domain::productivity::Productivity;
use crate::domain::types::RecordId;
use crate::dto::editor::EditorPageData;
use crate::dto::list::{ListPageData, ListQuery};
use crate::forms::productivity::{NewProductivityForm, ProductivityEditorForm};
use crate::listing::ListState;
use crate::pagination::Paginated;
use crate::repository::errors::RepositoryError;
use crate::repository::{
    DEFAULT_PAGE_SIZE, EntryReader, Pagination, ProductivityReader, ProductivityWriter,
    RecordReader,
};
use crate::services::entries::{load_graduation_options, load_sections};
use crate::services::{ServiceError, ServiceResult, ensure_screen};

pub const PRODUCTIVITY_CREATED: &str = "Produtividade criada com sucesso!";
pub const PRODUCTIVITY_UPDATED: &str = "Dados atualizados com sucesso!";
pub const PRODUCTIVITY_LOAD_FAILED: &str = "Erro ao buscar a productividade.";
pub const PRODUCTIVITY_DELETED: &str = "Item removido com sucesso!";

/// Loads one backend page of reports and filters it by the search term.
pub fn load_productivity<R>(
    repo: &R,
    user: &SessionUser,
    query: &ListQuery,
) -> ServiceResult<ListPageData<Productivity>>
where
    R: ProductivityReader + ?Sized,
{
    ensure_screen(user, Screen::Productivity)?;

    let pagination = Pagination::new(query.page(), DEFAULT_PAGE_SIZE);
    let mut state = ListState::new();
    state.begin_load();

    let total = match repo.list_productivity(pagination) {
        Ok((total, reports)) => {
            state.loaded(reports);
            total
        }
        Err(RepositoryError::SessionExpired) => return Err(ServiceError::SessionExpired),
        Err(err) => {
            state.failed(&err);
            0
        }
    };

    let search_query = query.term();
    let reports = state.into_visible(search_query.as_deref().unwrap_or_default());

    Ok(ListPageData {
        records: Paginated::new(reports, pagination.page, total, pagination.per_page),
        paged: true,
        search_query,
    })
}

/// Creation form prefilled with the signed-in officer, with the rank options.
pub fn load_new_productivity<R>(
    repo: &R,
    user: &SessionUser,
    today: NaiveDate,
) -> ServiceResult<(NewProductivityForm, Vec<SelectOption>)>
where
    R: RecordReader + ?Sized,
{
    ensure_screen(user, Screen::Productivity)?;

    let graduations = load_graduation_options(repo)?;
    Ok((NewProductivityForm::prefilled(user, today), graduations))
}

/// Files a new report. Returns the identifier echoed by the backend, if any.
pub fn create_productivity<R>(
    repo: &R,
    user: &SessionUser,
    form: NewProductivityForm,
    today: NaiveDate,
) -> ServiceResult<Option<RecordId>>
where
    R: ProductivityWriter + ?Sized,
{
    ensure_screen(user, Screen::Productivity)?;

    let new_report = form.into_domain(Some(user.unidade.id.clone()), today)?;

    repo.create_productivity(&new_report).map_err(|err| {
        log::error!("Failed to create productivity report: {err}");
        ServiceError::from(err)
    })
}

/// Loads the composite editor: the report, the rank options and its
/// occurrences.
pub fn load_productivity_editor<R>(
    repo: &R,
    user: &SessionUser,
    id: &RecordId,
) -> ServiceResult<EditorPageData<Productivity, ProductivityEditorForm>>
where
    R: ProductivityReader + EntryReader + RecordReader + ?Sized,
{
    ensure_screen(user, Screen::Productivity)?;

    let record = repo
        .get_productivity(id)
        .map_err(|err| {
            log::error!("Failed to load productivity report {id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)?;

    let graduations = load_graduation_options(repo)?;
    let sections = load_sections(repo, ParentKind::Productivity, id)?;

    Ok(EditorPageData {
        form: ProductivityEditorForm::from(&record),
        record,
        graduations,
        sections,
    })
}

/// Checks the required fields in order and writes the scalar fields back to
/// the report being edited.
pub fn save_productivity_editor<R>(
    repo: &R,
    user: &SessionUser,
    id: &RecordId,
    form: &ProductivityEditorForm,
) -> ServiceResult<()>
where
    R: ProductivityWriter + ?Sized,
{
    ensure_screen(user, Screen::Productivity)?;

    let updates = form.to_update()?;

    repo.update_productivity(id, &updates).map_err(|err| {
        log::error!("Failed to update productivity report {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn delete_productivity<R>(repo: &R, user: &SessionUser, id: &RecordId) -> ServiceResult<()>
where
    R: ProductivityWriter + ?Sized,
{
    ensure_screen(user, Screen::Productivity)?;

    repo.delete_productivity(id).map_err(|err| {
        log::error!("Failed to delete productivity report {id}: {err}");
        ServiceError::from(err)
    })
}
