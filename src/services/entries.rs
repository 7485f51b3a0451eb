//! Child entries shared by the two composite editors.

use crate::domain::auth::{Screen, SessionUser};
use crate::domain::entry::{EntryKind, ParentKind};
use crate::domain::options::SelectOption;
use crate::domain::reference::Graduation;
use crate::domain::types::RecordId;
use crate::dto::editor::{EntryFormData, EntrySaved, EntrySection};
use crate::forms::entry::ChildEntryForm;
use crate::listing::ListState;
use crate::repository::{EntryReader, EntryWriter, RecordReader};
use crate::services::{ServiceError, ServiceResult, ensure_screen, load_list};

pub const ENTRY_CREATED: &str = "Registro criado com sucesso!";
pub const ENTRY_UPDATED: &str = "Registro atualizado com sucesso!";
pub const ENTRY_SAVE_FAILED: &str = "Erro ao salvar registro.";
pub const ENTRY_DELETE_UNSUPPORTED: &str = "A exclusão deste registro ainda não é suportada.";

pub(crate) const fn parent_screen(parent: ParentKind) -> Screen {
    match parent {
        ParentKind::BookDay => Screen::BookDay,
        ParentKind::Productivity => Screen::Productivity,
    }
}

/// Fetches every child collection of a parent, one request per kind.
///
/// A failed collection is logged and rendered empty.
pub(crate) fn load_sections<R>(
    repo: &R,
    parent: ParentKind,
    parent_id: &RecordId,
) -> ServiceResult<Vec<EntrySection>>
where
    R: EntryReader + ?Sized,
{
    parent
        .entry_kinds()
        .iter()
        .map(|kind| {
            let mut state = ListState::new();
            state.begin_load();
            load_list(&mut state, repo.list_entries(*kind, parent_id))?;
            Ok(EntrySection::new(*kind, state.into_records()))
        })
        .collect()
}

/// Rank options for the editors' graduation selectors.
pub(crate) fn load_graduation_options<R>(repo: &R) -> ServiceResult<Vec<SelectOption>>
where
    R: RecordReader + ?Sized,
{
    let mut state = ListState::new();
    state.begin_load();
    load_list(&mut state, repo.list_records::<Graduation>())?;

    Ok(state
        .records()
        .iter()
        .map(|graduation| SelectOption::new(graduation.id.as_str(), graduation.select_label()))
        .collect())
}

/// Loads the sub-form for a new entry or, with `entry_id`, an existing one.
pub fn load_entry_form<R>(
    repo: &R,
    user: &SessionUser,
    kind: EntryKind,
    parent_id: RecordId,
    entry_id: Option<&RecordId>,
) -> ServiceResult<EntryFormData>
where
    R: EntryReader + ?Sized,
{
    ensure_screen(user, parent_screen(kind.parent()))?;

    let form = match entry_id {
        None => ChildEntryForm::default(),
        Some(entry_id) => {
            let entries = repo.list_entries(kind, &parent_id).map_err(|err| {
                log::error!("Failed to load {kind} entries of {parent_id}: {err}");
                ServiceError::from(err)
            })?;
            entries
                .iter()
                .find(|entry| &entry.id == entry_id)
                .map(ChildEntryForm::from)
                .ok_or(ServiceError::NotFound)?
        }
    };

    Ok(EntryFormData {
        kind,
        parent_id,
        form,
    })
}

/// Creates the entry when it carries no identifier, updates it otherwise.
///
/// The returned outcome points back at the owning editor section, which
/// re-fetches that collection when it loads.
pub fn save_entry<R>(
    repo: &R,
    user: &SessionUser,
    kind: EntryKind,
    parent_id: &RecordId,
    form: ChildEntryForm,
) -> ServiceResult<EntrySaved>
where
    R: EntryWriter + ?Sized,
{
    ensure_screen(user, parent_screen(kind.parent()))?;

    let (existing, payload) = form.into_payload(parent_id.clone())?;

    let result = match &existing {
        None => repo.create_entry(kind, &payload),
        Some(entry_id) => repo.update_entry(kind, entry_id, &payload),
    };
    result.map_err(|err| {
        log::error!("Failed to save {kind} entry of {parent_id}: {err}");
        ServiceError::from(err)
    })?;

    Ok(EntrySaved::new(kind, parent_id, existing.is_none()))
}

/// Child deletion has no backend support yet; nothing is sent.
pub fn delete_entry(
    user: &SessionUser,
    kind: EntryKind,
    parent_id: &RecordId,
    entry_id: &RecordId,
) -> ServiceResult<()> {
    ensure_screen(user, parent_screen(kind.parent()))?;
    log::warn!("Refused to delete {kind} entry {entry_id} of {parent_id}: unsupported");
    Err(ServiceError::Unsupported(ENTRY_DELETE_UNSUPPORTED.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::repository::api_client::Method;
    use crate::repository::mock::MockRepository;
    use crate::repository::test::FakeBackend;
    use crate::services::test_support::{manager, officer};

    fn parent() -> RecordId {
        RecordId::new("P1").unwrap()
    }

    fn barracks_form() -> ChildEntryForm {
        ChildEntryForm {
            id: String::new(),
            prefixo: "A".into(),
            informacao: "Generator inspected".into(),
        }
    }

    #[test]
    fn saving_then_reopening_the_editor_posts_once_and_refetches_once() {
        let backend = FakeBackend::new();
        backend.respond(
            Method::Get,
            "/api/barrackschargeallbyid/P1",
            json!([{
                "_id": "E1",
                "id_livro": "P1",
                "prefixo": "A",
                "informacao": "Generator inspected"
            }]),
        );
        let repo = FakeBackend::repository(&backend);

        let saved = save_entry(
            &repo,
            &manager(),
            EntryKind::BarracksCharge,
            &parent(),
            barracks_form(),
        )
        .unwrap();
        assert!(saved.created);
        assert_eq!(saved.redirect_to, "/bookday/P1/edit#barracks-charge");

        let sections = load_sections(&repo, ParentKind::BookDay, &parent()).unwrap();
        assert_eq!(sections[0].entries.len(), 1);

        let calls = backend.calls();
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[0].path, "/api/barrackscharge/");
        assert_eq!(
            calls[0].body,
            Some(json!({"prefixo": "A", "informacao": "Generator inspected", "id_livro": "P1"}))
        );
        assert_eq!(calls[0].token.as_deref(), Some("test-token"));
        let refetches = calls
            .iter()
            .filter(|call| call.method == Method::Get && call.path == "/api/barrackschargeallbyid/P1")
            .count();
        assert_eq!(refetches, 1);
    }

    #[test]
    fn entries_with_an_identifier_are_updated() {
        let backend = FakeBackend::new();
        let repo = FakeBackend::repository(&backend);
        let form = ChildEntryForm {
            id: "E7".into(),
            ..barracks_form()
        };

        let saved = save_entry(&repo, &manager(), EntryKind::Gather, &parent(), form).unwrap();
        assert!(!saved.created);

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Put);
        assert_eq!(calls[0].path, "/api/gather/E7");
    }

    #[test]
    fn invalid_entry_issues_no_request() {
        let mut repo = MockRepository::new();
        repo.expect_create_entry().never();
        repo.expect_update_entry().never();

        let form = ChildEntryForm {
            prefixo: String::new(),
            ..barracks_form()
        };
        let err = save_entry(&repo, &manager(), EntryKind::BarracksCharge, &parent(), form)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn failed_collection_renders_empty() {
        let backend = FakeBackend::new();
        backend.fail(
            Method::Get,
            "/api/gatherallbyid/P1",
            500,
            json!({"error": "boom"}),
        );
        let repo = FakeBackend::repository(&backend);

        let sections = load_sections(&repo, ParentKind::BookDay, &parent()).unwrap();
        assert_eq!(sections.len(), 4);
        assert!(sections.iter().all(|section| section.entries.is_empty()));
    }

    #[test]
    fn expired_session_interrupts_loading() {
        let backend = FakeBackend::new();
        backend.fail(
            Method::Get,
            "/api/barrackschargeallbyid/P1",
            401,
            json!({"error": "Token invalid"}),
        );
        let repo = FakeBackend::repository(&backend);

        assert!(matches!(
            load_sections(&repo, ParentKind::BookDay, &parent()),
            Err(ServiceError::SessionExpired)
        ));
    }

    #[test]
    fn delete_is_explicitly_unsupported() {
        let err = delete_entry(
            &manager(),
            EntryKind::AdministrativeOccurrence,
            &parent(),
            &RecordId::new("E1").unwrap(),
        )
        .unwrap_err();
        assert_eq!(err.notification(ENTRY_SAVE_FAILED), ENTRY_DELETE_UNSUPPORTED);
    }

    #[test]
    fn entries_require_capability() {
        let repo = MockRepository::new();
        let err = save_entry(
            &repo,
            &officer(&[]),
            EntryKind::ProductivityOccurrence,
            &parent(),
            barracks_form(),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
    }

    #[test]
    fn editing_loads_the_existing_entry() {
        let backend = FakeBackend::new();
        backend.respond(
            Method::Get,
            "/api/productivityoccurrencesallbyid/P1",
            json!([{"_id": "E2", "id_livro": "P1", "prefixo": "C", "informacao": "Two arrests"}]),
        );
        let repo = FakeBackend::repository(&backend);

        let data = load_entry_form(
            &repo,
            &manager(),
            EntryKind::ProductivityOccurrence,
            parent(),
            Some(&RecordId::new("E2").unwrap()),
        )
        .unwrap();
        assert_eq!(data.form.prefixo, "C");
        assert_eq!(data.form.id, "E2");
    }
}
