use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::access_control::AccessControl;
use crate::domain::assessment::Assessment;
use crate::domain::dates::format_short;
use crate::domain::options::{
    AssessmentStatus, GraduationGroup, Operation, PermissionGroup, PersonStatus, ProfileLevel,
    SituationGroup, UnitLevel,
};
use crate::domain::people::Person;
use crate::domain::reference::{Graduation, Permission, Profile, Situation, Unit};
use crate::domain::types::RecordId;
use crate::pagination::Paginated;

/// Query parameters accepted by every list screen.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Search term typed by the user.
    pub search: Option<String>,
    /// Page requested on the screens backed by a paged backend call.
    pub page: Option<usize>,
}

impl ListQuery {
    pub fn new(search: Option<String>, page: Option<usize>) -> Self {
        Self { search, page }
    }

    /// Trimmed search term, `None` when blank.
    pub fn term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string)
    }

    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }
}

/// Data required to render a list/search screen.
#[derive(Debug, Serialize)]
pub struct ListPageData<T> {
    /// Records left after filtering, with page links when the backend pages.
    pub records: Paginated<T>,
    /// Whether page links should be rendered.
    pub paged: bool,
    /// Search term echoed back to the template when present.
    pub search_query: Option<String>,
}

/// Table layout of the generic record list screen.
pub trait RecordColumns {
    const HEADERS: &'static [&'static str];

    fn row_id(&self) -> &RecordId;

    /// Display values in header order.
    fn cells(&self) -> Vec<String>;
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RecordRow {
    pub id: String,
    pub cells: Vec<String>,
}

/// Headers and rows of a record list, ready for rendering.
#[derive(Debug, Serialize)]
pub struct RecordTable {
    pub headers: &'static [&'static str],
    pub rows: Vec<RecordRow>,
}

impl RecordTable {
    pub fn new<T: RecordColumns>(records: &[T]) -> Self {
        Self {
            headers: T::HEADERS,
            rows: records
                .iter()
                .map(|record| RecordRow {
                    id: record.row_id().to_string(),
                    cells: record.cells(),
                })
                .collect(),
        }
    }
}

fn label<T>(value: Option<T>, label: fn(T) -> &'static str) -> String {
    value.map(label).unwrap_or_default().to_string()
}

fn short_date(date: Option<NaiveDate>) -> String {
    date.map(format_short).unwrap_or_default()
}

impl RecordColumns for Graduation {
    const HEADERS: &'static [&'static str] = &["Nome", "Sigla", "Grupo", "Nível"];

    fn row_id(&self) -> &RecordId {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name_graduation.clone(),
            self.sigla_graduation.clone(),
            label(self.group, GraduationGroup::label),
            self.level.clone(),
        ]
    }
}

impl RecordColumns for Unit {
    const HEADERS: &'static [&'static str] = &["Nome", "Sigla", "Nível"];

    fn row_id(&self) -> &RecordId {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name_unity.clone(),
            self.sigla_unity.clone(),
            label(self.level, UnitLevel::label),
        ]
    }
}

impl RecordColumns for Situation {
    const HEADERS: &'static [&'static str] = &["Nome", "Grupo"];

    fn row_id(&self) -> &RecordId {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name_situation.clone(),
            label(self.group, SituationGroup::label),
        ]
    }
}

impl RecordColumns for Profile {
    const HEADERS: &'static [&'static str] = &["Nome", "Nível", "Permissões"];

    fn row_id(&self) -> &RecordId {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name_profile.clone(),
            label(self.level, ProfileLevel::label),
            self.permissions.len().to_string(),
        ]
    }
}

impl RecordColumns for Permission {
    const HEADERS: &'static [&'static str] = &["Nome", "Grupo"];

    fn row_id(&self) -> &RecordId {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), label(self.group, PermissionGroup::label)]
    }
}

impl RecordColumns for Assessment {
    const HEADERS: &'static [&'static str] = &["Operação", "Nº do auto", "Data", "Município", "Status"];

    fn row_id(&self) -> &RecordId {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            label(self.operation, Operation::label),
            self.number_assessment.clone(),
            short_date(self.date),
            self.city.clone(),
            label(self.status, AssessmentStatus::label),
        ]
    }
}

impl RecordColumns for AccessControl {
    const HEADERS: &'static [&'static str] =
        &["Nome", "Setor", "Placa", "Entrada", "Saída", "Situação"];

    fn row_id(&self) -> &RecordId {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        let situation = if self.is_open() {
            "Em aberto"
        } else {
            "Finalizado"
        };
        vec![
            self.nome.clone(),
            self.setor.clone(),
            self.placa.clone(),
            short_date(self.data_entrada),
            short_date(self.data_saida),
            situation.to_string(),
        ]
    }
}

impl RecordColumns for Person {
    const HEADERS: &'static [&'static str] =
        &["Nome", "Nome de guerra", "Graduação", "Unidade", "Status"];

    fn row_id(&self) -> &RecordId {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.nome.clone(),
            self.nome_guerra.clone(),
            self.graduacao.display().to_string(),
            self.unidade.display().to_string(),
            label(self.status, PersonStatus::label),
        ]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn blank_search_is_no_search() {
        assert_eq!(ListQuery::new(Some("   ".into()), None).term(), None);
        assert_eq!(
            ListQuery::new(Some(" alp ".into()), Some(0)).term().as_deref(),
            Some("alp")
        );
        assert_eq!(ListQuery::new(None, Some(0)).page(), 1);
    }

    #[test]
    fn access_control_rows_show_open_entries() {
        let records: Vec<AccessControl> = serde_json::from_value(json!([
            {"_id": "C1", "nome": "Carlos", "placa": "ABC1D23", "data_entrada": "2025-10-20"},
            {"_id": "C2", "nome": "Ana", "data_entrada": "2025-10-20", "data_saida": "2025-10-21"}
        ]))
        .unwrap();

        let table = RecordTable::new(&records);
        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.rows[0].id, "C1");
        assert_eq!(table.rows[0].cells[3], "20/10/2025");
        assert_eq!(table.rows[0].cells[5], "Em aberto");
        assert_eq!(table.rows[1].cells[5], "Finalizado");
    }

    #[test]
    fn people_rows_use_expanded_labels() {
        let person: Person = serde_json::from_value(json!({
            "_id": "U1",
            "nome": "João da Silva",
            "graduacao": {"_id": "g1", "sigla_graduation": "SGT"},
            "unidade": "u1",
            "status": "ativo"
        }))
        .unwrap();

        let cells = person.cells();
        assert_eq!(cells[2], "SGT");
        assert_eq!(cells[3], "u1");
        assert_eq!(cells[4], "Ativo");
    }
}
