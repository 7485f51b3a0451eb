//! Client-side style filtering for list/search screens.
//!
//! Every list screen fetches the full record set of one entity type and
//! narrows it with a case-insensitive substring match over a fixed set of
//! fields.

use std::fmt::Display;

use serde::Serialize;

use crate::domain::access_control::AccessControl;
use crate::domain::assessment::Assessment;
use crate::domain::book_day::BookDay;
use crate::domain::people::Person;
use crate::domain::productivity::Productivity;
use crate::domain::reference::{Graduation, Permission, Profile, Situation, Unit};

/// A record that can be matched against a search term.
pub trait Searchable {
    /// Values the search term is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match; a blank term matches everything.
    fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Keeps the records matching `term`, preserving their order.
pub fn filter_records<T: Searchable>(records: Vec<T>, term: &str) -> Vec<T> {
    records
        .into_iter()
        .filter(|record| record.matches(term))
        .collect()
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListPhase {
    Idle,
    Loading,
    Ready,
}

/// Record set behind a list screen.
///
/// A failed fetch keeps whatever was loaded before and still ends in
/// `Ready`; errors are logged, never shown as a blocking state.
#[derive(Debug, Serialize)]
pub struct ListState<T> {
    phase: ListPhase,
    records: Vec<T>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            phase: ListPhase::Idle,
            records: Vec::new(),
        }
    }
}

impl<T> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn begin_load(&mut self) {
        self.phase = ListPhase::Loading;
    }

    pub fn loaded(&mut self, records: Vec<T>) {
        self.records = records;
        self.phase = ListPhase::Ready;
    }

    pub fn failed(&mut self, err: &impl Display) {
        log::error!("Failed to load records: {err}");
        self.phase = ListPhase::Ready;
    }

    /// Applies a fetch result.
    pub fn finish<E: Display>(&mut self, result: Result<Vec<T>, E>) {
        match result {
            Ok(records) => self.loaded(records),
            Err(err) => self.failed(&err),
        }
    }

    /// All loaded records, unfiltered.
    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

impl<T: Searchable> ListState<T> {
    /// Records matching `term`.
    pub fn visible(&self, term: &str) -> Vec<&T> {
        self.records
            .iter()
            .filter(|record| record.matches(term))
            .collect()
    }

    pub fn into_visible(self, term: &str) -> Vec<T> {
        filter_records(self.records, term)
    }
}

impl Searchable for BookDay {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.nome_guerra_relator.as_str(), self.numero_parte.as_str()]
    }
}

impl Searchable for Productivity {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.nome_oficial_dia.as_str(), self.nome_completo.as_str()]
    }
}

impl Searchable for Graduation {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.sigla_graduation.as_str(),
            self.group.map(|group| group.as_str()).unwrap_or_default(),
        ]
    }
}

impl Searchable for Unit {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name_unity.as_str(), self.sigla_unity.as_str()]
    }
}

impl Searchable for Situation {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name_situation.as_str(),
            self.group.map(|group| group.as_str()).unwrap_or_default(),
        ]
    }
}

impl Searchable for Profile {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name_profile.as_str(),
            self.level.map(|level| level.as_str()).unwrap_or_default(),
        ]
    }
}

impl Searchable for Permission {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.group.map(|group| group.as_str()).unwrap_or_default(),
        ]
    }
}

impl Searchable for Assessment {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.operation
                .map(|operation| operation.as_str())
                .unwrap_or_default(),
            self.number_assessment.as_str(),
        ]
    }
}

impl Searchable for AccessControl {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.nome.as_str(), self.placa.as_str()]
    }
}

impl Searchable for Person {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.nome.as_str(), self.nome_guerra.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Team {
        name: &'static str,
        city: &'static str,
        notes: &'static str,
    }

    impl Searchable for Team {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name, self.city]
        }
    }

    fn teams() -> Vec<Team> {
        vec![
            Team {
                name: "Alpha Team",
                city: "X",
                notes: "",
            },
            Team {
                name: "Bravo Team",
                city: "Y",
                notes: "alpine patrol",
            },
        ]
    }

    #[test]
    fn filters_case_insensitively_over_designated_fields() {
        let visible = filter_records(teams(), "alp");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Alpha Team");
    }

    #[test]
    fn upper_case_term_matches() {
        let visible = filter_records(teams(), "BRAVO");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].city, "Y");
    }

    #[test]
    fn blank_term_keeps_everything() {
        assert_eq!(filter_records(teams(), "  ").len(), 2);
    }

    #[test]
    fn no_match_yields_empty_set() {
        assert!(filter_records(teams(), "charlie").is_empty());
    }

    #[test]
    fn undesignated_fields_are_ignored() {
        let visible = filter_records(teams(), "patrol");
        assert!(visible.is_empty());
        assert_eq!(teams()[1].notes, "alpine patrol");
    }

    #[test]
    fn failed_reload_keeps_previous_records() {
        let mut state = ListState::new();
        assert_eq!(state.phase(), ListPhase::Idle);

        state.begin_load();
        assert_eq!(state.phase(), ListPhase::Loading);
        state.finish::<String>(Ok(teams()));

        state.begin_load();
        state.finish::<String>(Err("connection refused".to_string()));
        assert_eq!(state.phase(), ListPhase::Ready);
        assert_eq!(state.records().len(), 2);
        assert_eq!(state.visible("alp").len(), 1);
    }

    #[test]
    fn failed_first_load_is_empty_and_ready() {
        let mut state: ListState<Team> = ListState::new();
        state.begin_load();
        state.finish::<String>(Err("timeout".to_string()));
        assert_eq!(state.phase(), ListPhase::Ready);
        assert!(state.into_visible("").is_empty());
    }

    #[test]
    fn records_of_unsearchable_types_survive_a_failed_reload() {
        let mut state: ListState<u32> = ListState::new();
        state.begin_load();
        state.finish::<String>(Ok(vec![3, 1, 2]));

        state.begin_load();
        state.finish::<String>(Err("timeout".to_string()));
        assert_eq!(state.into_records(), vec![3, 1, 2]);
    }
}
