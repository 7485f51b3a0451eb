//! Forms for the single-entity screens (reference tables, citations, gate
//! entries and personnel).

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::access_control::{AccessControl, NewAccessControl};
use crate::domain::assessment::{Assessment, NewAssessment};
use crate::domain::options::{
    ActionType, AssessmentStatus, GraduationGroup, Operation, PermissionGroup, PersonStatus,
    ProfileLevel, Sex, SituationGroup, UnitLevel,
};
use crate::domain::people::{NewPerson, Person};
use crate::domain::reference::{
    Graduation, NewGraduation, NewPermission, NewProfile, NewSituation, NewUnit, Permission,
    Profile, Situation, Unit,
};
use crate::domain::types::strip_markup;
use crate::forms::{FormError, OrderedFields, date_input, parse_choice, parse_date, parse_optional_choice};

const FUTURE_BIRTH_DATE: &str = "A data de nascimento não pode ser no futuro.";

/// Whether a submitted form creates a record or replaces an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

/// A form editing one backend record.
pub trait RecordForm: Default + Clone + Serialize + DeserializeOwned {
    /// Record as read from the backend.
    type Record;
    /// Body written on create and update.
    type Payload: Serialize;

    /// Form holding the current values of `record`.
    fn from_record(record: &Self::Record) -> Self;

    /// Validates the form and builds the payload.
    fn into_payload(self, mode: FormMode, today: NaiveDate) -> Result<Self::Payload, FormError>;
}

fn trim(value: String) -> String {
    value.trim().to_string()
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
pub struct GraduationForm {
    #[serde(default)]
    #[validate(length(min = 3, message = "nome do posto/graduação é obrigatório"))]
    pub name_graduation: String,
    #[serde(default)]
    #[validate(length(min = 3, message = "sigla do posto/graduação é obrigatório"))]
    pub sigla_graduation: String,
    #[serde(default)]
    #[validate(length(min = 2, message = "grupo do posto/graduação é obrigatório"))]
    pub group: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "nível do posto/graduação é obrigatório"))]
    pub level: String,
}

impl RecordForm for GraduationForm {
    type Record = Graduation;
    type Payload = NewGraduation;

    fn from_record(record: &Graduation) -> Self {
        Self {
            name_graduation: record.name_graduation.clone(),
            sigla_graduation: record.sigla_graduation.clone(),
            group: record
                .group
                .map(|group| group.as_str().to_string())
                .unwrap_or_default(),
            level: record.level.clone(),
        }
    }

    fn into_payload(self, _mode: FormMode, _today: NaiveDate) -> Result<NewGraduation, FormError> {
        let form = Self {
            name_graduation: trim(self.name_graduation),
            sigla_graduation: trim(self.sigla_graduation),
            group: trim(self.group),
            level: trim(self.level),
        };
        form.validate_in_order()?;
        Ok(NewGraduation {
            group: parse_choice::<GraduationGroup>("group", &form.group, "Grupo inválido.")?,
            name_graduation: form.name_graduation,
            sigla_graduation: form.sigla_graduation,
            level: form.level,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
pub struct UnitForm {
    #[serde(default)]
    #[validate(length(min = 3, message = "nome da unidade é obrigatório"))]
    pub name_unity: String,
    #[serde(default)]
    #[validate(length(min = 3, message = "sigla da unidade é obrigatório"))]
    pub sigla_unity: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "nível da unidade é obrigatório"))]
    pub level: String,
}

impl RecordForm for UnitForm {
    type Record = Unit;
    type Payload = NewUnit;

    fn from_record(record: &Unit) -> Self {
        Self {
            name_unity: record.name_unity.clone(),
            sigla_unity: record.sigla_unity.clone(),
            level: record
                .level
                .map(|level| level.as_str().to_string())
                .unwrap_or_default(),
        }
    }

    fn into_payload(self, _mode: FormMode, _today: NaiveDate) -> Result<NewUnit, FormError> {
        let form = Self {
            name_unity: trim(self.name_unity),
            sigla_unity: trim(self.sigla_unity),
            level: trim(self.level),
        };
        form.validate_in_order()?;
        Ok(NewUnit {
            level: parse_choice::<UnitLevel>("level", &form.level, "Nível inválido.")?,
            name_unity: form.name_unity,
            sigla_unity: form.sigla_unity,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
pub struct SituationForm {
    #[serde(default)]
    #[validate(length(min = 3, message = "nome da situação é obrigatório"))]
    pub name_situation: String,
    #[serde(default)]
    #[validate(length(min = 2, message = "grupo da situação é obrigatório"))]
    pub group: String,
}

impl RecordForm for SituationForm {
    type Record = Situation;
    type Payload = NewSituation;

    fn from_record(record: &Situation) -> Self {
        Self {
            name_situation: record.name_situation.clone(),
            group: record
                .group
                .map(|group| group.as_str().to_string())
                .unwrap_or_default(),
        }
    }

    fn into_payload(self, _mode: FormMode, _today: NaiveDate) -> Result<NewSituation, FormError> {
        let form = Self {
            name_situation: trim(self.name_situation),
            group: trim(self.group),
        };
        form.validate_in_order()?;
        Ok(NewSituation {
            group: parse_choice::<SituationGroup>("group", &form.group, "Grupo inválido.")?,
            name_situation: form.name_situation,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
/// Profile with its permission checklist; `permissions` repeats once per checked box.
pub struct ProfileForm {
    #[serde(default)]
    #[validate(length(min = 3, message = "nome da função é obrigatório"))]
    pub name_profile: String,
    #[serde(default)]
    #[validate(length(min = 2, message = "o nível da função é obrigatório"))]
    pub level: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl RecordForm for ProfileForm {
    type Record = Profile;
    type Payload = NewProfile;

    fn from_record(record: &Profile) -> Self {
        Self {
            name_profile: record.name_profile.clone(),
            level: record
                .level
                .map(|level| level.as_str().to_string())
                .unwrap_or_default(),
            permissions: record.permissions.clone(),
        }
    }

    fn into_payload(self, _mode: FormMode, _today: NaiveDate) -> Result<NewProfile, FormError> {
        let mut permissions: Vec<String> = self
            .permissions
            .into_iter()
            .map(trim)
            .filter(|permission| !permission.is_empty())
            .collect();
        permissions.sort();
        permissions.dedup();

        let form = Self {
            name_profile: trim(self.name_profile),
            level: trim(self.level),
            permissions,
        };
        form.validate_in_order()?;
        Ok(NewProfile {
            level: parse_choice::<ProfileLevel>("level", &form.level, "Nível inválido.")?,
            name_profile: form.name_profile,
            permissions: form.permissions,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
pub struct PermissionForm {
    #[serde(default)]
    #[validate(length(min = 3, message = "descrição da permissão é obrigatório"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 2, message = "grupo da permissão é obrigatório"))]
    pub group: String,
}

impl RecordForm for PermissionForm {
    type Record = Permission;
    type Payload = NewPermission;

    fn from_record(record: &Permission) -> Self {
        Self {
            name: record.name.clone(),
            group: record
                .group
                .map(|group| group.as_str().to_string())
                .unwrap_or_default(),
        }
    }

    fn into_payload(self, _mode: FormMode, _today: NaiveDate) -> Result<NewPermission, FormError> {
        let form = Self {
            name: trim(self.name),
            group: trim(self.group),
        };
        form.validate_in_order()?;
        Ok(NewPermission {
            group: parse_choice::<PermissionGroup>("group", &form.group, "Grupo inválido.")?,
            name: form.name,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
/// Environmental citation.
pub struct AssessmentForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Operação é obrigatória"))]
    pub operation: String,
    #[serde(default)]
    pub disk_report: String,
    /// Citation date; today when left blank.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Latitude é obrigatória"))]
    pub latitude: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Longitude é obrigatória"))]
    pub longitude: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Municipio é obrigatório"))]
    pub city: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Localidade é obrigatória"))]
    pub location: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Número do auto é obrigatório"))]
    pub number_assessment: String,
    #[serde(default)]
    pub term_seizure: String,
    #[serde(default)]
    pub term_embargo: String,
    #[serde(default)]
    pub term_realease: String,
    #[serde(default)]
    pub term_deposit: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Tipo de ação é obrigatório"))]
    pub type_action: String,
    #[serde(default)]
    pub number_document: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Agente de fiscalização é obrigatório"))]
    pub inspection_agent: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Resumo é obrigatório"))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Multas é obrigatória"))]
    pub fine: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Ano é obrigatório"))]
    pub year: String,
    #[serde(default)]
    pub number_process: String,
    #[serde(default)]
    pub status: String,
}

impl RecordForm for AssessmentForm {
    type Record = Assessment;
    type Payload = NewAssessment;

    fn from_record(record: &Assessment) -> Self {
        Self {
            operation: record
                .operation
                .map(|operation| operation.as_str().to_string())
                .unwrap_or_default(),
            disk_report: record.disk_report.clone(),
            date: date_input(record.date),
            latitude: record.latitude.clone(),
            longitude: record.longitude.clone(),
            city: record.city.clone(),
            location: record.location.clone(),
            number_assessment: record.number_assessment.clone(),
            term_seizure: record.term_seizure.clone(),
            term_embargo: record.term_embargo.clone(),
            term_realease: record.term_realease.clone(),
            term_deposit: record.term_deposit.clone(),
            type_action: record
                .type_action
                .map(|action| action.as_str().to_string())
                .unwrap_or_default(),
            number_document: record.number_document.clone(),
            inspection_agent: record.inspection_agent.clone(),
            summary: record.summary.clone(),
            fine: record.fine.clone(),
            year: record.year.clone(),
            number_process: record.number_process.clone(),
            status: record
                .status
                .map(|status| status.as_str().to_string())
                .unwrap_or_default(),
        }
    }

    fn into_payload(self, _mode: FormMode, today: NaiveDate) -> Result<NewAssessment, FormError> {
        let form = Self {
            operation: trim(self.operation),
            disk_report: trim(self.disk_report),
            date: trim(self.date),
            latitude: trim(self.latitude),
            longitude: trim(self.longitude),
            city: trim(self.city),
            location: trim(self.location),
            number_assessment: trim(self.number_assessment),
            term_seizure: trim(self.term_seizure),
            term_embargo: trim(self.term_embargo),
            term_realease: trim(self.term_realease),
            term_deposit: trim(self.term_deposit),
            type_action: trim(self.type_action),
            number_document: trim(self.number_document),
            inspection_agent: trim(self.inspection_agent),
            summary: strip_markup(self.summary.trim()),
            fine: trim(self.fine),
            year: trim(self.year),
            number_process: trim(self.number_process),
            status: trim(self.status),
        };
        form.validate_in_order()?;

        let date = if form.date.is_empty() {
            today
        } else {
            parse_date("date", &form.date, "Data inválida.")?
        };

        Ok(NewAssessment {
            operation: parse_choice::<Operation>("operation", &form.operation, "Operação inválida.")?,
            type_action: parse_choice::<ActionType>(
                "type_action",
                &form.type_action,
                "Tipo de ação inválido.",
            )?,
            status: parse_optional_choice::<AssessmentStatus>(
                "status",
                &form.status,
                "Status inválido.",
            )?,
            date,
            disk_report: form.disk_report,
            latitude: form.latitude,
            longitude: form.longitude,
            city: form.city,
            location: form.location,
            number_assessment: form.number_assessment,
            term_seizure: form.term_seizure,
            term_embargo: form.term_embargo,
            term_realease: form.term_realease,
            term_deposit: form.term_deposit,
            number_document: form.number_document,
            inspection_agent: form.inspection_agent,
            summary: form.summary,
            fine: form.fine,
            year: form.year,
            number_process: form.number_process,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
/// Visitor or vehicle entry registered at the gate.
pub struct AccessControlForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub nome: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Local é obrigatório"))]
    pub setor: String,
    #[serde(default)]
    pub tipo_veiculo: String,
    #[serde(default)]
    pub placa: String,
    #[serde(default)]
    pub obs: String,
    #[serde(default)]
    pub data_nascimento: String,
    /// Entry date; today when left blank.
    #[serde(default)]
    pub data_entrada: String,
    #[serde(default)]
    pub data_saida: String,
}

impl RecordForm for AccessControlForm {
    type Record = AccessControl;
    type Payload = NewAccessControl;

    fn from_record(record: &AccessControl) -> Self {
        Self {
            nome: record.nome.clone(),
            setor: record.setor.clone(),
            tipo_veiculo: record.tipo_veiculo.clone(),
            placa: record.placa.clone(),
            obs: record.obs.clone(),
            data_nascimento: date_input(record.data_nascimento),
            data_entrada: date_input(record.data_entrada),
            data_saida: date_input(record.data_saida),
        }
    }

    fn into_payload(self, _mode: FormMode, today: NaiveDate) -> Result<NewAccessControl, FormError> {
        let form = Self {
            nome: trim(self.nome),
            setor: trim(self.setor),
            tipo_veiculo: trim(self.tipo_veiculo),
            placa: trim(self.placa).to_uppercase(),
            obs: strip_markup(self.obs.trim()),
            data_nascimento: trim(self.data_nascimento),
            data_entrada: trim(self.data_entrada),
            data_saida: trim(self.data_saida),
        };
        form.validate_in_order()?;

        let data_nascimento = optional_date("data_nascimento", &form.data_nascimento)?;
        if data_nascimento.is_some_and(|date| date > today) {
            return Err(FormError::invalid("data_nascimento", FUTURE_BIRTH_DATE));
        }
        let data_entrada = optional_date("data_entrada", &form.data_entrada)?.unwrap_or(today);
        let data_saida = optional_date("data_saida", &form.data_saida)?;
        if data_saida.is_some_and(|exit| exit < data_entrada) {
            return Err(FormError::invalid(
                "data_saida",
                "A data de saída não pode ser anterior à entrada.",
            ));
        }

        Ok(NewAccessControl {
            nome: form.nome,
            setor: form.setor,
            tipo_veiculo: form.tipo_veiculo,
            placa: form.placa,
            obs: form.obs,
            data_nascimento,
            data_entrada,
            data_saida,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
/// Officer registration.
pub struct PersonForm {
    #[serde(default)]
    #[validate(length(min = 3, message = "Nome obrigatório"))]
    pub nome: String,
    #[serde(default)]
    #[validate(length(min = 11, message = "CPF inválido"))]
    pub cpf: String,
    #[serde(default)]
    #[validate(length(min = 5, message = "RG obrigatório"))]
    pub rg: String,
    #[serde(default)]
    #[validate(length(min = 2, message = "Nome de guerra obrigatório"))]
    pub nome_guerra: String,
    #[serde(default)]
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 10, message = "Telefone inválido"))]
    pub telefone: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Selecione o sexo"))]
    pub sexo: String,
    #[serde(default)]
    pub data_nascimento: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Selecione a graduação"))]
    pub graduacao: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Selecione a unidade"))]
    pub unidade: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Selecione a situação"))]
    pub situacao: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Selecione a função"))]
    pub perfil: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Selecione o status"))]
    pub status: String,
    #[serde(default, skip_serializing)]
    pub senha: String,
}

impl RecordForm for PersonForm {
    type Record = Person;
    type Payload = NewPerson;

    fn from_record(record: &Person) -> Self {
        Self {
            nome: record.nome.clone(),
            cpf: record.cpf.clone(),
            rg: record.rg.clone(),
            nome_guerra: record.nome_guerra.clone(),
            email: record.email.clone(),
            telefone: record.telefone.clone(),
            sexo: record
                .sexo
                .map(|sexo| sexo.as_str().to_string())
                .unwrap_or_default(),
            data_nascimento: date_input(record.data_nascimento),
            graduacao: record.graduacao.id.clone(),
            unidade: record.unidade.id.clone(),
            situacao: record.situacao.id.clone(),
            perfil: record.perfil.id.clone(),
            status: record
                .status
                .map(|status| status.as_str().to_string())
                .unwrap_or_default(),
            senha: String::new(),
        }
    }

    fn into_payload(self, mode: FormMode, today: NaiveDate) -> Result<NewPerson, FormError> {
        let form = Self {
            nome: trim(self.nome),
            cpf: self.cpf.chars().filter(char::is_ascii_digit).collect(),
            rg: trim(self.rg),
            nome_guerra: trim(self.nome_guerra),
            email: trim(self.email),
            telefone: trim(self.telefone),
            sexo: trim(self.sexo),
            data_nascimento: trim(self.data_nascimento),
            graduacao: trim(self.graduacao),
            unidade: trim(self.unidade),
            situacao: trim(self.situacao),
            perfil: trim(self.perfil),
            status: trim(self.status),
            senha: self.senha,
        };
        form.validate_in_order()?;

        let data_nascimento = parse_date(
            "data_nascimento",
            &form.data_nascimento,
            "Data de nascimento inválida.",
        )?;
        if data_nascimento > today {
            return Err(FormError::invalid("data_nascimento", FUTURE_BIRTH_DATE));
        }

        let senha = match (mode, form.senha.is_empty()) {
            (_, false) => Some(form.senha),
            (FormMode::Create, true) => Some(form.cpf.clone()),
            (FormMode::Update, true) => None,
        };

        Ok(NewPerson {
            sexo: parse_choice::<Sex>("sexo", &form.sexo, "Selecione o sexo")?,
            status: parse_choice::<PersonStatus>("status", &form.status, "Selecione o status")?,
            nome: form.nome,
            nome_guerra: form.nome_guerra,
            email: form.email,
            rg: form.rg,
            cpf: form.cpf,
            telefone: form.telefone,
            data_nascimento,
            graduacao: form.graduacao,
            unidade: form.unidade,
            situacao: form.situacao,
            perfil: form.perfil,
            senha,
        })
    }
}

fn optional_date(field: &'static str, value: &str) -> Result<Option<NaiveDate>, FormError> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_date(field, value, "Data inválida.").map(Some)
}

impl OrderedFields for GraduationForm {
    const FIELD_ORDER: &'static [&'static str] = &[
        "name_graduation",
        "sigla_graduation",
        "group",
        "level",
    ];
}

impl OrderedFields for UnitForm {
    const FIELD_ORDER: &'static [&'static str] = &[
        "name_unity",
        "sigla_unity",
        "level",
    ];
}

impl OrderedFields for SituationForm {
    const FIELD_ORDER: &'static [&'static str] = &[
        "name_situation",
        "group",
    ];
}

impl OrderedFields for ProfileForm {
    const FIELD_ORDER: &'static [&'static str] = &[
        "name_profile",
        "level",
    ];
}

impl OrderedFields for PermissionForm {
    const FIELD_ORDER: &'static [&'static str] = &[
        "name",
        "group",
    ];
}

impl OrderedFields for AssessmentForm {
    const FIELD_ORDER: &'static [&'static str] = &[
        "operation",
        "latitude",
        "longitude",
        "city",
        "location",
        "number_assessment",
        "type_action",
        "inspection_agent",
        "summary",
        "fine",
        "year",
    ];
}

impl OrderedFields for AccessControlForm {
    const FIELD_ORDER: &'static [&'static str] = &[
        "nome",
        "setor",
    ];
}

impl OrderedFields for PersonForm {
    const FIELD_ORDER: &'static [&'static str] = &[
        "nome",
        "cpf",
        "rg",
        "nome_guerra",
        "email",
        "telefone",
        "sexo",
        "graduacao",
        "unidade",
        "situacao",
        "perfil",
        "status",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 23).unwrap()
    }

    fn person() -> PersonForm {
        PersonForm {
            nome: "João da Silva".into(),
            cpf: "123.456.789-01".into(),
            rg: "123456".into(),
            nome_guerra: "Silva".into(),
            email: "silva@pm.example.com".into(),
            telefone: "92999990000".into(),
            sexo: "M".into(),
            data_nascimento: "1990-05-01".into(),
            graduacao: "g1".into(),
            unidade: "u1".into(),
            situacao: "s1".into(),
            perfil: "p1".into(),
            status: "ativo".into(),
            senha: String::new(),
        }
    }

    #[test]
    fn new_person_password_defaults_to_cpf() {
        let payload = person().into_payload(FormMode::Create, today()).unwrap();
        assert_eq!(payload.cpf, "12345678901");
        assert_eq!(payload.senha.as_deref(), Some("12345678901"));
    }

    #[test]
    fn updating_person_keeps_password_untouched() {
        let payload = person().into_payload(FormMode::Update, today()).unwrap();
        assert_eq!(payload.senha, None);
    }

    #[test]
    fn future_birth_date_is_rejected() {
        let form = PersonForm {
            data_nascimento: "2030-01-01".into(),
            ..person()
        };
        let err = form.into_payload(FormMode::Create, today()).unwrap_err();
        assert_eq!(err.message(), FUTURE_BIRTH_DATE);
    }

    #[test]
    fn invalid_email_is_reported() {
        let form = PersonForm {
            email: "not-an-email".into(),
            ..person()
        };
        let err = form.into_payload(FormMode::Create, today()).unwrap_err();
        assert_eq!(err.field_errors()["email"], "Email inválido");
    }

    #[test]
    fn profile_permissions_are_deduplicated() {
        let form = ProfileForm {
            name_profile: "Comandante".into(),
            level: "cmt".into(),
            permissions: vec!["sistema:gerenciar".into(), "".into(), "sistema:gerenciar".into()],
        };
        let payload = form.into_payload(FormMode::Create, today()).unwrap();
        assert_eq!(payload.permissions, vec!["sistema:gerenciar".to_string()]);
    }

    #[test]
    fn unit_level_must_be_known() {
        let form = UnitForm {
            name_unity: "Batalhão Ambiental".into(),
            sigla_unity: "BPA".into(),
            level: "regiao".into(),
        };
        let err = form.into_payload(FormMode::Create, today()).unwrap_err();
        assert!(err.field_errors().contains_key("level"));
    }

    #[test]
    fn access_entry_defaults_to_today_and_stays_open() {
        let form = AccessControlForm {
            nome: "Carlos".into(),
            setor: "Portaria".into(),
            placa: "abc1d23".into(),
            ..AccessControlForm::default()
        };
        let payload = form.into_payload(FormMode::Create, today()).unwrap();
        assert_eq!(payload.data_entrada, today());
        assert_eq!(payload.data_saida, None);
        assert_eq!(payload.placa, "ABC1D23");
    }

    #[test]
    fn access_entry_requires_sector() {
        let form = AccessControlForm {
            nome: "Carlos".into(),
            ..AccessControlForm::default()
        };
        let err = form.into_payload(FormMode::Create, today()).unwrap_err();
        assert_eq!(err.message(), "Local é obrigatório");
    }

    #[test]
    fn access_entry_notes_drop_tags_but_keep_symbols() {
        let form = AccessControlForm {
            nome: "Carlos".into(),
            setor: "Portaria".into(),
            obs: " <i>Carga</i> de cal & cimento < 2t ".into(),
            ..AccessControlForm::default()
        };
        let payload = form.into_payload(FormMode::Create, today()).unwrap();
        assert_eq!(payload.obs, "Carga de cal & cimento < 2t");
    }

    #[test]
    fn blank_assessment_reports_every_required_field() {
        let err = AssessmentForm::default()
            .into_payload(FormMode::Create, today())
            .unwrap_err();
        assert_eq!(err.field_errors().len(), 11);
    }

    #[test]
    fn graduation_round_trips_through_the_form() {
        let record = Graduation {
            id: crate::domain::types::RecordId::new("g1").unwrap(),
            name_graduation: "Capitão".into(),
            sigla_graduation: "CAP".into(),
            level: "5".into(),
            group: Some(GraduationGroup::ALL[0]),
        };
        let payload = GraduationForm::from_record(&record)
            .into_payload(FormMode::Update, today())
            .unwrap();
        assert_eq!(payload.group, GraduationGroup::ALL[0]);
        assert_eq!(payload.sigla_graduation, "CAP");
    }
}
