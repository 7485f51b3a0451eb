//! Forms opening a duty log and editing it in the composite editor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::auth::SessionUser;
use crate::domain::book_day::{BookDay, NewBookDay, UpdateBookDay};
use crate::domain::options::{BookDayStatus, ServiceType, Shift};
use crate::forms::{FormError, OrderedFields, check_required, date_input, parse_choice, parse_date, parse_optional_choice};

const SERVICE_TYPE_MESSAGE: &str = "Tipo de serviço inválido.";
const SHIFT_MESSAGE: &str = "Turno de serviço inválido.";

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
/// Opening data of a duty log, prefilled with the signed-in reporter.
pub struct NewBookDayForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Nome completo do relator é obrigatório"))]
    pub nome_completo_relator: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "RG do relator é obrigatório"))]
    pub rg_realtor: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Posto/Graduação do relator é obrigatório"))]
    pub graduacao_relator: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Nome de guerra do relator é obrigatório"))]
    pub nome_guerra_relator: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Nº da parte é obrigatório"))]
    pub numero_parte: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Tipo de serviço é obrigatório"))]
    pub tipo_servico: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Turno de serviço é obrigatório"))]
    pub turno: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Posto/Graduação do antecessor é obrigatório"))]
    pub graduacao_antecessor: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Nome de guerra do antecessor é obrigatório"))]
    pub nome_guerra_antecessor: String,
    /// Opening date; today when left blank.
    #[serde(default)]
    pub data_inicial: String,
}

impl NewBookDayForm {
    /// Form prefilled with the reporter's identity.
    pub fn prefilled(user: &SessionUser, today: NaiveDate) -> Self {
        Self {
            nome_completo_relator: user.nome.clone(),
            rg_realtor: user.rg.clone(),
            graduacao_relator: user.graduacao.id.clone(),
            nome_guerra_relator: user.nome_guerra.clone(),
            data_inicial: date_input(Some(today)),
            ..Self::default()
        }
    }

    /// Validates the form and builds the payload for the reporter's unit.
    pub fn into_domain(self, unidade: Option<String>, today: NaiveDate) -> Result<NewBookDay, FormError> {
        let form = self.trimmed();
        form.validate_in_order()?;

        let data_inicial = if form.data_inicial.is_empty() {
            today
        } else {
            parse_date("data_inicial", &form.data_inicial, "Data inicial inválida.")?
        };

        Ok(NewBookDay {
            tipo_servico: parse_choice::<ServiceType>(
                "tipo_servico",
                &form.tipo_servico,
                SERVICE_TYPE_MESSAGE,
            )?,
            turno: parse_choice::<Shift>("turno", &form.turno, SHIFT_MESSAGE)?,
            nome_completo_relator: form.nome_completo_relator,
            rg_realtor: form.rg_realtor,
            graduacao_relator: form.graduacao_relator,
            nome_guerra_relator: form.nome_guerra_relator,
            numero_parte: form.numero_parte,
            graduacao_antecessor: form.graduacao_antecessor,
            nome_guerra_antecessor: form.nome_guerra_antecessor,
            unidade: unidade.filter(|unit| !unit.trim().is_empty()),
            data_inicial,
        })
    }

    fn trimmed(self) -> Self {
        Self {
            nome_completo_relator: self.nome_completo_relator.trim().to_string(),
            rg_realtor: self.rg_realtor.trim().to_string(),
            graduacao_relator: self.graduacao_relator.trim().to_string(),
            nome_guerra_relator: self.nome_guerra_relator.trim().to_string(),
            numero_parte: self.numero_parte.trim().to_string(),
            tipo_servico: self.tipo_servico.trim().to_string(),
            turno: self.turno.trim().to_string(),
            graduacao_antecessor: self.graduacao_antecessor.trim().to_string(),
            nome_guerra_antecessor: self.nome_guerra_antecessor.trim().to_string(),
            data_inicial: self.data_inicial.trim().to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
/// Scalar fields of a duty log as edited in the composite editor.
pub struct BookDayEditorForm {
    #[serde(default)]
    pub nome_completo_relator: String,
    #[serde(default)]
    pub rg_realtor: String,
    #[serde(default)]
    pub graduacao_relator: String,
    #[serde(default)]
    pub nome_guerra_relator: String,
    #[serde(default)]
    pub numero_parte: String,
    #[serde(default)]
    pub tipo_servico: String,
    #[serde(default)]
    pub turno: String,
    #[serde(default)]
    pub graduacao_antecessor: String,
    #[serde(default)]
    pub nome_guerra_antecessor: String,
    #[serde(default)]
    pub graduacao_sucessor: String,
    #[serde(default)]
    pub nome_guerra_sucessor: String,
    #[serde(default)]
    pub quarto_hora: String,
    #[serde(default)]
    pub data_inicial: String,
    #[serde(default)]
    pub data_final: String,
    #[serde(default)]
    pub unidade: String,
    #[serde(default)]
    pub status: String,
}

impl From<&BookDay> for BookDayEditorForm {
    fn from(book_day: &BookDay) -> Self {
        Self {
            nome_completo_relator: book_day.nome_completo_relator.clone(),
            rg_realtor: book_day.rg_realtor.clone(),
            graduacao_relator: book_day.graduacao_relator.id.clone(),
            nome_guerra_relator: book_day.nome_guerra_relator.clone(),
            numero_parte: book_day.numero_parte.clone(),
            tipo_servico: book_day
                .tipo_servico
                .map(|value| value.as_str().to_string())
                .unwrap_or_default(),
            turno: book_day
                .turno
                .map(|value| value.as_str().to_string())
                .unwrap_or_default(),
            graduacao_antecessor: book_day.graduacao_antecessor.id.clone(),
            nome_guerra_antecessor: book_day.nome_guerra_antecessor.clone(),
            graduacao_sucessor: book_day.graduacao_sucessor.id.clone(),
            nome_guerra_sucessor: book_day.nome_guerra_sucessor.clone(),
            quarto_hora: book_day.quarto_hora.clone(),
            data_inicial: date_input(book_day.data_inicial),
            data_final: date_input(book_day.data_final),
            unidade: book_day.unidade.id.clone(),
            status: book_day
                .status
                .map(|value| value.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

impl BookDayEditorForm {
    /// Required scalar fields in the order they are reported.
    pub fn check_required(&self) -> Result<(), FormError> {
        check_required(&[
            (
                "nome_guerra_relator",
                &self.nome_guerra_relator,
                "O nome de guerra do relator é obrigatório.",
            ),
            ("rg_realtor", &self.rg_realtor, "O RG do relator é obrigatório."),
            (
                "graduacao_relator",
                &self.graduacao_relator,
                "A graduação do relator é obrigatória.",
            ),
            ("data_inicial", &self.data_inicial, "A data inicial é obrigatória."),
            ("data_final", &self.data_final, "A data final é obrigatória."),
            (
                "graduacao_sucessor",
                &self.graduacao_sucessor,
                "A graduação do sucessor é obrigatória.",
            ),
            (
                "nome_guerra_sucessor",
                &self.nome_guerra_sucessor,
                "O nome de guerra do sucessor é obrigatório.",
            ),
            ("numero_parte", &self.numero_parte, "O nº da parte é obrigatório."),
            (
                "quarto_hora",
                &self.quarto_hora,
                "O quarto de hora da guarda é obrigatório.",
            ),
        ])
    }

    /// Builds the update payload after the required-field check.
    pub fn to_update(&self) -> Result<UpdateBookDay, FormError> {
        self.check_required()?;

        Ok(UpdateBookDay {
            nome_completo_relator: self.nome_completo_relator.trim().to_string(),
            rg_realtor: self.rg_realtor.trim().to_string(),
            graduacao_relator: self.graduacao_relator.trim().to_string(),
            nome_guerra_relator: self.nome_guerra_relator.trim().to_string(),
            numero_parte: self.numero_parte.trim().to_string(),
            tipo_servico: parse_optional_choice(
                "tipo_servico",
                &self.tipo_servico,
                SERVICE_TYPE_MESSAGE,
            )?,
            turno: parse_optional_choice("turno", &self.turno, SHIFT_MESSAGE)?,
            graduacao_antecessor: self.graduacao_antecessor.trim().to_string(),
            nome_guerra_antecessor: self.nome_guerra_antecessor.trim().to_string(),
            graduacao_sucessor: self.graduacao_sucessor.trim().to_string(),
            nome_guerra_sucessor: self.nome_guerra_sucessor.trim().to_string(),
            quarto_hora: self.quarto_hora.trim().to_string(),
            data_inicial: parse_date(
                "data_inicial",
                &self.data_inicial,
                "A data inicial é obrigatória.",
            )?,
            data_final: parse_date("data_final", &self.data_final, "A data final é obrigatória.")?,
            unidade: self.unidade.trim().to_string(),
            status: parse_optional_choice::<BookDayStatus>(
                "status",
                &self.status,
                "Status inválido.",
            )?,
        })
    }
}

impl OrderedFields for NewBookDayForm {
    const FIELD_ORDER: &'static [&'static str] = &[
        "nome_completo_relator",
        "rg_realtor",
        "graduacao_relator",
        "nome_guerra_relator",
        "numero_parte",
        "tipo_servico",
        "turno",
        "graduacao_antecessor",
        "nome_guerra_antecessor",
    ];
}
