//! Forms opening a productivity report and editing it in the composite editor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::auth::SessionUser;
use crate::domain::options::{ServiceType, Shift};
use crate::domain::productivity::{NewProductivity, Productivity, UpdateProductivity};
use crate::forms::{FormError, OrderedFields, check_required, date_input, parse_choice, parse_date};

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
pub struct NewProductivityForm {
    #[serde(default)]
    #[validate(length(min = 3, message = "Nome do oficial de dia é obrigatório"))]
    pub nome_oficial_dia: String,
    #[serde(default)]
    #[validate(length(min = 3, message = "Nome completo é obrigatório"))]
    pub nome_completo: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Graduação do oficial de dia é obrigatória"))]
    pub graduacao_oficial_dia: String,
    #[serde(default)]
    #[validate(length(min = 5, message = "RG obrigatório"))]
    pub rg: String,
    #[serde(default)]
    #[validate(length(min = 3, message = "Turno é obrigatório"))]
    pub turno: String,
    #[serde(default)]
    #[validate(length(min = 3, message = "Serviço é obrigatório"))]
    pub servico: String,
    #[serde(default)]
    #[validate(length(min = 3, message = "Hora inicial é obrigatória"))]
    pub hora_inicial: String,
    #[serde(default)]
    #[validate(length(min = 3, message = "Hora final é obrigatória"))]
    pub hora_final: String,
    #[serde(default)]
    pub data_inicial: String,
    #[serde(default)]
    pub data_final: String,
}

impl NewProductivityForm {
    pub fn prefilled(user: &SessionUser, today: NaiveDate) -> Self {
        Self {
            nome_oficial_dia: user.nome_guerra.clone(),
            nome_completo: user.nome.clone(),
            graduacao_oficial_dia: user.graduacao.id.clone(),
            rg: user.rg.clone(),
            data_inicial: date_input(Some(today)),
            data_final: date_input(Some(today)),
            ..Self::default()
        }
    }

    /// Validates the form; blank dates default to today.
    pub fn into_domain(
        self,
        unidade: Option<String>,
        today: NaiveDate,
    ) -> Result<NewProductivity, FormError> {
        let form = self.trimmed();
        form.validate_in_order()?;

        let data_inicial = optional_date("data_inicial", &form.data_inicial, today)?;
        let data_final = optional_date("data_final", &form.data_final, data_inicial)?;
        if data_final < data_inicial {
            return Err(FormError::invalid(
                "data_final",
                "A data final não pode ser anterior à data inicial.",
            ));
        }

        Ok(NewProductivity {
            servico: parse_choice::<ServiceType>("servico", &form.servico, "Serviço inválido.")?,
            turno: parse_choice::<Shift>("turno", &form.turno, "Turno inválido.")?,
            nome_completo: form.nome_completo,
            nome_oficial_dia: form.nome_oficial_dia,
            graduacao_oficial_dia: form.graduacao_oficial_dia,
            rg: form.rg,
            hora_inicial: form.hora_inicial,
            hora_final: form.hora_final,
            unidade: unidade.filter(|unit| !unit.trim().is_empty()),
            data_inicial,
            data_final,
        })
    }

    fn trimmed(self) -> Self {
        Self {
            nome_oficial_dia: self.nome_oficial_dia.trim().to_string(),
            nome_completo: self.nome_completo.trim().to_string(),
            graduacao_oficial_dia: self.graduacao_oficial_dia.trim().to_string(),
            rg: self.rg.trim().to_string(),
            turno: self.turno.trim().to_string(),
            servico: self.servico.trim().to_string(),
            hora_inicial: self.hora_inicial.trim().to_string(),
            hora_final: self.hora_final.trim().to_string(),
            data_inicial: self.data_inicial.trim().to_string(),
            data_final: self.data_final.trim().to_string(),
        }
    }
}

fn optional_date(
    field: &'static str,
    value: &str,
    fallback: NaiveDate,
) -> Result<NaiveDate, FormError> {
    if value.is_empty() {
        Ok(fallback)
    } else {
        parse_date(field, value, "Data inválida.")
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
/// Scalar fields of a productivity report as edited in the composite editor.
pub struct ProductivityEditorForm {
    #[serde(default)]
    pub nome_completo: String,
    #[serde(default)]
    pub nome_oficial_dia: String,
    #[serde(default)]
    pub graduacao_oficial_dia: String,
    #[serde(default)]
    pub rg: String,
    #[serde(default)]
    pub servico: String,
    #[serde(default)]
    pub turno: String,
    #[serde(default)]
    pub hora_inicial: String,
    #[serde(default)]
    pub hora_final: String,
    #[serde(default)]
    pub data_inicial: String,
    #[serde(default)]
    pub data_final: String,
    #[serde(default)]
    pub unidade: String,
    #[serde(default)]
    pub nome_comandante_btl: String,
    #[serde(default)]
    pub graduacao_comandante_btl: String,
    #[serde(default)]
    pub nome_subcomandante_btl: String,
    #[serde(default)]
    pub graduacao_subcomandante_btl: String,
    #[serde(default)]
    pub nome_comandante_coint: String,
    #[serde(default)]
    pub graduacao_comandante_coint: String,
}

impl From<&Productivity> for ProductivityEditorForm {
    fn from(report: &Productivity) -> Self {
        Self {
            nome_completo: report.nome_completo.clone(),
            nome_oficial_dia: report.nome_oficial_dia.clone(),
            graduacao_oficial_dia: report.graduacao_oficial_dia.id.clone(),
            rg: report.rg.clone(),
            servico: report
                .servico
                .map(|value| value.as_str().to_string())
                .unwrap_or_default(),
            turno: report
                .turno
                .map(|value| value.as_str().to_string())
                .unwrap_or_default(),
            hora_inicial: report.hora_inicial.clone(),
            hora_final: report.hora_final.clone(),
            data_inicial: date_input(report.data_inicial),
            data_final: date_input(report.data_final),
            unidade: report.unidade.id.clone(),
            nome_comandante_btl: report.nome_comandante_btl.clone(),
            graduacao_comandante_btl: report.graduacao_comandante_btl.id.clone(),
            nome_subcomandante_btl: report.nome_subcomandante_btl.clone(),
            graduacao_subcomandante_btl: report.graduacao_subcomandante_btl.id.clone(),
            nome_comandante_coint: report.nome_comandante_coint.clone(),
            graduacao_comandante_coint: report.graduacao_comandante_coint.id.clone(),
        }
    }
}

impl ProductivityEditorForm {
    /// Required scalar fields in the order they are reported.
    pub fn check_required(&self) -> Result<(), FormError> {
        check_required(&[
            ("nome_completo", &self.nome_completo, "O nome completo é obrigatório."),
            (
                "nome_oficial_dia",
                &self.nome_oficial_dia,
                "O nome do oficial de dia é obrigatório.",
            ),
            ("rg", &self.rg, "O RG é obrigatório."),
            (
                "graduacao_oficial_dia",
                &self.graduacao_oficial_dia,
                "A graduação é obrigatória.",
            ),
            ("data_inicial", &self.data_inicial, "A data inicial é obrigatória."),
            ("data_final", &self.data_final, "A data final é obrigatória."),
            ("servico", &self.servico, "O tipo de serviço é obrigatório."),
            ("turno", &self.turno, "O turno de serviço é obrigatório."),
        ])
    }

    pub fn to_update(&self) -> Result<UpdateProductivity, FormError> {
        self.check_required()?;

        Ok(UpdateProductivity {
            nome_completo: self.nome_completo.trim().to_string(),
            nome_oficial_dia: self.nome_oficial_dia.trim().to_string(),
            graduacao_oficial_dia: self.graduacao_oficial_dia.trim().to_string(),
            rg: self.rg.trim().to_string(),
            servico: parse_choice("servico", &self.servico, "Serviço inválido.")?,
            turno: parse_choice("turno", &self.turno, "Turno inválido.")?,
            hora_inicial: self.hora_inicial.trim().to_string(),
            hora_final: self.hora_final.trim().to_string(),
            data_inicial: parse_date(
                "data_inicial",
                &self.data_inicial,
                "A data inicial é obrigatória.",
            )?,
            data_final: parse_date("data_final", &self.data_final, "A data final é obrigatória.")?,
            unidade: self.unidade.trim().to_string(),
            nome_comandante_btl: self.nome_comandante_btl.trim().to_string(),
            graduacao_comandante_btl: self.graduacao_comandante_btl.trim().to_string(),
            nome_subcomandante_btl: self.nome_subcomandante_btl.trim().to_string(),
            graduacao_subcomandante_btl: self.graduacao_subcomandante_btl.trim().to_string(),
            nome_comandante_coint: self.nome_comandante_coint.trim().to_string(),
            graduacao_comandante_coint: self.graduacao_comandante_coint.trim().to_string(),
        })
    }
}

impl OrderedFields for NewProductivityForm {
    const FIELD_ORDER: &'static [&'static str] = &[
        "nome_oficial_dia",
        "nome_completo",
        "graduacao_oficial_dia",
        "rg",
        "turno",
        "servico",
        "hora_inicial",
        "hora_final",
    ];
}
