use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::dates::lenient_date;
use crate::domain::options::{ServiceType, Shift, lenient_option};
use crate::domain::reference::{Linked, lenient_text};
use crate::domain::types::RecordId;

/// Shift productivity report filed by the duty officer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Productivity {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub nome_completo: String,
    #[serde(default)]
    pub nome_oficial_dia: String,
    #[serde(default)]
    pub graduacao_oficial_dia: Linked,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rg: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub servico: Option<ServiceType>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub turno: Option<Shift>,
    #[serde(default)]
    pub hora_inicial: String,
    #[serde(default)]
    pub hora_final: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub data_inicial: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub data_final: Option<NaiveDate>,
    #[serde(default)]
    pub unidade: Linked,
    #[serde(default)]
    pub nome_comandante_btl: String,
    #[serde(default)]
    pub graduacao_comandante_btl: Linked,
    #[serde(default, rename = "nome_subComandante_btl")]
    pub nome_subcomandante_btl: String,
    #[serde(default, rename = "graduacao_subComandante_btl")]
    pub graduacao_subcomandante_btl: Linked,
    #[serde(default)]
    pub nome_comandante_coint: String,
    #[serde(default)]
    pub graduacao_comandante_coint: Linked,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewProductivity {
    pub nome_completo: String,
    pub nome_oficial_dia: String,
    pub graduacao_oficial_dia: String,
    pub rg: String,
    pub servico: ServiceType,
    pub turno: Shift,
    pub hora_inicial: String,
    pub hora_final: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unidade: Option<String>,
    pub data_inicial: NaiveDate,
    pub data_final: NaiveDate,
}

/// Scalar fields written back by the composite editor.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UpdateProductivity {
    pub nome_completo: String,
    pub nome_oficial_dia: String,
    pub graduacao_oficial_dia: String,
    pub rg: String,
    pub servico: ServiceType,
    pub turno: Shift,
    pub hora_inicial: String,
    pub hora_final: String,
    pub data_inicial: NaiveDate,
    pub data_final: NaiveDate,
    pub unidade: String,
    pub nome_comandante_btl: String,
    pub graduacao_comandante_btl: String,
    #[serde(rename = "nome_subComandante_btl")]
    pub nome_subcomandante_btl: String,
    #[serde(rename = "graduacao_subComandante_btl")]
    pub graduacao_subcomandante_btl: String,
    pub nome_comandante_coint: String,
    pub graduacao_comandante_coint: String,
}
