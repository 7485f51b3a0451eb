use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::dates::lenient_date;
use crate::domain::types::RecordId;

/// Visitor or vehicle entry at the battalion gate.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AccessControl {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub setor: String,
    #[serde(default)]
    pub tipo_veiculo: String,
    #[serde(default)]
    pub placa: String,
    #[serde(default)]
    pub obs: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub data_nascimento: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub data_entrada: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub data_saida: Option<NaiveDate>,
}

impl AccessControl {
    /// An entry stays open until an exit date is registered.
    pub fn is_open(&self) -> bool {
        self.data_saida.is_none()
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewAccessControl {
    pub nome: String,
    pub setor: String,
    pub tipo_veiculo: String,
    pub placa: String,
    pub obs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_nascimento: Option<NaiveDate>,
    pub data_entrada: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_saida: Option<NaiveDate>,
}
