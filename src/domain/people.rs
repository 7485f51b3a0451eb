use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::dates::lenient_date;
use crate::domain::options::{PersonStatus, Sex, lenient_option};
use crate::domain::reference::{Linked, lenient_text};
use crate::domain::types::RecordId;

/// Officer registered in the battalion roster.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Person {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub nome_guerra: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rg: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cpf: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub telefone: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub sexo: Option<Sex>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub data_nascimento: Option<NaiveDate>,
    #[serde(default)]
    pub graduacao: Linked,
    #[serde(default)]
    pub unidade: Linked,
    #[serde(default)]
    pub situacao: Linked,
    #[serde(default)]
    pub perfil: Linked,
    #[serde(default, deserialize_with = "lenient_option")]
    pub status: Option<PersonStatus>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewPerson {
    pub nome: String,
    pub nome_guerra: String,
    pub email: String,
    pub rg: String,
    pub cpf: String,
    pub telefone: String,
    pub sexo: Sex,
    pub data_nascimento: NaiveDate,
    pub graduacao: String,
    pub unidade: String,
    pub situacao: String,
    pub perfil: String,
    pub status: PersonStatus,
    /// Initial password; the CPF when none was chosen at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
}
