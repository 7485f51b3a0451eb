use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::dates::lenient_date;
use crate::domain::options::{BookDayStatus, ServiceType, Shift, lenient_option};
use crate::domain::reference::{Linked, lenient_text};
use crate::domain::types::RecordId;

/// Duty log written by the officer on duty and handed over to the successor.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BookDay {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub nome_completo_relator: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rg_realtor: String,
    #[serde(default)]
    pub graduacao_relator: Linked,
    #[serde(default)]
    pub nome_guerra_relator: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub numero_parte: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub tipo_servico: Option<ServiceType>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub turno: Option<Shift>,
    #[serde(default)]
    pub graduacao_antecessor: Linked,
    #[serde(default)]
    pub nome_guerra_antecessor: String,
    #[serde(default)]
    pub graduacao_sucessor: Linked,
    #[serde(default)]
    pub nome_guerra_sucessor: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub quarto_hora: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub data_inicial: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub data_final: Option<NaiveDate>,
    #[serde(default)]
    pub unidade: Linked,
    #[serde(default, deserialize_with = "lenient_option")]
    pub status: Option<BookDayStatus>,
}

impl BookDay {
    /// A log is closed once the backend marked it so.
    pub fn is_closed(&self) -> bool {
        self.status == Some(BookDayStatus::Closed)
    }
}

/// Opening data of a new duty log.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewBookDay {
    pub nome_completo_relator: String,
    pub rg_realtor: String,
    pub graduacao_relator: String,
    pub nome_guerra_relator: String,
    pub numero_parte: String,
    pub tipo_servico: ServiceType,
    pub turno: Shift,
    pub graduacao_antecessor: String,
    pub nome_guerra_antecessor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unidade: Option<String>,
    pub data_inicial: NaiveDate,
}

/// Scalar fields written back by the composite editor.
///
/// Child collections are never part of this payload.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UpdateBookDay {
    pub nome_completo_relator: String,
    pub rg_realtor: String,
    pub graduacao_relator: String,
    pub nome_guerra_relator: String,
    pub numero_parte: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_servico: Option<ServiceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turno: Option<Shift>,
    pub graduacao_antecessor: String,
    pub nome_guerra_antecessor: String,
    pub graduacao_sucessor: String,
    pub nome_guerra_sucessor: String,
    pub quarto_hora: String,
    pub data_inicial: NaiveDate,
    pub data_final: NaiveDate,
    pub unidade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookDayStatus>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_list_variant_with_expanded_references() {
        let book_day: BookDay = serde_json::from_value(json!({
            "_id": "P1",
            "nome_completo_relator": "João da Silva",
            "rg_realtor": 12345,
            "graduacao_relator": { "_id": "g1", "sigla_graduation": "SGT", "group": "QPMP" },
            "nome_guerra_relator": "Silva",
            "numero_parte": "10",
            "tipo_servico": "FISCAL DE DIA",
            "turno": "1º TURNO",
            "data_inicial": "2025-10-23T03:00:00.000Z",
            "data_final": null,
            "unidade": { "_id": "u1", "sigla_unity": "1º BPA" },
            "status": "open"
        }))
        .unwrap();

        assert_eq!(book_day.id.as_str(), "P1");
        assert_eq!(book_day.rg_realtor, "12345");
        assert_eq!(book_day.graduacao_relator.display(), "SGT");
        assert_eq!(book_day.tipo_servico, Some(ServiceType::DutyInspector));
        assert_eq!(book_day.data_inicial, NaiveDate::from_ymd_opt(2025, 10, 23));
        assert_eq!(book_day.data_final, None);
        assert!(book_day.graduacao_sucessor.is_empty());
        assert!(!book_day.is_closed());
    }

    #[test]
    fn new_book_day_sends_plain_date() {
        let payload = NewBookDay {
            nome_completo_relator: "João da Silva".into(),
            rg_realtor: "12345".into(),
            graduacao_relator: "g1".into(),
            nome_guerra_relator: "Silva".into(),
            numero_parte: "10".into(),
            tipo_servico: ServiceType::DutyOfficer,
            turno: Shift::FullDay,
            graduacao_antecessor: "g2".into(),
            nome_guerra_antecessor: "Souza".into(),
            unidade: None,
            data_inicial: NaiveDate::from_ymd_opt(2025, 10, 23).unwrap(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["data_inicial"], "2025-10-23");
        assert_eq!(value["turno"], "24H DE SERVICO");
        assert!(value.get("unidade").is_none());
    }
}
