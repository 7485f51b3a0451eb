use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::dates::lenient_date;
use crate::domain::options::{ActionType, AssessmentStatus, Operation, lenient_option};
use crate::domain::reference::lenient_text;
use crate::domain::types::RecordId;

/// Environmental citation (auto de infração) issued during an operation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Assessment {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_option")]
    pub operation: Option<Operation>,
    #[serde(default)]
    pub disk_report: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub latitude: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub longitude: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub number_assessment: String,
    #[serde(default)]
    pub term_seizure: String,
    #[serde(default)]
    pub term_embargo: String,
    #[serde(default)]
    pub term_realease: String,
    #[serde(default)]
    pub term_deposit: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub type_action: Option<ActionType>,
    #[serde(default)]
    pub number_document: String,
    #[serde(default)]
    pub inspection_agent: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub fine: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: String,
    #[serde(default)]
    pub number_process: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub status: Option<AssessmentStatus>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewAssessment {
    pub operation: Operation,
    pub disk_report: String,
    pub date: NaiveDate,
    pub latitude: String,
    pub longitude: String,
    pub city: String,
    pub location: String,
    pub number_assessment: String,
    pub term_seizure: String,
    pub term_embargo: String,
    pub term_realease: String,
    pub term_deposit: String,
    pub type_action: ActionType,
    pub number_document: String,
    pub inspection_agent: String,
    pub summary: String,
    pub fine: String,
    pub year: String,
    pub number_process: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssessmentStatus>,
}
