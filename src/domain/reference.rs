//! Lookup tables referenced by the other records: ranks, units, situations,
//! access profiles and permissions.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::domain::options::{
    GraduationGroup, PermissionGroup, ProfileLevel, SituationGroup, UnitLevel, lenient_option,
};
use crate::domain::types::RecordId;

/// Keys holding a human readable label inside an expanded reference object.
const LABEL_KEYS: [&str; 6] = [
    "sigla_graduation",
    "sigla_unity",
    "name_situation",
    "name_profile",
    "name_graduation",
    "name_unity",
];

/// Reference to another record.
///
/// The backend sends either the bare identifier or the expanded object; both
/// are accepted and the identifier is what gets written back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Linked {
    pub id: String,
    pub label: Option<String>,
}

impl Linked {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.trim().is_empty()
    }

    /// The label when the backend expanded the reference, the identifier otherwise.
    pub fn display(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

impl Serialize for Linked {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id)
    }
}

impl<'de> Deserialize<'de> for Linked {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Linked::default()),
            Value::String(id) => Ok(Linked::new(id)),
            Value::Object(map) => {
                let id = map
                    .get("_id")
                    .and_then(Value::as_str)
                    .ok_or_else(|| D::Error::missing_field("_id"))?
                    .to_string();
                let label = LABEL_KEYS
                    .iter()
                    .find_map(|key| map.get(*key).and_then(Value::as_str))
                    .map(str::to_string);
                Ok(Linked { id, label })
            }
            other => Err(D::Error::custom(format!("unexpected reference: {other}"))),
        }
    }
}

/// Deserializes strings, numbers and booleans into text; `null` becomes empty.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        Value::Bool(value) => Ok(value.to_string()),
        other => Err(D::Error::custom(format!("expected text, got {other}"))),
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Graduation {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub name_graduation: String,
    #[serde(default)]
    pub sigla_graduation: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub level: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub group: Option<GraduationGroup>,
}

impl Graduation {
    /// Label used by rank selectors: abbreviation followed by the career track.
    pub fn select_label(&self) -> String {
        match self.group {
            Some(group) => format!("{} - {}", self.sigla_graduation, group.as_str()),
            None => self.sigla_graduation.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct NewGraduation {
    pub name_graduation: String,
    pub sigla_graduation: String,
    pub level: String,
    pub group: GraduationGroup,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Unit {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub name_unity: String,
    #[serde(default)]
    pub sigla_unity: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub level: Option<UnitLevel>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewUnit {
    pub name_unity: String,
    pub sigla_unity: String,
    pub level: UnitLevel,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Situation {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub name_situation: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub group: Option<SituationGroup>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewSituation {
    pub name_situation: String,
    pub group: SituationGroup,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub name_profile: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub level: Option<ProfileLevel>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewProfile {
    pub name_profile: String,
    pub level: ProfileLevel,
    pub permissions: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Permission {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub group: Option<PermissionGroup>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewPermission {
    pub name: String,
    pub group: PermissionGroup,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default)]
        graduacao: Linked,
    }

    #[test]
    fn linked_accepts_bare_identifier() {
        let holder: Holder = serde_json::from_value(json!({ "graduacao": "g1" })).unwrap();
        assert_eq!(holder.graduacao, Linked::new("g1"));
    }

    #[test]
    fn linked_accepts_expanded_object() {
        let holder: Holder = serde_json::from_value(json!({
            "graduacao": { "_id": "g1", "name_graduation": "Sargento", "sigla_graduation": "SGT", "group": "QPMP" }
        }))
        .unwrap();
        assert_eq!(holder.graduacao.id, "g1");
        assert_eq!(holder.graduacao.display(), "SGT");
    }

    #[test]
    fn linked_serializes_identifier_only() {
        let linked = Linked {
            id: "u1".to_string(),
            label: Some("1º BPA".to_string()),
        };
        assert_eq!(serde_json::to_value(&linked).unwrap(), json!("u1"));
    }

    #[test]
    fn missing_or_null_reference_is_empty() {
        let holder: Holder = serde_json::from_value(json!({ "graduacao": null })).unwrap();
        assert!(holder.graduacao.is_empty());
        let holder: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(holder.graduacao.is_empty());
    }

    #[test]
    fn graduation_tolerates_numeric_level_and_unknown_group() {
        let graduation: Graduation = serde_json::from_value(json!({
            "_id": "g1", "name_graduation": "Cabo", "sigla_graduation": "CB", "level": 7, "group": "?"
        }))
        .unwrap();
        assert_eq!(graduation.level, "7");
        assert_eq!(graduation.group, None);
        assert_eq!(graduation.select_label(), "CB");
    }
}
