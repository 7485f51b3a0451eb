//! Closed option lists shared by every form and listing.
//!
//! Each enumeration carries the value exchanged with the backend and the label
//! rendered in select boxes.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::types::TypeConstraintError;

/// A value/label pair rendered as one `<option>` element.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

macro_rules! option_enum {
    ($name:ident, $doc:expr, { $($variant:ident => ($wire:expr, $label:expr)),+ $(,)? }) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value exchanged with the backend.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// Human readable label.
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Options for select boxes.
            pub fn options() -> Vec<SelectOption> {
                Self::ALL
                    .iter()
                    .map(|option| SelectOption::new(option.as_str(), option.label()))
                    .collect()
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let value = value.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.as_str() == value)
                    .ok_or_else(|| TypeConstraintError::UnknownOption(value.to_string()))
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

/// Deserializes an optional option value, treating blanks and unknown values as absent.
pub fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

option_enum!(BookDayStatus, "Lifecycle of a duty log.", {
    Open => ("open", "ABERTO"),
    Closed => ("closed", "FECHADO"),
});

option_enum!(ServiceType, "Kind of duty being reported.", {
    DutyInspector => ("FISCAL DE DIA", "FISCAL DE DIA"),
    DutyOfficer => ("OFICIAL DE DIA", "OFICIAL DE DIA"),
    Supervision => ("SUPERVISÃO", "SUPERVISÃO"),
});

option_enum!(Shift, "Shift covered by a report.", {
    First => ("1º TURNO", "1º Turno"),
    Second => ("2º TURNO", "2º Turno"),
    FullDay => ("24H DE SERVICO", "24h de serviço"),
});

option_enum!(GraduationGroup, "Career track a rank belongs to.", {
    Qopm => ("QOPM", "QOPM"),
    Qoapm => ("QOAPM", "QOAPM"),
    Qpmp => ("QPMP", "QPMP"),
});

option_enum!(UnitLevel, "Hierarchical level of a unit.", {
    Coint => ("coint", "COINT"),
    Battalion => ("btl", "Batalhão"),
    Company => ("cia", "Companhia"),
});

option_enum!(SituationGroup, "Group of an officer situation.", {
    Active => ("Ativo", "Ativo"),
    Inactive => ("Inativo", "Inativo"),
    Recalled => ("Reconvocado", "Reconvocado"),
});

option_enum!(ProfileLevel, "Command level of an access profile.", {
    Commander => ("cmt", "Comandante"),
    SubCommander => ("subcmt", "Subcomandante"),
    Regular => ("normal", "Normal"),
});

option_enum!(PermissionGroup, "Area of the dashboard a permission belongs to.", {
    System => ("sistema", "Sistema"),
    People => ("efetivo", "Efetivo"),
    BookDay => ("livro_dia", "Livro do dia"),
    ForceMap => ("mapa_força", "Mapa força"),
    Productivity => ("produtividade", "Produtividade"),
    AccessControl => ("controle_acesso", "Controle de acesso"),
    Assessments => ("autuações", "Autuações"),
});

option_enum!(Operation, "Enforcement operation a citation was issued under.", {
    Acua => ("OPERAÇÃO ACUÁ", "OPERAÇÃO ACUÁ"),
    Apoema => ("OPERAÇÃO APOEMA", "OPERAÇÃO APOEMA"),
    Curupira => ("OPERAÇÃO CURUPIRA", "OPERAÇÃO CURUPIRA"),
    AntonioLemos => ("OPERAÇÃO ANTONIO LEMOS", "OPERAÇÃO ANTONIO LEMOS"),
    ArcoDeFogo => ("OPERAÇÃO ARCO DE FOGO", "OPERAÇÃO ARCO DE FOGO"),
    AmazoniaViva => ("OPERAÇÃO AMAZÔNIA VIVA", "OPERAÇÃO AMAZÔNIA VIVA"),
    Tabuleiro => ("OPERAÇÃO TABULEIRO", "OPERAÇÃO TABULEIRO"),
});

option_enum!(ActionType, "How a citation originated.", {
    InspectionOrder => ("ORDEM DE FISCALIZAÇÃO", "ORDEM DE FISCALIZAÇÃO"),
    Flagrant => ("FLAGRANTE", "FLAGRANTE"),
});

option_enum!(AssessmentStatus, "Whether a citation is still in force.", {
    Active => ("ativo", "Ativo"),
    Voided => ("anulado", "Anulado"),
});

option_enum!(Sex, "Officer sex as registered.", {
    Male => ("M", "Masculino"),
    Female => ("F", "Feminino"),
});

option_enum!(PersonStatus, "Whether an officer account is enabled.", {
    Active => ("ativo", "Ativo"),
    Inactive => ("inativo", "Inativo"),
});
