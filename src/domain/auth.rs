//! Signed-in user, typed capabilities and the screens they unlock.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::reference::{Linked, lenient_text};
use crate::domain::types::TypeConstraintError;

/// Capability granted through the permission names of an access profile.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Administration of every dashboard screen.
    ManageSystem,
}

impl Capability {
    pub const ALL: [Capability; 1] = [Capability::ManageSystem];

    /// Permission name carried by profiles.
    pub const fn as_str(self) -> &'static str {
        match self {
            Capability::ManageSystem => "sistema:gerenciar",
        }
    }
}

impl FromStr for Capability {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|capability| capability.as_str() == value)
            .ok_or_else(|| TypeConstraintError::UnknownOption(value.to_string()))
    }
}

/// Set of capabilities held by the signed-in user.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Capabilities(BTreeSet<Capability>);

impl Capabilities {
    /// Builds the set from raw permission names; names without a capability are ignored.
    pub fn from_permissions<S: AsRef<str>>(permissions: &[S]) -> Self {
        Self(
            permissions
                .iter()
                .filter_map(|name| name.as_ref().parse().ok())
                .collect(),
        )
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }
}

/// Dashboard screens reachable from the navigation menu.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    BookDay,
    Productivity,
    AccessControl,
    Assessments,
    People,
    Permissions,
    Profiles,
    Graduations,
    Situations,
    Units,
}

impl Screen {
    pub const ALL: [Screen; 11] = [
        Screen::Home,
        Screen::BookDay,
        Screen::Productivity,
        Screen::AccessControl,
        Screen::Assessments,
        Screen::People,
        Screen::Permissions,
        Screen::Profiles,
        Screen::Graduations,
        Screen::Situations,
        Screen::Units,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Screen::Home => "Início",
            Screen::BookDay => "Livro do Dia",
            Screen::Productivity => "Produtividade",
            Screen::AccessControl => "Controle de Acesso",
            Screen::Assessments => "Autuações",
            Screen::People => "Efetivo",
            Screen::Permissions => "Permissões",
            Screen::Profiles => "Funções",
            Screen::Graduations => "Postos/Graduações",
            Screen::Situations => "Situações",
            Screen::Units => "Unidades",
        }
    }

    pub const fn path(self) -> &'static str {
        match self {
            Screen::Home => "/home",
            Screen::BookDay => "/bookday",
            Screen::Productivity => "/productivity",
            Screen::AccessControl => "/records/access-control",
            Screen::Assessments => "/records/assessments",
            Screen::People => "/records/people",
            Screen::Permissions => "/records/permissions",
            Screen::Profiles => "/records/profiles",
            Screen::Graduations => "/records/graduations",
            Screen::Situations => "/records/situations",
            Screen::Units => "/records/units",
        }
    }

    /// Screens grouped under the "Sistema" submenu.
    pub const fn is_system(self) -> bool {
        matches!(
            self,
            Screen::Permissions
                | Screen::Profiles
                | Screen::Graduations
                | Screen::Situations
                | Screen::Units
        )
    }

    pub const fn required_capability(self) -> Option<Capability> {
        match self {
            Screen::Home => None,
            _ => Some(Capability::ManageSystem),
        }
    }
}

/// Access profile summary embedded in the signed-in user.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionProfile {
    #[serde(default)]
    pub name_profile: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Signed-in user as returned by the login endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub nome_guerra: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rg: String,
    #[serde(default)]
    pub graduacao: Linked,
    #[serde(default)]
    pub unidade: Linked,
    #[serde(default, deserialize_with = "expanded_profile")]
    pub perfil: SessionProfile,
}

impl SessionUser {
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::from_permissions(&self.perfil.permissions)
    }
}

/// Credentials exchanged for a bearer token.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Credentials {
    pub cpf: String,
    pub password: String,
}

/// Successful login response.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SignedIn {
    pub token: String,
    pub user: SessionUser,
}

/// Accepts the expanded profile object; a bare identifier carries no permissions.
fn expanded_profile<'de, D>(deserializer: D) -> Result<SessionProfile, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => {
            serde_json::from_value(value).map_err(serde::de::Error::custom)
        }
        _ => Ok(SessionProfile::default()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_permissions_are_ignored() {
        let capabilities =
            Capabilities::from_permissions(&["sistema:gerenciar", "efetivo:ler", "SISTEMA:GERENCIAR"]);
        assert!(capabilities.contains(Capability::ManageSystem));
        assert_eq!(capabilities.0.len(), 1);
    }

    #[test]
    fn permission_names_match_exactly() {
        let capabilities = Capabilities::from_permissions(&["SISTEMA:GERENCIAR", " sistema:gerenciar"]);
        assert!(!capabilities.contains(Capability::ManageSystem));
    }

    #[test]
    fn membership_is_exact() {
        let capabilities = Capabilities::from_permissions(&["sistema:*", "sistema"]);
        assert!(!capabilities.contains(Capability::ManageSystem));
    }

    #[test]
    fn session_user_reads_login_payload() {
        let user: SessionUser = serde_json::from_value(json!({
            "_id": "u1",
            "nome": "João da Silva",
            "nome_guerra": "Silva",
            "rg": 12345,
            "graduacao": { "_id": "g1", "sigla_graduation": "SGT" },
            "unidade": { "_id": "un1", "sigla_unity": "1º BPA" },
            "perfil": { "_id": "p1", "name_profile": "Admin", "permissions": ["sistema:gerenciar"] }
        }))
        .unwrap();
        assert_eq!(user.rg, "12345");
        assert_eq!(user.unidade.id, "un1");
        assert!(user.capabilities().contains(Capability::ManageSystem));
    }

    #[test]
    fn profile_identifier_grants_nothing() {
        let user: SessionUser =
            serde_json::from_value(json!({ "_id": "u1", "perfil": "p1" })).unwrap();
        assert_eq!(user.capabilities(), Capabilities::default());
    }

    #[test]
    fn home_needs_no_capability() {
        assert_eq!(Screen::Home.required_capability(), None);
        assert!(
            Screen::ALL
                .iter()
                .filter(|screen| **screen != Screen::Home)
                .all(|screen| screen.required_capability() == Some(Capability::ManageSystem))
        );
    }
}
