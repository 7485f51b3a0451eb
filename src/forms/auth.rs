use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::auth::Credentials;
use crate::forms::{FormError, OrderedFields};

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
/// Sign-in credentials typed by the officer.
pub struct SignInForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Digite o seu CPF."))]
    pub cpf: String,
    #[serde(default, skip_serializing)]
    #[validate(length(min = 1, message = "Digite a sua senha."))]
    pub password: String,
}

impl TryFrom<SignInForm> for Credentials {
    type Error = FormError;

    fn try_from(mut form: SignInForm) -> Result<Self, Self::Error> {
        form.cpf = form.cpf.trim().to_string();
        form.validate_in_order()?;
        Ok(Credentials {
            cpf: form.cpf,
            password: form.password,
        })
    }
}

impl OrderedFields for SignInForm {
    const FIELD_ORDER: &'static [&'static str] = &[
        "cpf",
        "password",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cpf_is_rejected() {
        let form = SignInForm {
            cpf: "   ".into(),
            password: "secret".into(),
        };
        let err = Credentials::try_from(form).unwrap_err();
        assert_eq!(err.message(), "Digite o seu CPF.");
    }

    #[test]
    fn blank_password_is_rejected() {
        let form = SignInForm {
            cpf: "12345678901".into(),
            password: String::new(),
        };
        let err = Credentials::try_from(form).unwrap_err();
        assert_eq!(err.message(), "Digite a sua senha.");
    }

    #[test]
    fn trims_cpf() {
        let form = SignInForm {
            cpf: " 12345678901 ".into(),
            password: "secret".into(),
        };
        let credentials = Credentials::try_from(form).unwrap();
        assert_eq!(credentials.cpf, "12345678901");
    }
}
