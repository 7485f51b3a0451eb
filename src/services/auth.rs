use crate::domain::auth::{Credentials, SignedIn};
use crate::forms::auth::SignInForm;
use crate::repository::AuthGateway;
use crate::services::{ServiceError, ServiceResult};

pub const SIGN_IN_SUCCESS: &str = "Login realizado com sucesso!";
pub const SIGN_IN_FAILED: &str = "Erro ao fazer login, tente novamente mais tarde.";
pub const SIGN_OUT_SUCCESS: &str = "Logout realizado com sucesso!";

/// Checks the credentials locally and exchanges them for a token.
pub fn sign_in<R>(repo: &R, form: SignInForm) -> ServiceResult<SignedIn>
where
    R: AuthGateway + ?Sized,
{
    let credentials = Credentials::try_from(form)?;

    repo.sign_in(&credentials).map_err(|err| {
        log::error!("Failed to sign in: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::manager;

    #[test]
    fn blank_password_never_reaches_backend() {
        let mut repo = MockRepository::new();
        repo.expect_sign_in().never();

        let form = SignInForm {
            cpf: "12345678901".into(),
            password: String::new(),
        };
        let err = sign_in(&repo, form).unwrap_err();
        assert_eq!(err.notification(SIGN_IN_FAILED), "Digite a sua senha.");
    }

    #[test]
    fn returns_token_and_user() {
        let mut repo = MockRepository::new();
        repo.expect_sign_in()
            .withf(|credentials| credentials.cpf == "12345678901")
            .times(1)
            .returning(|_| {
                Ok(SignedIn {
                    token: "abc".into(),
                    user: manager(),
                })
            });

        let form = SignInForm {
            cpf: "12345678901".into(),
            password: "secret".into(),
        };
        let signed_in = sign_in(&repo, form).unwrap();
        assert_eq!(signed_in.token, "abc");
        assert_eq!(signed_in.user.nome_guerra, "Silva");
    }

    #[test]
    fn rejected_credentials_surface_as_backend_error() {
        let mut repo = MockRepository::new();
        repo.expect_sign_in()
            .returning(|_| Err(RepositoryError::Backend("Usuário ou senha inválidos".into())));

        let form = SignInForm {
            cpf: "12345678901".into(),
            password: "wrong".into(),
        };
        assert!(matches!(sign_in(&repo, form), Err(ServiceError::Backend(_))));
    }
}
