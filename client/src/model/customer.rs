use super::catalog::id_from_string_or_number;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The authenticated user as returned by the auth endpoints and persisted with
/// the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub nome: String,
    pub email: String,
    #[serde(default)]
    pub telefone: String,
    #[serde(default)]
    pub role: String,
}

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, senha: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            senha: senha.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("senha", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /auth/register`.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct RegisterRequest {
    pub nome: String,
    pub cpf: String,
    pub email: String,
    pub telefone: String,
    pub senha: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("nome", &self.nome)
            .field("email", &self.email)
            .field("senha", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Response of both auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserView,
}

/// `GET /clientes/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPublic {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub nome: String,
}

/// `GET /clientes/{id}?view=details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefone: String,
    #[serde(default)]
    pub cpf: String,
}

/// Body of `PUT /clientes/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub nome: String,
    pub email: String,
    pub telefone: String,
}

impl From<&CustomerDetails> for CustomerUpdate {
    fn from(details: &CustomerDetails) -> Self {
        Self {
            nome: details.nome.clone(),
            email: details.email.clone(),
            telefone: details.telefone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;

    #[test]
    fn test_login_response_decodes_numeric_user_id() {
        let response: LoginResponse = assert_ok!(serde_json::from_str(
            r#"{"token":"t-1","user":{"id":42,"nome":"Maria","email":"m@x.com","telefone":"11","role":"CLIENTE"}}"#
        ));
        assert_eq!(response.user.id, "42");
        assert_eq!(response.token, "t-1");
    }

    #[test]
    fn test_password_is_redacted_in_debug() {
        let request = LoginRequest::new("m@x.com", "segredo");
        let rendered = format!("{request:?}");
        assert!(!rendered.contains("segredo"));
        assert!(rendered.contains("m@x.com"));
    }

    #[test]
    fn test_login_request_wire_names() {
        let value = assert_ok!(serde_json::to_value(LoginRequest::new("a@b.c", "pw")));
        assert_eq!(value["email"], "a@b.c");
        assert_eq!(value["senha"], "pw");
    }
}
