//! Sign-in, sign-up and sign-out.
//!
//! Both auth endpoints answer with `{token, user}`, which is stored as the
//! session. Rejections surface the backend's own message.

use crate::api::backend::BarberShopBackend;
use crate::common::errors::ApiError;
use crate::model::{LoginRequest, RegisterRequest, UserView};
use crate::session::{SessionData, SessionError, SessionStore};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub const LOGIN_FAILED: &str = "Falha no login";
pub const REGISTER_FAILED: &str = "Falha no cadastro";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The backend refused the request; the payload is the message to show.
    #[error("{0}")]
    Rejected(String),

    #[error("Authenticated but the session could not be stored: {0}")]
    Session(#[from] SessionError),

    #[error("Authentication cancelled")]
    Cancelled,
}

impl AuthError {
    fn from_api(error: ApiError, fallback: &str) -> Self {
        if error.is_cancelled() {
            return AuthError::Cancelled;
        }
        let message = error.backend_message().unwrap_or(fallback).to_string();
        AuthError::Rejected(message)
    }
}

#[derive(Clone)]
pub struct AuthService {
    backend: Arc<dyn BarberShopBackend>,
    session: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(backend: Arc<dyn BarberShopBackend>, session: Arc<SessionStore>) -> Self {
        Self { backend, session }
    }

    pub async fn sign_in(
        &self,
        request: LoginRequest,
        cancel: &CancellationToken,
    ) -> Result<UserView, AuthError> {
        log::info!("Signing in {}", request.email);
        let response = self
            .backend
            .login(&request, cancel)
            .await
            .map_err(|e| AuthError::from_api(e, LOGIN_FAILED))?;
        self.establish(response.token, response.user)
    }

    pub async fn sign_up(
        &self,
        request: RegisterRequest,
        cancel: &CancellationToken,
    ) -> Result<UserView, AuthError> {
        log::info!("Registering {}", request.email);
        let response = self
            .backend
            .register(&request, cancel)
            .await
            .map_err(|e| AuthError::from_api(e, REGISTER_FAILED))?;
        self.establish(response.token, response.user)
    }

    pub fn sign_out(&self) -> Result<(), AuthError> {
        log::info!("Signing out");
        self.session.clear()?;
        Ok(())
    }

    fn establish(&self, token: String, user: UserView) -> Result<UserView, AuthError> {
        self.session.save(SessionData {
            token,
            user: user.clone(),
        })?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(body: &str) -> ApiError {
        ApiError::Status {
            method: "POST".to_string(),
            url: "http://localhost:8080/auth/login".to_string(),
            status: 401,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_backend_message_wins_over_fallback() {
        assert_eq!(
            AuthError::from_api(status("Credenciais inválidas"), LOGIN_FAILED),
            AuthError::Rejected("Credenciais inválidas".to_string())
        );
    }

    #[test]
    fn test_empty_body_uses_fallback() {
        assert_eq!(
            AuthError::from_api(status(""), REGISTER_FAILED),
            AuthError::Rejected(REGISTER_FAILED.to_string())
        );
        assert_eq!(
            AuthError::from_api(
                ApiError::Transport {
                    url: "u".to_string(),
                    reason: "refused".to_string()
                },
                LOGIN_FAILED
            ),
            AuthError::Rejected(LOGIN_FAILED.to_string())
        );
    }

    #[test]
    fn test_cancellation_is_not_a_rejection() {
        assert_eq!(
            AuthError::from_api(ApiError::Cancelled, LOGIN_FAILED),
            AuthError::Cancelled
        );
    }
}
