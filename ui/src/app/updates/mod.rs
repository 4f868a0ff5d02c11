//! Message handlers, one module per page or concern. Each extends
//! [`Model`](crate::app::model::Model) with the `update_*` entry points
//! called from the dispatcher.

use crate::error::{AppError, AppResult};
use client::common::ApiError;

pub mod auth;
pub mod booking;
pub mod catalog;
pub mod client_area;
pub mod home;
pub mod loading;
pub mod navigation;
pub mod popup;

/// Map a backend failure to the message the user sees. Cancelled calls
/// were abandoned on purpose and stay silent.
pub(crate) fn surface(error: ApiError, message: &str) -> AppResult<()> {
    if error.is_cancelled() {
        log::debug!("Call cancelled, nothing to report");
        return Ok(());
    }
    log::warn!("{message} ({error})");
    Err(AppError::Api(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;

    #[test]
    fn test_cancelled_calls_are_silent() {
        assert_ok!(surface(ApiError::Cancelled, "Falha ao carregar serviços."));
    }

    #[test]
    fn test_failures_carry_the_user_message() {
        let error = ApiError::Transport {
            url: "http://localhost:8080/servicos".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(
            assert_err!(surface(error, "Falha ao carregar serviços.")),
            AppError::Api("Falha ao carregar serviços.".to_string())
        );
    }
}
