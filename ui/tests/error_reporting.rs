use barberbook::components::common::{Msg, PopupActivityMsg};
use barberbook::error::{ErrorContext, ErrorReporter};
use barberbook::AppError;
use claims::*;
use std::sync::mpsc;

mod helpers {
    use super::*;

    pub fn reporter() -> (ErrorReporter, mpsc::Receiver<Msg>) {
        let (tx, rx) = mpsc::channel();
        (ErrorReporter::new(tx), rx)
    }
}

use helpers::*;

#[test]
fn test_errors_become_error_popups() {
    let (reporter, rx) = reporter();

    reporter.report_simple(
        AppError::Api("Falha ao carregar serviços.".to_string()),
        "Catalog",
        "load_services",
    );

    assert_matches!(
        assert_ok!(rx.try_recv()),
        Msg::PopupActivity(PopupActivityMsg::ShowError(AppError::Api(text)))
        if text.contains("Falha ao carregar serviços.")
    );
}

#[test]
fn test_warnings_become_warning_popups() {
    let (reporter, rx) = reporter();

    reporter.report_warning(
        AppError::Auth("Não foi possível salvar o histórico.".to_string()),
        "BookingHistory",
        "record",
    );

    assert_matches!(
        assert_ok!(rx.try_recv()),
        Msg::PopupActivity(PopupActivityMsg::ShowWarning(text))
        if text.contains("Não foi possível salvar o histórico.")
    );
}

#[test]
fn test_context_message_replaces_the_raw_error() {
    let (reporter, rx) = reporter();

    reporter.report(
        AppError::Channel("receiver dropped".to_string()),
        ErrorContext::new("TaskManager", "send").with_message("A tela parou de responder."),
    );

    let Msg::PopupActivity(PopupActivityMsg::ShowError(error)) = assert_ok!(rx.try_recv()) else {
        panic!("expected an error popup");
    };
    assert!(error.message().contains("A tela parou de responder."));
}

#[test]
fn test_closed_channel_does_not_panic() {
    let (reporter, rx) = reporter();
    drop(rx);
    reporter.report_error(AppError::State("sem tela".to_string()));
}
