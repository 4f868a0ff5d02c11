use claims::*;
use barberbook::app::task_manager::TaskManager;
use barberbook::components::common::{LoadingActivityMsg, PopupActivityMsg};
use barberbook::error::ErrorReporter;
use barberbook::{AppError, Msg};
use client::taskpool::TaskPool;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

mod helpers {
    use super::*;

    pub fn create_test_setup() -> (TaskManager, mpsc::Receiver<Msg>) {
        create_test_setup_with_timeout(Duration::from_secs(5))
    }

    pub fn create_test_setup_with_timeout(
        timeout: Duration,
    ) -> (TaskManager, mpsc::Receiver<Msg>) {
        let taskpool = Arc::new(TaskPool::new(4));
        let (tx, rx) = mpsc::channel();
        let error_reporter = ErrorReporter::new(tx.clone());
        let task_manager = TaskManager::new(taskpool, tx, error_reporter, timeout);
        (task_manager, rx)
    }

    pub fn collect_messages_with_timeout(
        rx: &mpsc::Receiver<Msg>,
        expected_count: usize,
        timeout_ms: u64,
    ) -> Vec<Msg> {
        let mut messages = Vec::new();
        let start = std::time::Instant::now();

        while messages.len() < expected_count && start.elapsed().as_millis() < timeout_ms as u128 {
            match rx.recv_timeout(Duration::from_millis(50)) {
                Ok(msg) => messages.push(msg),
                Err(mpsc::RecvTimeoutError::Timeout) => continue,
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }

        messages
    }

    pub fn assert_start_message(msg: &Msg, expected_text: &str) {
        assert_matches!(msg,
            Msg::LoadingActivity(LoadingActivityMsg::Start(text))
            if text == expected_text
        );
    }

    pub fn assert_stop_message(msg: &Msg) {
        assert_matches!(msg, Msg::LoadingActivity(LoadingActivityMsg::Stop));
    }
}

use helpers::*;

#[tokio::test(flavor = "multi_thread")]
async fn test_execute_success_complete_flow() {
    let (task_manager, rx) = create_test_setup();

    task_manager.execute("Carregando serviços...", async move {
        sleep(Duration::from_millis(10)).await;
        Ok::<i32, AppError>(42)
    });

    let messages = collect_messages_with_timeout(&rx, 2, 2000);

    assert_eq!(messages.len(), 2, "Expected Start then Stop");
    assert_start_message(&messages[0], "Carregando serviços...");
    assert_stop_message(&messages[1]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_execute_error_complete_flow() {
    let (task_manager, rx) = create_test_setup();

    task_manager.execute("Carregando barbeiros...", async move {
        sleep(Duration::from_millis(10)).await;
        Err::<(), AppError>(AppError::Api("Falha ao carregar barbeiros.".to_string()))
    });

    let messages = collect_messages_with_timeout(&rx, 3, 2000);

    assert_eq!(messages.len(), 3, "Expected Start, Stop and the error popup");
    assert_start_message(&messages[0], "Carregando barbeiros...");
    assert_stop_message(&messages[1]);
    assert_matches!(&messages[2],
        Msg::PopupActivity(PopupActivityMsg::ShowError(error))
        if error.message().contains("Falha ao carregar barbeiros.")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_multiple_concurrent_operations_complete_flow() {
    let (task_manager, rx) = create_test_setup();

    for (i, delay) in [20u64, 10, 30].into_iter().enumerate() {
        task_manager.execute(format!("Operação {}", i + 1), async move {
            sleep(Duration::from_millis(delay)).await;
            Ok::<u64, AppError>(delay)
        });
    }

    let messages = collect_messages_with_timeout(&rx, 6, 3000);
    assert_eq!(messages.len(), 6, "Expected messages from all 3 operations");

    let start_count = messages
        .iter()
        .filter(|msg| matches!(msg, Msg::LoadingActivity(LoadingActivityMsg::Start(_))))
        .count();
    let stop_count = messages
        .iter()
        .filter(|msg| matches!(msg, Msg::LoadingActivity(LoadingActivityMsg::Stop)))
        .count();

    assert_eq!(start_count, 3);
    assert_eq!(stop_count, 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_slow_operation_times_out() {
    let (task_manager, rx) = create_test_setup_with_timeout(Duration::from_millis(50));

    task_manager.execute("Aguardando...", async move {
        sleep(Duration::from_secs(5)).await;
        Ok::<(), AppError>(())
    });

    let messages = collect_messages_with_timeout(&rx, 3, 2000);

    assert_eq!(messages.len(), 3);
    assert_stop_message(&messages[1]);
    assert_matches!(&messages[2],
        Msg::PopupActivity(PopupActivityMsg::ShowError(AppError::Api(_)))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_restarting_a_cancellable_operation_cancels_the_older_run() {
    let (task_manager, rx) = create_test_setup();

    task_manager.execute_cancellable("load_services", "Primeira", |_token| async move {
        sleep(Duration::from_secs(5)).await;
        Err::<(), AppError>(AppError::Api("stale run".to_string()))
    });
    task_manager.execute_cancellable("load_services", "Segunda", |_token| async move {
        Ok::<(), AppError>(())
    });

    // Two starts and two stops well before the first run would finish
    let messages = collect_messages_with_timeout(&rx, 4, 2000);
    assert_eq!(messages.len(), 4);
    assert!(messages.iter().all(|msg| matches!(msg, Msg::LoadingActivity(_))));

    sleep(Duration::from_millis(50)).await;
    assert!(task_manager.get_active_operations().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cancel_operation_stops_the_task_quietly() {
    let (task_manager, rx) = create_test_setup();

    task_manager.execute_cancellable("load_profile", "Carregando seus dados...", |_token| async move {
        sleep(Duration::from_secs(5)).await;
        Err::<(), AppError>(AppError::Api("never reported".to_string()))
    });
    assert_eq!(task_manager.get_active_operations(), vec!["load_profile".to_string()]);

    task_manager.cancel_operation("load_profile");

    let messages = collect_messages_with_timeout(&rx, 3, 500);
    assert_eq!(messages.len(), 2, "Cancelled work must not raise an error");
    assert_start_message(&messages[0], "Carregando seus dados...");
    assert_stop_message(&messages[1]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_scoped_result_is_forwarded() {
    let (task_manager, rx) = create_test_setup();

    task_manager.execute_scoped(CancellationToken::new(), None, async move {
        Some(Msg::ForceRedraw)
    });

    let messages = collect_messages_with_timeout(&rx, 1, 2000);
    assert_eq!(messages, vec![Msg::ForceRedraw]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cancelled_scope_still_stops_the_loading_indicator() {
    let (task_manager, rx) = create_test_setup();
    let token = CancellationToken::new();

    task_manager.execute_scoped(
        token.clone(),
        Some("Confirmando agendamento...".to_string()),
        async move {
            sleep(Duration::from_secs(5)).await;
            Some(Msg::ForceRedraw)
        },
    );
    sleep(Duration::from_millis(20)).await;
    token.cancel();

    let messages = collect_messages_with_timeout(&rx, 3, 500);
    assert_eq!(messages.len(), 2, "The result of a cancelled scope is dropped");
    assert_start_message(&messages[0], "Confirmando agendamento...");
    assert_stop_message(&messages[1]);
}
