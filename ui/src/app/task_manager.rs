use crate::components::common::{LoadingActivityMsg, Msg};
use crate::error::{AppError, ErrorContext, ErrorReporter};
use client::taskpool::TaskPool;
use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::mpsc::Sender;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Runs backend work on the task pool and reports back to the UI loop.
///
/// Every variant keeps the loading indicator balanced (one `Stop` per
/// `Start`) and routes failures through the [`ErrorReporter`]. Errors are
/// expected to carry the user-facing text already.
#[derive(Clone)]
pub struct TaskManager {
    taskpool: Arc<TaskPool>,
    tx_to_main: Sender<Msg>,
    error_reporter: ErrorReporter,
    timeout: Duration,
    active_operations: Arc<Mutex<HashMap<String, (u64, CancellationToken)>>>,
    next_operation: Arc<AtomicU64>,
}

impl TaskManager {
    pub fn new(
        taskpool: Arc<TaskPool>,
        tx_to_main: Sender<Msg>,
        error_reporter: ErrorReporter,
        timeout: Duration,
    ) -> Self {
        Self {
            taskpool,
            tx_to_main,
            error_reporter,
            timeout,
            active_operations: Arc::new(Mutex::new(HashMap::new())),
            next_operation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn sender(&self) -> Sender<Msg> {
        self.tx_to_main.clone()
    }

    /// Run `operation` behind the loading indicator.
    pub fn execute<F, R>(&self, loading_message: impl Display, operation: F)
    where
        F: Future<Output = Result<R, AppError>> + Send + 'static,
        R: Send + 'static,
    {
        self.start_loading(loading_message);

        let tx_to_main = self.tx_to_main.clone();
        let error_reporter = self.error_reporter.clone();
        let timeout = self.timeout;

        self.taskpool.execute(async move {
            let result = Self::with_timeout(timeout, operation).await;

            Self::send_message_or_report_error(
                &tx_to_main,
                Msg::LoadingActivity(LoadingActivityMsg::Stop),
                "loading stop",
                &error_reporter,
            );

            if let Err(error) = result {
                Self::report(&error_reporter, error, "async_operation");
            }
        });
    }

    /// Run `operation` without any loading indicator.
    pub fn execute_background<F, R>(&self, operation: F)
    where
        F: Future<Output = Result<R, AppError>> + Send + 'static,
        R: Send + 'static,
    {
        let error_reporter = self.error_reporter.clone();
        let timeout = self.timeout;
        self.taskpool.execute(async move {
            if let Err(error) = Self::with_timeout(timeout, operation).await {
                Self::report(&error_reporter, error, "async_operation_bg");
            }
        });
    }

    /// Run `operation` under `token`; its message, if any, is sent to the
    /// UI loop. Cancelling the token drops the task even while it waits for
    /// a pool slot, and nothing is sent for it.
    pub fn execute_scoped<F>(
        &self,
        token: CancellationToken,
        loading_message: Option<String>,
        operation: F,
    ) where
        F: Future<Output = Option<Msg>> + Send + 'static,
    {
        let with_loading = loading_message.is_some();
        if let Some(message) = loading_message {
            self.start_loading(message);
        }

        let tx_to_main = self.tx_to_main.clone();
        let error_reporter = self.error_reporter.clone();

        // The stop message must go out even if the token fires first.
        let stop_guard = with_loading.then(|| LoadingGuard {
            tx: tx_to_main.clone(),
        });

        self.taskpool.execute_scoped(token, async move {
            let msg = operation.await;
            drop(stop_guard);
            if let Some(msg) = msg {
                Self::send_message_or_report_error(
                    &tx_to_main,
                    msg,
                    "scoped result",
                    &error_reporter,
                );
            }
        });
    }

    /// Like [`TaskManager::execute`], registered under `operation_id` so it
    /// can be cancelled. Starting an operation with an id that is already
    /// running cancels the older one.
    pub fn execute_cancellable<F, Fut, R>(
        &self,
        operation_id: impl Display,
        loading_message: impl Display,
        operation: F,
    ) where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<R, AppError>> + Send + 'static,
        R: Send + 'static,
    {
        let operation_id = operation_id.to_string();
        let generation = self.next_operation.fetch_add(1, Ordering::Relaxed);
        let cancel_token = CancellationToken::new();

        {
            let mut operations = self
                .active_operations
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some((_, previous)) =
                operations.insert(operation_id.clone(), (generation, cancel_token.clone()))
            {
                previous.cancel();
            }
        }

        let future = operation(cancel_token.clone());
        let active_operations = self.active_operations.clone();

        self.execute(loading_message, async move {
            let result = tokio::select! {
                result = future => result.map(|_| ()),
                () = cancel_token.cancelled() => {
                    log::info!("Operation '{operation_id}' cancelled");
                    Ok(())
                }
            };

            let mut operations = active_operations
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            // A newer run may already own the slot
            if operations
                .get(&operation_id)
                .is_some_and(|(owner, _)| *owner == generation)
            {
                operations.remove(&operation_id);
            }
            result
        });
    }

    pub fn cancel_operation(&self, operation_id: &str) {
        let mut operations = self
            .active_operations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some((_, token)) = operations.remove(operation_id) {
            token.cancel();
            log::info!("Cancelled operation: {operation_id}");
        }
    }

    pub fn get_active_operations(&self) -> Vec<String> {
        let operations = self
            .active_operations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        operations.keys().cloned().collect()
    }

    pub fn send_message_or_report_error(
        tx: &Sender<Msg>,
        msg: Msg,
        context: &str,
        error_reporter: &ErrorReporter,
    ) {
        if let Err(e) = tx.send(msg) {
            error_reporter.report_send_error(context, e);
        }
    }

    fn start_loading(&self, loading_message: impl Display) {
        Self::send_message_or_report_error(
            &self.tx_to_main,
            Msg::LoadingActivity(LoadingActivityMsg::Start(loading_message.to_string())),
            "loading start",
            &self.error_reporter,
        );
    }

    async fn with_timeout<F, R>(timeout: Duration, operation: F) -> Result<R, AppError>
    where
        F: Future<Output = Result<R, AppError>>,
    {
        match tokio::time::timeout(timeout, operation).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!("Operation timed out after {timeout:?}");
                Err(AppError::Api(format!(
                    "A operação demorou mais de {} segundos. Tente novamente.",
                    timeout.as_secs()
                )))
            }
        }
    }

    fn report(error_reporter: &ErrorReporter, error: AppError, operation: &str) {
        let context = ErrorContext::new("TaskManager", operation).with_message(error.message());
        error_reporter.report(error, context);
    }
}

/// Sends `LoadingActivity::Stop` when dropped.
struct LoadingGuard {
    tx: Sender<Msg>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if let Err(e) = self.tx.send(Msg::LoadingActivity(LoadingActivityMsg::Stop)) {
            log::error!("Failed to send loading stop: {e}");
        }
    }
}
