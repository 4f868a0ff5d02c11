use std::sync::Arc;

use futures_util::Future;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Bounded set of background tasks. At most `n_tasks` run at once and every
/// task is cancelled when the pool is dropped.
pub struct TaskPool {
    semaphore: Arc<Semaphore>,
    cancel_token: CancellationToken,
}

impl TaskPool {
    pub fn new(n_tasks: usize) -> TaskPool {
        let semaphore = Arc::new(Semaphore::new(n_tasks.max(1)));
        let cancel_token = CancellationToken::new();

        TaskPool {
            semaphore,
            cancel_token,
        }
    }

    pub fn execute<F, T>(&self, func: F)
    where
        F: Future<Output = T> + Send + 'static,
        T: Send,
    {
        self.spawn(None, func);
    }

    /// Like [`TaskPool::execute`], but the task also stops when `token` is
    /// cancelled, even while it is still waiting for a permit.
    pub fn execute_scoped<F, T>(&self, token: CancellationToken, func: F)
    where
        F: Future<Output = T> + Send + 'static,
        T: Send,
    {
        self.spawn(Some(token), func);
    }

    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }

    fn spawn<F, T>(&self, scope: Option<CancellationToken>, func: F)
    where
        F: Future<Output = T> + Send + 'static,
        T: Send,
    {
        let semaphore = self.semaphore.clone();
        let pool_token = self.cancel_token.clone();
        let scope = scope.unwrap_or_else(|| pool_token.child_token());
        tokio::spawn(async move {
            let main = async {
                let Ok(_permit) = semaphore.acquire().await else {
                    return;
                };
                func.await;
            };

            tokio::select! {
                () = main => {},
                () = pool_token.cancelled() => {},
                () = scope.cancelled() => {}
            }
        });
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.semaphore.close();
        self.cancel_token.cancel();
    }
}
