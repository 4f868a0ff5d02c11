use super::errors::SessionError;
use super::storage::SessionStorage;
use crate::api::gateway::TokenSource;
use crate::model::UserView;
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};
use tokio::sync::watch;

/// Token and user, persisted and cleared as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user: UserView,
}

/// Mirror of the backend's session response in local persisted state.
///
/// Writes go to storage first and only then to memory, so a failed write
/// leaves the previous session intact. Both happen under the same write
/// lock, so concurrent `save` and `clear` calls cannot leave storage and
/// memory disagreeing. Every successful `save` or `clear` publishes the new
/// user (or `None`) to subscribers.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    current: RwLock<Option<SessionData>>,
    changes: watch::Sender<Option<UserView>>,
}

impl SessionStore {
    /// Open the store, restoring any persisted session. An unreadable
    /// document is discarded and the store starts logged out.
    pub fn open(storage: Box<dyn SessionStorage>) -> Self {
        let restored = match storage.load() {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Discarding unreadable session: {e}");
                if let Err(e) = storage.remove() {
                    log::warn!("Failed to remove unreadable session: {e}");
                }
                None
            }
        };

        if let Some(data) = &restored {
            log::info!("Restored session for user {}", data.user.id);
        }

        let (changes, _) = watch::channel(restored.as_ref().map(|d| d.user.clone()));
        Self {
            storage,
            current: RwLock::new(restored),
            changes,
        }
    }

    pub fn save(&self, data: SessionData) -> Result<(), SessionError> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        self.storage.store(&data)?;
        let user = data.user.clone();
        *current = Some(data);
        self.changes.send_replace(Some(user));
        log::debug!("Session saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        self.storage.remove()?;
        *current = None;
        self.changes.send_replace(None);
        log::debug!("Session cleared");
        Ok(())
    }

    pub fn session(&self) -> Option<SessionData> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get_user(&self) -> Option<UserView> {
        self.session().map(|d| d.user)
    }

    pub fn token(&self) -> Option<String> {
        self.session().map(|d| d.token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Receiver that yields the current user after every save or clear.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserView>> {
        self.changes.subscribe()
    }
}

impl TokenSource for SessionStore {
    fn bearer_token(&self) -> Option<String> {
        self.token()
    }
}
