//! Application-wide service/barber selection.
//!
//! [`SelectionContext`] is created once at the application root and owns the
//! selection. Pages receive [`SelectionHandle`]s, which are cheap to clone and
//! do not keep the selection alive. A handle outliving its context is a wiring
//! bug and panics on use instead of quietly returning an empty selection.

use crate::model::{Barber, Service};
use std::sync::{Arc, PoisonError, RwLock, Weak};

const DETACHED_HANDLE: &str =
    "SelectionHandle used after its SelectionContext was dropped; handles must not outlive the application root";

/// The chosen service and barber. Holds the backend records themselves, never
/// their display strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub service: Option<Service>,
    pub barber: Option<Barber>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.service.is_none() && self.barber.is_none()
    }
}

/// Root owner of the selection.
#[derive(Debug, Default)]
pub struct SelectionContext {
    inner: Arc<RwLock<Selection>>,
}

impl SelectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> SelectionHandle {
        SelectionHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn snapshot(&self) -> Selection {
        read(&self.inner)
    }
}

/// Non-owning access to the selection for pages and components.
#[derive(Debug, Clone)]
pub struct SelectionHandle {
    inner: Weak<RwLock<Selection>>,
}

impl SelectionHandle {
    /// Replace the current service. No validation.
    ///
    /// # Panics
    ///
    /// Panics if the owning [`SelectionContext`] has been dropped.
    pub fn set_service(&self, service: Option<Service>) {
        let shared = self.attached();
        log::debug!(
            "Selection service -> {:?}",
            service.as_ref().map(|s| s.id.as_str())
        );
        shared.write().unwrap_or_else(PoisonError::into_inner).service = service;
    }

    /// Replace the current barber. No validation.
    ///
    /// # Panics
    ///
    /// Panics if the owning [`SelectionContext`] has been dropped.
    pub fn set_barber(&self, barber: Option<Barber>) {
        let shared = self.attached();
        log::debug!(
            "Selection barber -> {:?}",
            barber.as_ref().map(|b| b.id.as_str())
        );
        shared.write().unwrap_or_else(PoisonError::into_inner).barber = barber;
    }

    /// # Panics
    ///
    /// Panics if the owning [`SelectionContext`] has been dropped.
    pub fn reset(&self) {
        let shared = self.attached();
        *shared.write().unwrap_or_else(PoisonError::into_inner) = Selection::default();
    }

    /// # Panics
    ///
    /// Panics if the owning [`SelectionContext`] has been dropped.
    pub fn snapshot(&self) -> Selection {
        read(&self.attached())
    }

    pub fn service(&self) -> Option<Service> {
        self.snapshot().service
    }

    pub fn barber(&self) -> Option<Barber> {
        self.snapshot().barber
    }

    pub fn is_attached(&self) -> bool {
        self.inner.strong_count() > 0
    }

    fn attached(&self) -> Arc<RwLock<Selection>> {
        match self.inner.upgrade() {
            Some(shared) => shared,
            None => panic!("{DETACHED_HANDLE}"),
        }
    }
}

fn read(shared: &RwLock<Selection>) -> Selection {
    shared.read().unwrap_or_else(PoisonError::into_inner).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: &str) -> Service {
        Service {
            id: id.to_string(),
            nome: format!("Serviço {id}"),
            duracao: 30,
            preco: 30.0,
        }
    }

    fn barber(id: &str) -> Barber {
        Barber {
            id: id.to_string(),
            nome: format!("Barbeiro {id}"),
            telefone: None,
            foto_url: None,
        }
    }

    #[test]
    fn test_readers_see_latest_write() {
        let context = SelectionContext::new();
        let writer = context.handle();
        let reader = writer.clone();

        writer.set_service(Some(service("1")));
        writer.set_service(Some(service("2")));
        writer.set_barber(Some(barber("10")));

        assert_eq!(reader.service().map(|s| s.id), Some("2".to_string()));
        assert_eq!(reader.barber().map(|b| b.id), Some("10".to_string()));
        assert_eq!(context.snapshot(), reader.snapshot());
    }

    #[test]
    fn test_reset_clears_both() {
        let context = SelectionContext::new();
        let handle = context.handle();
        handle.set_service(Some(service("1")));
        handle.set_barber(Some(barber("10")));

        handle.reset();
        assert!(handle.snapshot().is_empty());
    }

    #[test]
    fn test_set_none_clears_single_field() {
        let context = SelectionContext::new();
        let handle = context.handle();
        handle.set_service(Some(service("1")));
        handle.set_barber(Some(barber("10")));

        handle.set_service(None);
        let snapshot = handle.snapshot();
        assert!(snapshot.service.is_none());
        assert!(snapshot.barber.is_some());
    }

    #[test]
    #[should_panic(expected = "SelectionHandle used after its SelectionContext was dropped")]
    fn test_detached_handle_fails_fast() {
        let handle = {
            let context = SelectionContext::new();
            context.handle()
        };
        assert!(!handle.is_attached());
        handle.set_service(Some(service("1")));
    }
}
