//! Recently booked (service, barber) pairs for quick re-booking.

use super::wizard::BookingCompleted;
use crate::model::{Barber, Service};
use crate::session::SessionError;
use crate::session::storage::{data_dir, read_document, remove_document, write_document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_HISTORY_LIMIT: usize = 5;
const HISTORY_FILE: &str = "recent.json";

pub fn default_history_path() -> PathBuf {
    data_dir().join(HISTORY_FILE)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentBooking {
    pub service: Service,
    pub barber: Barber,
    pub data_horario_iso: String,
    pub booked_at: DateTime<Utc>,
}

impl RecentBooking {
    pub fn from_completed(completed: &BookingCompleted, booked_at: DateTime<Utc>) -> Self {
        Self {
            service: completed.service.clone(),
            barber: completed.barber.clone(),
            data_horario_iso: completed.request.data_horario_iso.clone(),
            booked_at,
        }
    }

    fn same_pair(&self, other: &RecentBooking) -> bool {
        self.service.id == other.service.id && self.barber.id == other.barber.id
    }
}

/// Newest-first list of recent bookings, one entry per (service, barber).
///
/// With a path the list is persisted as JSON after every change; without one
/// it lives in memory only.
#[derive(Debug)]
pub struct RecentBookings {
    path: Option<PathBuf>,
    limit: usize,
    entries: Vec<RecentBooking>,
}

impl RecentBookings {
    pub fn in_memory(limit: usize) -> Self {
        Self {
            path: None,
            limit: limit.max(1),
            entries: Vec::new(),
        }
    }

    /// Load from `path`. A missing file starts empty; an unreadable one is
    /// discarded.
    pub fn open(path: impl Into<PathBuf>, limit: usize) -> Self {
        let path = path.into();
        let mut entries: Vec<RecentBooking> = match read_document(&path) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                log::warn!("Discarding unreadable booking history {}: {e}", path.display());
                if let Err(e) = remove_document(&path) {
                    log::warn!("Failed to remove booking history: {e}");
                }
                Vec::new()
            }
        };
        let limit = limit.max(1);
        entries.truncate(limit);

        Self {
            path: Some(path),
            limit,
            entries,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn entries(&self) -> &[RecentBooking] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Put `booking` first, dropping an older entry for the same pair and
    /// anything past the limit.
    pub fn record(&mut self, booking: RecentBooking) -> Result<(), SessionError> {
        self.entries.retain(|existing| !existing.same_pair(&booking));
        self.entries.insert(0, booking);
        self.entries.truncate(self.limit);
        self.persist()
    }

    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.entries.clear();
        match &self.path {
            Some(path) => remove_document(path),
            None => Ok(()),
        }
    }

    fn persist(&self) -> Result<(), SessionError> {
        match &self.path {
            Some(path) => write_document(path, &self.entries),
            None => Ok(()),
        }
    }
}
