use super::wizard::{WizardCommand, WizardEvent};
use crate::api::backend::BarberShopBackend;
use std::sync::Arc;

/// Runs [`WizardCommand`]s against the backend.
#[derive(Clone)]
pub struct WizardDriver {
    backend: Arc<dyn BarberShopBackend>,
}

impl WizardDriver {
    pub fn new(backend: Arc<dyn BarberShopBackend>) -> Self {
        Self { backend }
    }

    /// Run `command` under its ticket's token.
    ///
    /// Returns `None` when the ticket was cancelled before or during the
    /// call; there is nothing left to report in that case.
    pub async fn dispatch(&self, command: WizardCommand) -> Option<WizardEvent> {
        let ticket = command.ticket().clone();
        if ticket.is_cancelled() {
            return None;
        }
        let token = ticket.token();
        let id = ticket.id();

        let event = match &command {
            WizardCommand::LoadServices { .. } => WizardEvent::ServicesLoaded {
                ticket: id,
                result: self.backend.list_services(token).await,
            },
            WizardCommand::LoadBarbers { .. } => WizardEvent::BarbersLoaded {
                ticket: id,
                result: self.backend.list_barbers(token).await,
            },
            WizardCommand::LoadSlots {
                barber_id, date, ..
            } => WizardEvent::SlotsLoaded {
                ticket: id,
                result: self.backend.availability(barber_id, *date, token).await,
            },
            WizardCommand::SubmitBooking { request, .. } => WizardEvent::BookingSubmitted {
                ticket: id,
                result: self.backend.create_booking(request, token).await,
            },
        };

        if ticket.is_cancelled() {
            log::debug!("Dropping result of cancelled {:?} ticket {id}", ticket.kind());
            return None;
        }
        Some(event)
    }
}
