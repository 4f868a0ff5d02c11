use super::fetch::{FetchKind, FetchTicket, InFlight};
use crate::common::errors::ApiResult;
use crate::model::{
    Barber, BookingConfirmation, BookingRequest, PaymentMethod, Service, TimeSlot, sort_by_name,
};
use crate::selection::Selection;
use chrono::NaiveDate;
use thiserror::Error;

pub const MSG_SERVICES_FAILED: &str = "Falha ao carregar serviços.";
pub const MSG_BARBERS_FAILED: &str = "Falha ao carregar barbeiros.";
pub const MSG_SLOTS_FAILED: &str = "Falha ao carregar horários.";
pub const MSG_BOOKING_CONFIRMED: &str = "Agendamento confirmado! Enviamos um email pra você.";
pub const MSG_SLOT_TAKEN: &str = "Esse horário acabou de ficar indisponível. Tente outro.";
pub const MSG_BOOKING_FAILED: &str = "Erro ao confirmar agendamento.";
pub const MSG_NO_SLOTS: &str = "Sem horários disponíveis para esta data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    ChoosingService,
    ChoosingBarber,
    ChoosingSlot,
    Submitting,
    Succeeded,
}

impl WizardStep {
    /// Zero-based position for step indicators. `Submitting` and `Succeeded`
    /// render as the last step.
    pub fn index(&self) -> usize {
        match self {
            WizardStep::ChoosingService => 0,
            WizardStep::ChoosingBarber => 1,
            WizardStep::ChoosingSlot | WizardStep::Submitting | WizardStep::Succeeded => 2,
        }
    }

    pub const LABELS: [&'static str; 3] = ["Serviço", "Profissional", "Horário"];
}

/// Work the host must run on the wizard's behalf. Each command carries the
/// ticket whose token must be honoured and whose id tags the resulting event.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardCommand {
    LoadServices {
        ticket: FetchTicket,
    },
    LoadBarbers {
        ticket: FetchTicket,
    },
    LoadSlots {
        ticket: FetchTicket,
        barber_id: String,
        date: NaiveDate,
    },
    SubmitBooking {
        ticket: FetchTicket,
        request: BookingRequest,
    },
}

impl WizardCommand {
    pub fn ticket(&self) -> &FetchTicket {
        match self {
            WizardCommand::LoadServices { ticket }
            | WizardCommand::LoadBarbers { ticket }
            | WizardCommand::LoadSlots { ticket, .. }
            | WizardCommand::SubmitBooking { ticket, .. } => ticket,
        }
    }
}

/// Outcome of a [`WizardCommand`], tagged with the id of the ticket it ran under.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    ServicesLoaded {
        ticket: u64,
        result: ApiResult<Vec<Service>>,
    },
    BarbersLoaded {
        ticket: u64,
        result: ApiResult<Vec<Barber>>,
    },
    SlotsLoaded {
        ticket: u64,
        result: ApiResult<Vec<TimeSlot>>,
    },
    BookingSubmitted {
        ticket: u64,
        result: ApiResult<BookingConfirmation>,
    },
}

impl WizardEvent {
    fn key(&self) -> (FetchKind, u64) {
        match self {
            WizardEvent::ServicesLoaded { ticket, .. } => (FetchKind::Services, *ticket),
            WizardEvent::BarbersLoaded { ticket, .. } => (FetchKind::Barbers, *ticket),
            WizardEvent::SlotsLoaded { ticket, .. } => (FetchKind::Slots, *ticket),
            WizardEvent::BookingSubmitted { ticket, .. } => (FetchKind::Booking, *ticket),
        }
    }

    fn is_cancelled(&self) -> bool {
        match self {
            WizardEvent::ServicesLoaded { result, .. } => {
                matches!(result, Err(e) if e.is_cancelled())
            }
            WizardEvent::BarbersLoaded { result, .. } => {
                matches!(result, Err(e) if e.is_cancelled())
            }
            WizardEvent::SlotsLoaded { result, .. } => {
                matches!(result, Err(e) if e.is_cancelled())
            }
            WizardEvent::BookingSubmitted { result, .. } => {
                matches!(result, Err(e) if e.is_cancelled())
            }
        }
    }
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Info(String),
    Success(String),
    Error(String),
}

/// Everything known about a booking the backend accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingCompleted {
    pub service: Service,
    pub barber: Barber,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub request: BookingRequest,
    pub confirmation: BookingConfirmation,
}

/// Result of a wizard operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    pub commands: Vec<WizardCommand>,
    pub notifications: Vec<Notification>,
    pub completed: Option<BookingCompleted>,
}

impl Transition {
    fn command(command: WizardCommand) -> Self {
        Self {
            commands: vec![command],
            ..Self::default()
        }
    }

    fn notify(notification: Notification) -> Self {
        Self {
            notifications: vec![notification],
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.notifications.is_empty() && self.completed.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("'{action}' is not available while {step:?}")]
    UnavailableInStep {
        action: &'static str,
        step: WizardStep,
    },

    #[error("Slot {0} is not among the available slots")]
    UnknownSlot(String),

    #[error("A booking needs a service, a barber and a time slot")]
    Incomplete,
}

/// The service → barber → time slot → confirm flow.
///
/// The wizard never performs I/O. Operations return the commands the host
/// must run; their outcomes come back through [`BookingWizard::apply`].
/// Entering a step issues exactly one fetch and leaving it cancels that
/// fetch, so a late result from a step the user already left is discarded.
#[derive(Debug)]
pub struct BookingWizard {
    step: WizardStep,
    date: NaiveDate,
    user_id: Option<String>,

    services: Vec<Service>,
    barbers: Vec<Barber>,
    slots: Vec<TimeSlot>,
    slots_loaded: bool,

    service: Option<Service>,
    barber: Option<Barber>,
    slot: Option<TimeSlot>,
    payment: PaymentMethod,

    last_failure: Option<String>,
    in_flight: InFlight,
}

impl BookingWizard {
    /// Create a wizard for `date`, seeded from the shared selection.
    ///
    /// The returned transition holds the entry fetch for the starting step.
    pub fn new(date: NaiveDate, user_id: Option<String>, seed: Selection) -> (Self, Transition) {
        let step = match (&seed.service, &seed.barber) {
            (Some(_), Some(_)) => WizardStep::ChoosingSlot,
            (Some(_), None) => WizardStep::ChoosingBarber,
            (None, _) => WizardStep::ChoosingService,
        };

        let mut wizard = Self {
            step,
            date,
            user_id,
            services: Vec::new(),
            barbers: Vec::new(),
            slots: Vec::new(),
            slots_loaded: false,
            service: seed.service,
            barber: seed.barber,
            slot: None,
            payment: PaymentMethod::default(),
            last_failure: None,
            in_flight: InFlight::new(),
        };

        log::debug!("Booking wizard opened at {step:?} for {date}");
        let transition = wizard.enter(step);
        (wizard, transition)
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn barbers(&self) -> &[Barber] {
        &self.barbers
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn service(&self) -> Option<&Service> {
        self.service.as_ref()
    }

    pub fn barber(&self) -> Option<&Barber> {
        self.barber.as_ref()
    }

    pub fn slot(&self) -> Option<&TimeSlot> {
        self.slot.as_ref()
    }

    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    pub fn is_loading(&self, kind: FetchKind) -> bool {
        self.in_flight.is_pending(kind)
    }

    /// Inline notice for a successfully loaded but empty slot list.
    pub fn slots_notice(&self) -> Option<&'static str> {
        (self.step == WizardStep::ChoosingSlot
            && self.slots_loaded
            && self.slots.is_empty()
            && !self.is_loading(FetchKind::Slots))
        .then_some(MSG_NO_SLOTS)
    }

    pub fn select_service(&mut self, service: Service) -> Result<Transition, WizardError> {
        self.require(WizardStep::ChoosingService, "select service")?;
        log::debug!("Wizard service selected: {}", service.id);
        self.service = Some(service);
        self.in_flight.cancel(FetchKind::Services);
        Ok(self.enter(WizardStep::ChoosingBarber))
    }

    pub fn select_barber(&mut self, barber: Barber) -> Result<Transition, WizardError> {
        self.require(WizardStep::ChoosingBarber, "select barber")?;
        log::debug!("Wizard barber selected: {}", barber.id);
        self.barber = Some(barber);
        self.in_flight.cancel(FetchKind::Barbers);
        Ok(self.enter(WizardStep::ChoosingSlot))
    }

    /// Step back one screen, keeping earlier selections.
    pub fn back(&mut self) -> Result<Transition, WizardError> {
        match self.step {
            WizardStep::ChoosingBarber => {
                self.in_flight.cancel(FetchKind::Barbers);
                Ok(self.enter(WizardStep::ChoosingService))
            }
            WizardStep::ChoosingSlot => {
                self.in_flight.cancel(FetchKind::Slots);
                self.clear_slots();
                Ok(self.enter(WizardStep::ChoosingBarber))
            }
            step => Err(WizardError::UnavailableInStep {
                action: "back",
                step,
            }),
        }
    }

    /// Change the active date. While choosing a slot this refetches availability.
    pub fn set_date(&mut self, date: NaiveDate) -> Result<Transition, WizardError> {
        if matches!(self.step, WizardStep::Submitting | WizardStep::Succeeded) {
            return Err(WizardError::UnavailableInStep {
                action: "set date",
                step: self.step,
            });
        }
        if date == self.date {
            return Ok(Transition::default());
        }

        self.date = date;
        if self.step == WizardStep::ChoosingSlot {
            Ok(self.enter(WizardStep::ChoosingSlot))
        } else {
            Ok(Transition::default())
        }
    }

    pub fn choose_slot(&mut self, slot: TimeSlot) -> Result<(), WizardError> {
        self.require(WizardStep::ChoosingSlot, "choose slot")?;
        if !self.slots.contains(&slot) {
            return Err(WizardError::UnknownSlot(slot.to_string()));
        }
        self.slot = Some(slot);
        Ok(())
    }

    pub fn choose_payment(&mut self, payment: PaymentMethod) -> Result<(), WizardError> {
        self.require(WizardStep::ChoosingSlot, "choose payment")?;
        self.payment = payment;
        Ok(())
    }

    pub fn can_confirm(&self) -> bool {
        self.step == WizardStep::ChoosingSlot
            && self.service.is_some()
            && self.barber.is_some()
            && self.slot.is_some()
    }

    /// Submit the booking. Issues exactly one `SubmitBooking`.
    pub fn confirm(&mut self) -> Result<Transition, WizardError> {
        self.require(WizardStep::ChoosingSlot, "confirm")?;
        let (Some(service), Some(barber), Some(slot)) = (&self.service, &self.barber, &self.slot)
        else {
            return Err(WizardError::Incomplete);
        };

        let request = BookingRequest::new(
            self.user_id.clone(),
            service,
            barber,
            self.date,
            slot,
            self.payment,
        );
        log::info!(
            "Submitting booking: service={} barber={} at {}",
            request.servico_id,
            request.barbeiro_id,
            request.data_horario_iso
        );

        self.last_failure = None;
        self.step = WizardStep::Submitting;
        let ticket = self.in_flight.issue(FetchKind::Booking);
        Ok(Transition::command(WizardCommand::SubmitBooking {
            ticket,
            request,
        }))
    }

    /// Apply a command outcome. Stale or cancelled outcomes leave the wizard untouched.
    pub fn apply(&mut self, event: WizardEvent) -> Transition {
        let (kind, ticket) = event.key();
        if !self.in_flight.settle(kind, ticket) {
            log::debug!("Discarding stale {kind:?} result (ticket {ticket})");
            return Transition::default();
        }
        if event.is_cancelled() {
            log::debug!("Discarding cancelled {kind:?} result (ticket {ticket})");
            return Transition::default();
        }

        match event {
            WizardEvent::ServicesLoaded { result, .. } => match result {
                Ok(mut services) => {
                    sort_by_name(&mut services);
                    self.services = services;
                    Transition::default()
                }
                Err(e) => {
                    log::warn!("Loading services failed: {e}");
                    Transition::notify(Notification::Error(MSG_SERVICES_FAILED.to_string()))
                }
            },
            WizardEvent::BarbersLoaded { result, .. } => match result {
                Ok(mut barbers) => {
                    sort_by_name(&mut barbers);
                    self.barbers = barbers;
                    Transition::default()
                }
                Err(e) => {
                    log::warn!("Loading barbers failed: {e}");
                    Transition::notify(Notification::Error(MSG_BARBERS_FAILED.to_string()))
                }
            },
            WizardEvent::SlotsLoaded { result, .. } => match result {
                Ok(slots) => {
                    self.slots = slots;
                    self.slots_loaded = true;
                    Transition::default()
                }
                Err(e) => {
                    log::warn!("Loading slots failed: {e}");
                    self.clear_slots();
                    Transition::notify(Notification::Error(MSG_SLOTS_FAILED.to_string()))
                }
            },
            WizardEvent::BookingSubmitted { result, .. } => self.finish_submission(result),
        }
    }

    /// Cancel everything in flight. The host drops the wizard afterwards.
    pub fn close(&mut self) {
        log::debug!("Booking wizard closed at {:?}", self.step);
        self.in_flight.cancel_all();
    }

    fn finish_submission(&mut self, result: ApiResult<BookingConfirmation>) -> Transition {
        match result {
            Ok(confirmation) => {
                self.step = WizardStep::Succeeded;
                let completed = match (&self.service, &self.barber, &self.slot) {
                    (Some(service), Some(barber), Some(slot)) => Some(BookingCompleted {
                        service: service.clone(),
                        barber: barber.clone(),
                        date: self.date,
                        slot: slot.clone(),
                        request: BookingRequest::new(
                            self.user_id.clone(),
                            service,
                            barber,
                            self.date,
                            slot,
                            self.payment,
                        ),
                        confirmation,
                    }),
                    _ => None,
                };
                log::info!("Booking confirmed");
                Transition {
                    commands: Vec::new(),
                    notifications: vec![Notification::Success(MSG_BOOKING_CONFIRMED.to_string())],
                    completed,
                }
            }
            Err(e) if e.is_conflict() => {
                log::warn!("Booking rejected, slot taken: {e}");
                self.last_failure = Some(MSG_SLOT_TAKEN.to_string());
                // Slot and list stay as they were; the user retries or picks another.
                self.step = WizardStep::ChoosingSlot;
                Transition::notify(Notification::Error(MSG_SLOT_TAKEN.to_string()))
            }
            Err(e) => {
                log::warn!("Booking failed: {e}");
                self.last_failure = Some(MSG_BOOKING_FAILED.to_string());
                self.step = WizardStep::ChoosingSlot;
                Transition::notify(Notification::Error(MSG_BOOKING_FAILED.to_string()))
            }
        }
    }

    /// Switch to `step` and issue its entry fetch.
    fn enter(&mut self, step: WizardStep) -> Transition {
        self.step = step;
        match step {
            WizardStep::ChoosingService => {
                let ticket = self.in_flight.issue(FetchKind::Services);
                Transition::command(WizardCommand::LoadServices { ticket })
            }
            WizardStep::ChoosingBarber => {
                let ticket = self.in_flight.issue(FetchKind::Barbers);
                Transition::command(WizardCommand::LoadBarbers { ticket })
            }
            WizardStep::ChoosingSlot => {
                self.clear_slots();
                match &self.barber {
                    Some(barber) => {
                        let barber_id = barber.id.clone();
                        let ticket = self.in_flight.issue(FetchKind::Slots);
                        Transition::command(WizardCommand::LoadSlots {
                            ticket,
                            barber_id,
                            date: self.date,
                        })
                    }
                    None => Transition::default(),
                }
            }
            WizardStep::Submitting | WizardStep::Succeeded => Transition::default(),
        }
    }

    fn clear_slots(&mut self) {
        self.slot = None;
        self.slots.clear();
        self.slots_loaded = false;
    }

    fn require(&self, step: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::UnavailableInStep {
                action,
                step: self.step,
            })
        }
    }
}

impl Drop for BookingWizard {
    fn drop(&mut self) {
        self.in_flight.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::errors::ApiError;
    use claims::*;

    mod helpers {
        use super::*;

        pub fn date() -> NaiveDate {
            NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
        }

        pub fn service(id: &str, nome: &str) -> Service {
            Service {
                id: id.to_string(),
                nome: nome.to_string(),
                duracao: 30,
                preco: 30.0,
            }
        }

        pub fn barber(id: &str, nome: &str) -> Barber {
            Barber {
                id: id.to_string(),
                nome: nome.to_string(),
                telefone: None,
                foto_url: None,
            }
        }

        pub fn only_command(transition: &Transition) -> &WizardCommand {
            assert_eq!(transition.commands.len(), 1, "expected exactly one command");
            &transition.commands[0]
        }

        pub fn ticket_id(transition: &Transition) -> u64 {
            only_command(transition).ticket().id()
        }

        pub fn status(code: u16) -> ApiError {
            ApiError::Status {
                method: "POST".to_string(),
                url: "http://localhost:8080/agendamentos".to_string(),
                status: code,
                body: String::new(),
            }
        }

        /// Wizard in ChoosingSlot with slots 09:00 and 09:30 loaded.
        pub fn at_slot_step() -> BookingWizard {
            let seed = Selection {
                service: Some(service("1", "Corte")),
                barber: Some(barber("10", "João")),
            };
            let (mut wizard, entry) = BookingWizard::new(date(), None, seed);
            let ticket = ticket_id(&entry);
            wizard.apply(WizardEvent::SlotsLoaded {
                ticket,
                result: Ok(vec![TimeSlot::from("09:00"), TimeSlot::from("09:30")]),
            });
            wizard
        }
    }

    mod unit {
        use super::helpers::*;
        use super::*;

        #[test]
        fn test_unseeded_wizard_loads_services() {
            let (wizard, entry) = BookingWizard::new(date(), None, Selection::default());
            assert_eq!(wizard.step(), WizardStep::ChoosingService);
            assert_matches!(only_command(&entry), WizardCommand::LoadServices { .. });
        }

        #[test]
        fn test_service_seed_starts_at_barber_step() {
            let seed = Selection {
                service: Some(service("1", "Corte")),
                barber: None,
            };
            let (wizard, entry) = BookingWizard::new(date(), None, seed);
            assert_eq!(wizard.step(), WizardStep::ChoosingBarber);
            assert_matches!(only_command(&entry), WizardCommand::LoadBarbers { .. });
        }

        #[test]
        fn test_full_seed_starts_at_slot_step() {
            let seed = Selection {
                service: Some(service("1", "Corte")),
                barber: Some(barber("10", "João")),
            };
            let (wizard, entry) = BookingWizard::new(date(), None, seed);
            assert_eq!(wizard.step(), WizardStep::ChoosingSlot);
            assert_matches!(
                only_command(&entry),
                WizardCommand::LoadSlots { barber_id, date: d, .. } if barber_id == "10" && *d == date()
            );
        }

        #[test]
        fn test_barber_seed_is_kept_for_later() {
            let seed = Selection {
                service: None,
                barber: Some(barber("10", "João")),
            };
            let (mut wizard, _) = BookingWizard::new(date(), None, seed);
            assert_eq!(wizard.step(), WizardStep::ChoosingService);

            let transition = assert_ok!(wizard.select_service(service("1", "Corte")));
            assert_eq!(wizard.step(), WizardStep::ChoosingBarber);
            assert_matches!(only_command(&transition), WizardCommand::LoadBarbers { .. });
            assert_some_eq!(wizard.barber().map(|b| b.id.as_str()), "10");
        }

        #[test]
        fn test_services_are_sorted_by_name() {
            let (mut wizard, entry) = BookingWizard::new(date(), None, Selection::default());
            let transition = wizard.apply(WizardEvent::ServicesLoaded {
                ticket: ticket_id(&entry),
                result: Ok(vec![service("2", "Barba"), service("1", "Acabamento")]),
            });
            assert!(transition.is_empty());
            let names: Vec<&str> = wizard.services().iter().map(|s| s.nome.as_str()).collect();
            assert_eq!(names, vec!["Acabamento", "Barba"]);
        }

        #[test]
        fn test_selecting_barber_clears_previous_slot_before_results() {
            let mut wizard = at_slot_step();
            assert_ok!(wizard.choose_slot(TimeSlot::from("09:00")));

            assert_ok!(wizard.back());
            let transition = assert_ok!(wizard.select_barber(barber("11", "Pedro")));

            assert_none!(wizard.slot());
            assert!(wizard.slots().is_empty());
            assert!(wizard.is_loading(FetchKind::Slots));
            assert_matches!(
                only_command(&transition),
                WizardCommand::LoadSlots { barber_id, .. } if barber_id == "11"
            );
        }

        #[test]
        fn test_late_slots_for_previous_barber_are_discarded() {
            let seed = Selection {
                service: Some(service("1", "Corte")),
                barber: None,
            };
            let (mut wizard, _) = BookingWizard::new(date(), None, seed);

            let first = assert_ok!(wizard.select_barber(barber("10", "B1")));
            let b1_ticket = ticket_id(&first);
            assert_ok!(wizard.back());
            let second = assert_ok!(wizard.select_barber(barber("11", "B2")));
            let b2_ticket = ticket_id(&second);
            assert!(first.commands[0].ticket().is_cancelled());

            wizard.apply(WizardEvent::SlotsLoaded {
                ticket: b2_ticket,
                result: Ok(vec![TimeSlot::from("14:00")]),
            });
            let late = wizard.apply(WizardEvent::SlotsLoaded {
                ticket: b1_ticket,
                result: Ok(vec![TimeSlot::from("08:00")]),
            });

            assert!(late.is_empty());
            assert_eq!(wizard.slots(), &[TimeSlot::from("14:00")]);
        }

        #[test]
        fn test_back_from_barber_keeps_service_and_cancels_fetch() {
            let (mut wizard, entry) = BookingWizard::new(date(), None, Selection::default());
            wizard.apply(WizardEvent::ServicesLoaded {
                ticket: ticket_id(&entry),
                result: Ok(vec![service("1", "Corte")]),
            });
            let barbers = assert_ok!(wizard.select_service(service("1", "Corte")));

            let back = assert_ok!(wizard.back());
            assert_eq!(wizard.step(), WizardStep::ChoosingService);
            assert!(barbers.commands[0].ticket().is_cancelled());
            assert_matches!(only_command(&back), WizardCommand::LoadServices { .. });
            assert_some_eq!(wizard.service().map(|s| s.id.as_str()), "1");
        }

        #[test]
        fn test_back_from_first_step_is_an_error() {
            let (mut wizard, _) = BookingWizard::new(date(), None, Selection::default());
            assert_err_eq!(
                wizard.back(),
                WizardError::UnavailableInStep {
                    action: "back",
                    step: WizardStep::ChoosingService
                }
            );
        }

        #[test]
        fn test_choose_slot_requires_fetched_slot() {
            let mut wizard = at_slot_step();
            assert_err_eq!(
                wizard.choose_slot(TimeSlot::from("18:00")),
                WizardError::UnknownSlot("18:00".to_string())
            );
            assert_ok!(wizard.choose_slot(TimeSlot::from("09:30")));
            assert_some_eq!(wizard.slot(), &TimeSlot::from("09:30"));
        }

        #[test]
        fn test_confirm_requires_slot() {
            let mut wizard = at_slot_step();
            assert!(!wizard.can_confirm());
            assert_err_eq!(wizard.confirm(), WizardError::Incomplete);
            assert_eq!(wizard.step(), WizardStep::ChoosingSlot);
        }

        #[test]
        fn test_confirm_emits_single_exact_request() {
            let mut wizard = at_slot_step();
            assert_ok!(wizard.choose_slot(TimeSlot::from("09:00")));
            assert_ok!(wizard.choose_payment(PaymentMethod::Cartao));
            assert!(wizard.can_confirm());

            let transition = assert_ok!(wizard.confirm());
            assert_eq!(wizard.step(), WizardStep::Submitting);
            let WizardCommand::SubmitBooking { request, .. } = only_command(&transition) else {
                panic!("expected SubmitBooking");
            };
            assert_eq!(request.servico_id, "1");
            assert_eq!(request.barbeiro_id, "10");
            assert_eq!(request.data_horario_iso, "2025-06-01T09:00:00");
            assert_eq!(request.forma_pagamento, PaymentMethod::Cartao);
            assert_none!(&request.user_id);

            // Not confirmable again while submitting.
            assert!(!wizard.can_confirm());
            assert_err!(wizard.confirm());
        }

        #[test]
        fn test_success_notifies_and_completes() {
            let mut wizard = at_slot_step();
            assert_ok!(wizard.choose_slot(TimeSlot::from("09:00")));
            let submit = assert_ok!(wizard.confirm());

            let transition = wizard.apply(WizardEvent::BookingSubmitted {
                ticket: ticket_id(&submit),
                result: Ok(BookingConfirmation::default()),
            });

            assert_eq!(wizard.step(), WizardStep::Succeeded);
            assert_eq!(
                transition.notifications,
                vec![Notification::Success(MSG_BOOKING_CONFIRMED.to_string())]
            );
            let completed = assert_some!(transition.completed);
            assert_eq!(completed.slot, TimeSlot::from("09:00"));
            assert_eq!(completed.service.id, "1");
        }

        #[test]
        fn test_conflict_keeps_selection_and_slot() {
            let mut wizard = at_slot_step();
            assert_ok!(wizard.choose_slot(TimeSlot::from("09:00")));
            let submit = assert_ok!(wizard.confirm());

            let transition = wizard.apply(WizardEvent::BookingSubmitted {
                ticket: ticket_id(&submit),
                result: Err(status(409)),
            });

            assert_eq!(wizard.step(), WizardStep::ChoosingSlot);
            assert_some_eq!(wizard.service().map(|s| s.id.as_str()), "1");
            assert_some_eq!(wizard.barber().map(|b| b.id.as_str()), "10");
            assert_some_eq!(wizard.last_failure(), MSG_SLOT_TAKEN);
            assert_some_eq!(wizard.slot(), &TimeSlot::from("09:00"));
            assert_eq!(
                wizard.slots(),
                &[TimeSlot::from("09:00"), TimeSlot::from("09:30")]
            );
            assert!(wizard.can_confirm());
            assert_eq!(
                transition.notifications,
                vec![Notification::Error(MSG_SLOT_TAKEN.to_string())]
            );
            assert!(transition.commands.is_empty());

            // Picking another slot and confirming again issues a fresh submission.
            assert_ok!(wizard.choose_slot(TimeSlot::from("09:30")));
            let retry = assert_ok!(wizard.confirm());
            assert_matches!(
                only_command(&retry),
                WizardCommand::SubmitBooking { request, .. }
                    if request.data_horario_iso == "2025-06-01T09:30:00"
            );
        }

        #[test]
        fn test_other_failure_keeps_slot_for_retry() {
            let mut wizard = at_slot_step();
            assert_ok!(wizard.choose_slot(TimeSlot::from("09:00")));
            let submit = assert_ok!(wizard.confirm());

            let transition = wizard.apply(WizardEvent::BookingSubmitted {
                ticket: ticket_id(&submit),
                result: Err(status(500)),
            });

            assert_eq!(wizard.step(), WizardStep::ChoosingSlot);
            assert_some!(wizard.slot());
            assert!(wizard.can_confirm());
            assert_eq!(
                transition.notifications,
                vec![Notification::Error(MSG_BOOKING_FAILED.to_string())]
            );
        }

        #[test]
        fn test_list_failures_notify_without_step_change() {
            let (mut wizard, entry) = BookingWizard::new(date(), None, Selection::default());
            let transition = wizard.apply(WizardEvent::ServicesLoaded {
                ticket: ticket_id(&entry),
                result: Err(ApiError::Transport {
                    url: "u".to_string(),
                    reason: "refused".to_string(),
                }),
            });
            assert_eq!(wizard.step(), WizardStep::ChoosingService);
            assert_eq!(
                transition.notifications,
                vec![Notification::Error(MSG_SERVICES_FAILED.to_string())]
            );
        }

        #[test]
        fn test_cancelled_result_is_silent() {
            let (mut wizard, entry) = BookingWizard::new(date(), None, Selection::default());
            let transition = wizard.apply(WizardEvent::ServicesLoaded {
                ticket: ticket_id(&entry),
                result: Err(ApiError::Cancelled),
            });
            assert!(transition.is_empty());
        }

        #[test]
        fn test_set_date_refetches_slots() {
            let mut wizard = at_slot_step();
            assert_ok!(wizard.choose_slot(TimeSlot::from("09:00")));
            let next_day = date().succ_opt().expect("next day");

            let transition = assert_ok!(wizard.set_date(next_day));
            assert_none!(wizard.slot());
            assert_matches!(
                only_command(&transition),
                WizardCommand::LoadSlots { date: d, .. } if *d == next_day
            );
            // Same date again is a no-op.
            assert!(assert_ok!(wizard.set_date(next_day)).is_empty());
        }

        #[test]
        fn test_empty_slot_notice() {
            let seed = Selection {
                service: Some(service("1", "Corte")),
                barber: Some(barber("10", "João")),
            };
            let (mut wizard, entry) = BookingWizard::new(date(), None, seed);
            assert_none!(wizard.slots_notice());
            wizard.apply(WizardEvent::SlotsLoaded {
                ticket: ticket_id(&entry),
                result: Ok(Vec::new()),
            });
            assert_some_eq!(wizard.slots_notice(), MSG_NO_SLOTS);
        }

        #[test]
        fn test_close_cancels_in_flight() {
            let (mut wizard, entry) = BookingWizard::new(date(), None, Selection::default());
            wizard.close();
            assert!(entry.commands[0].ticket().is_cancelled());
        }
    }
}
