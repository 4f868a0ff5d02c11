//! Booking wizard driven end to end through a scripted backend.

use async_trait::async_trait;
use chrono::NaiveDate;
use claims::*;
use client::api::BarberShopBackend;
use client::booking::{
    BookingWizard, Notification, Transition, WizardCommand, WizardDriver, WizardStep,
};
use client::common::{ApiError, ApiResult};
use client::model::{
    Barber, BookingConfirmation, BookingRequest, CustomerDetails, CustomerPublic, CustomerUpdate,
    LoginRequest, LoginResponse, PaymentMethod, RegisterRequest, Service, TimeSlot,
};
use client::selection::{Selection, SelectionContext};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

#[derive(Default)]
struct ScriptedBackend {
    services: Vec<Service>,
    barbers: Vec<Barber>,
    slots: HashMap<String, Vec<TimeSlot>>,
    held_barber: Option<(String, Arc<Notify>)>,
    booking_status: Option<u16>,
    submitted: Mutex<Vec<BookingRequest>>,
}

impl ScriptedBackend {
    fn submitted(&self) -> Vec<BookingRequest> {
        self.submitted.lock().expect("submitted lock").clone()
    }
}

#[async_trait]
impl BarberShopBackend for ScriptedBackend {
    async fn list_services(&self, _cancel: &CancellationToken) -> ApiResult<Vec<Service>> {
        Ok(self.services.clone())
    }

    async fn list_barbers(&self, _cancel: &CancellationToken) -> ApiResult<Vec<Barber>> {
        Ok(self.barbers.clone())
    }

    async fn availability(
        &self,
        barber_id: &str,
        _date: NaiveDate,
        _cancel: &CancellationToken,
    ) -> ApiResult<Vec<TimeSlot>> {
        if let Some((held, gate)) = &self.held_barber {
            if held == barber_id {
                gate.notified().await;
            }
        }
        Ok(self.slots.get(barber_id).cloned().unwrap_or_default())
    }

    async fn create_booking(
        &self,
        request: &BookingRequest,
        _cancel: &CancellationToken,
    ) -> ApiResult<BookingConfirmation> {
        self.submitted
            .lock()
            .expect("submitted lock")
            .push(request.clone());
        match self.booking_status {
            Some(status) => Err(ApiError::Status {
                method: "POST".to_string(),
                url: "/agendamentos".to_string(),
                status,
                body: String::new(),
            }),
            None => Ok(BookingConfirmation::default()),
        }
    }

    async fn get_customer(&self, _id: &str, _c: &CancellationToken) -> ApiResult<CustomerPublic> {
        unimplemented!("not used by the wizard")
    }

    async fn get_customer_details(
        &self,
        _id: &str,
        _c: &CancellationToken,
    ) -> ApiResult<CustomerDetails> {
        unimplemented!("not used by the wizard")
    }

    async fn update_customer(
        &self,
        _id: &str,
        _u: &CustomerUpdate,
        _c: &CancellationToken,
    ) -> ApiResult<CustomerPublic> {
        unimplemented!("not used by the wizard")
    }

    async fn login(&self, _r: &LoginRequest, _c: &CancellationToken) -> ApiResult<LoginResponse> {
        unimplemented!("not used by the wizard")
    }

    async fn register(
        &self,
        _r: &RegisterRequest,
        _c: &CancellationToken,
    ) -> ApiResult<LoginResponse> {
        unimplemented!("not used by the wizard")
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

fn corte() -> Service {
    Service {
        id: "1".to_string(),
        nome: "Corte".to_string(),
        duracao: 30,
        preco: 30.0,
    }
}

fn barber(id: &str, nome: &str) -> Barber {
    Barber {
        id: id.to_string(),
        nome: nome.to_string(),
        telefone: None,
        foto_url: None,
    }
}

fn shop() -> ScriptedBackend {
    ScriptedBackend {
        services: vec![corte()],
        barbers: vec![barber("10", "João"), barber("11", "Pedro")],
        slots: HashMap::from([
            ("10".to_string(), vec![TimeSlot::from("09:00"), TimeSlot::from("09:30")]),
            ("11".to_string(), vec![TimeSlot::from("14:00")]),
        ]),
        ..ScriptedBackend::default()
    }
}

/// Run every command of `transition` and feed the events back.
async fn settle(wizard: &mut BookingWizard, driver: &WizardDriver, transition: Transition) -> Vec<Notification> {
    let mut notifications = transition.notifications;
    let mut pending = transition.commands;
    while let Some(command) = pending.pop() {
        if let Some(event) = driver.dispatch(command).await {
            let next = wizard.apply(event);
            notifications.extend(next.notifications);
            pending.extend(next.commands);
        }
    }
    notifications
}

#[tokio::test]
async fn test_full_booking_posts_exact_request() {
    let backend = Arc::new(shop());
    let driver = WizardDriver::new(backend.clone());

    let (mut wizard, entry) = BookingWizard::new(date(), Some("7".to_string()), Selection::default());
    settle(&mut wizard, &driver, entry).await;
    assert_eq!(wizard.services(), &[corte()]);

    let t = assert_ok!(wizard.select_service(corte()));
    settle(&mut wizard, &driver, t).await;
    assert_eq!(wizard.barbers().len(), 2);

    let t = assert_ok!(wizard.select_barber(barber("10", "João")));
    settle(&mut wizard, &driver, t).await;
    assert_ok!(wizard.choose_slot(TimeSlot::from("09:00")));
    assert_ok!(wizard.choose_payment(PaymentMethod::Dinheiro));

    let t = assert_ok!(wizard.confirm());
    let notifications = settle(&mut wizard, &driver, t).await;

    assert_eq!(wizard.step(), WizardStep::Succeeded);
    assert!(matches!(notifications.as_slice(), [Notification::Success(_)]));

    let submitted = backend.submitted();
    assert_eq!(submitted.len(), 1);
    let wire = serde_json::to_value(&submitted[0]).expect("serialize request");
    assert_eq!(
        wire,
        serde_json::json!({
            "userId": "7",
            "servicoId": "1",
            "barbeiroId": "10",
            "dataHorarioIso": "2025-06-01T09:00:00",
            "formaPagamento": "DINHEIRO"
        })
    );
}

#[tokio::test]
async fn test_late_first_barber_result_does_not_win() {
    let gate = Arc::new(Notify::new());
    let backend = Arc::new(ScriptedBackend {
        held_barber: Some(("10".to_string(), gate.clone())),
        ..shop()
    });
    let driver = WizardDriver::new(backend.clone());
    let seed = Selection {
        service: Some(corte()),
        barber: None,
    };
    let (mut wizard, entry) = BookingWizard::new(date(), None, seed);
    settle(&mut wizard, &driver, entry).await;

    // B1: its availability call hangs until released.
    let first = assert_ok!(wizard.select_barber(barber("10", "João")));
    let first_command = first.commands.into_iter().next().expect("LoadSlots for B1");
    let slow_driver = driver.clone();
    let late = tokio::spawn(async move { slow_driver.dispatch(first_command).await });

    // B2 resolves first.
    let t = assert_ok!(wizard.back());
    settle(&mut wizard, &driver, t).await;
    let t = assert_ok!(wizard.select_barber(barber("11", "Pedro")));
    settle(&mut wizard, &driver, t).await;
    assert_eq!(wizard.slots(), &[TimeSlot::from("14:00")]);

    gate.notify_one();
    let late_event = late.await.expect("join late fetch");
    if let Some(event) = late_event {
        assert!(wizard.apply(event).is_empty());
    }
    assert_eq!(wizard.slots(), &[TimeSlot::from("14:00")]);
}

#[tokio::test]
async fn test_conflict_keeps_service_and_barber() {
    let backend = Arc::new(ScriptedBackend {
        booking_status: Some(409),
        ..shop()
    });
    let driver = WizardDriver::new(backend.clone());

    let context = SelectionContext::new();
    let handle = context.handle();
    handle.set_service(Some(corte()));
    handle.set_barber(Some(barber("10", "João")));

    let (mut wizard, entry) = BookingWizard::new(date(), None, handle.snapshot());
    assert_eq!(wizard.step(), WizardStep::ChoosingSlot);
    settle(&mut wizard, &driver, entry).await;

    assert_ok!(wizard.choose_slot(TimeSlot::from("09:00")));
    let t = assert_ok!(wizard.confirm());
    let notifications = settle(&mut wizard, &driver, t).await;

    assert_eq!(wizard.step(), WizardStep::ChoosingSlot);
    assert_some_eq!(wizard.service(), &corte());
    assert_some_eq!(wizard.barber().map(|b| b.id.as_str()), "10");
    assert_eq!(
        notifications,
        vec![Notification::Error(
            "Esse horário acabou de ficar indisponível. Tente outro.".to_string()
        )]
    );
    assert_eq!(wizard.slots().len(), 2);
    assert_some_eq!(wizard.slot(), &TimeSlot::from("09:00"));
    assert!(wizard.can_confirm());
    assert_eq!(backend.submitted().len(), 1);
}

#[tokio::test]
async fn test_closed_wizard_commands_are_not_dispatched() {
    let backend = Arc::new(shop());
    let driver = WizardDriver::new(backend);
    let (mut wizard, entry) = BookingWizard::new(date(), None, Selection::default());

    wizard.close();
    for command in entry.commands {
        assert!(matches!(command, WizardCommand::LoadServices { .. }));
        assert_none!(driver.dispatch(command).await);
    }
}
