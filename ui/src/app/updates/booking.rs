use super::catalog::{barber_row, service_row};
use crate::app::model::Model;
use crate::app::router::Route;
use crate::components::common::{BookingActivityMsg, ComponentId, Msg, PopupActivityMsg};
use crate::components::details_panel::{DetailsPanel, NoteKind};
use crate::components::list_picker::ListPicker;
use crate::error::{AppError, AppResult};
use crate::utils::format::{format_brl, format_duration};
use chrono::{NaiveDate, Utc};
use client::booking::wizard::MSG_BOOKING_CONFIRMED;
use client::booking::{
    BookingWizard, FetchKind, Notification, RecentBooking, Transition, WizardCommand, WizardStep,
};
use tuirealm::terminal::TerminalAdapter;

const MSG_CONFIRM_INCOMPLETE: &str = "Escolha serviço, profissional e horário antes de confirmar.";
const MSG_PAYMENT_UNAVAILABLE: &str = "A forma de pagamento é escolhida junto com o horário.";

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    /// Start a wizard for the active date, seeded from the shared selection.
    pub fn open_wizard(&mut self) -> AppResult<()> {
        self.close_wizard();

        let user_id = self.session.get_user().map(|user| user.id);
        let (wizard, transition) =
            BookingWizard::new(self.calendar.current(), user_id, self.selection.snapshot());
        self.wizard = Some(wizard);
        self.run_transition(transition)
    }

    /// Cancel the wizard's fetches and drop it.
    pub fn close_wizard(&mut self) {
        if let Some(mut wizard) = self.wizard.take() {
            wizard.close();
        }
    }

    pub fn update_booking(&mut self, msg: BookingActivityMsg) -> Option<Msg> {
        if self.state_manager.route != Route::Booking {
            log::debug!("Ignoring {msg:?} outside the booking page");
            return None;
        }
        let Some(wizard) = self.wizard.as_mut() else {
            log::warn!("Booking message without an open wizard: {msg:?}");
            return None;
        };

        let result = match msg {
            BookingActivityMsg::Event(event) => {
                let transition = wizard.apply(event);
                self.run_transition(transition)
            }
            BookingActivityMsg::Confirm => {
                if !wizard.can_confirm() {
                    return Some(Msg::PopupActivity(PopupActivityMsg::ShowWarning(
                        MSG_CONFIRM_INCOMPLETE.to_string(),
                    )));
                }
                match wizard.confirm() {
                    Ok(transition) => self.run_transition(transition),
                    Err(e) => Err(e.into()),
                }
            }
            BookingActivityMsg::CyclePayment => {
                let next = wizard.payment().next_offered();
                match wizard.choose_payment(next) {
                    Ok(()) => self.remount_booking_views(),
                    Err(e) => {
                        log::debug!("Payment change refused: {e}");
                        Err(AppError::State(MSG_PAYMENT_UNAVAILABLE.to_string()))
                    }
                }
            }
        };
        result.err().map(Msg::Error)
    }

    /// Enter on the wizard list: pick the highlighted service, barber or slot.
    pub fn pick_wizard_item(&mut self, index: usize) -> Option<Msg> {
        let wizard = self.wizard.as_mut()?;
        let handle = self.selection.handle();

        let result = match wizard.step() {
            WizardStep::ChoosingService => {
                let service = wizard.services().get(index).cloned()?;
                handle.set_service(Some(service.clone()));
                wizard
                    .select_service(service)
                    .map_err(AppError::from)
                    .and_then(|transition| self.run_transition(transition))
            }
            WizardStep::ChoosingBarber => {
                let barber = wizard.barbers().get(index).cloned()?;
                handle.set_barber(Some(barber.clone()));
                wizard
                    .select_barber(barber)
                    .map_err(AppError::from)
                    .and_then(|transition| self.run_transition(transition))
            }
            WizardStep::ChoosingSlot => {
                let slot = wizard.slots().get(index).cloned()?;
                wizard
                    .choose_slot(slot)
                    .map_err(AppError::from)
                    .and_then(|()| self.remount_booking_views())
            }
            WizardStep::Submitting | WizardStep::Succeeded => Ok(()),
        };
        result.err().map(Msg::Error)
    }

    /// Esc on the wizard list: one step back, or home from the first step.
    pub fn wizard_back(&mut self) -> Option<Msg> {
        let wizard = self.wizard.as_mut()?;
        match wizard.step() {
            WizardStep::ChoosingService | WizardStep::Succeeded => {
                Some(Msg::Navigate(Route::Home))
            }
            WizardStep::Submitting => None,
            WizardStep::ChoosingBarber | WizardStep::ChoosingSlot => {
                let result = wizard
                    .back()
                    .map_err(AppError::from)
                    .and_then(|transition| self.run_transition(transition));
                result.err().map(Msg::Error)
            }
        }
    }

    pub fn change_wizard_date(&mut self, date: NaiveDate) -> AppResult<()> {
        let Some(wizard) = self.wizard.as_mut() else {
            return Ok(());
        };
        match wizard.set_date(date) {
            Ok(transition) => self.run_transition(transition),
            Err(e) => {
                log::debug!("Date change ignored: {e}");
                Ok(())
            }
        }
    }

    /// Hand the wizard's commands to the task pool, show its notifications
    /// and record a completed booking.
    fn run_transition(&mut self, transition: Transition) -> AppResult<()> {
        let Transition {
            commands,
            notifications,
            completed,
        } = transition;

        for command in commands {
            self.dispatch_wizard_command(command);
        }

        if let Some(completed) = completed {
            log::info!(
                "Booking confirmed: {} with {} at {}",
                completed.service.nome,
                completed.barber.nome,
                completed.request.data_horario_iso
            );
            if let Err(e) = self
                .history
                .record(RecentBooking::from_completed(&completed, Utc::now()))
            {
                self.error_reporter
                    .report_warning(e.into(), "BookingHistory", "record");
            }
            self.selection.handle().reset();
        }

        for notification in notifications {
            match notification {
                Notification::Error(message) => {
                    self.mount_error_popup(&AppError::Api(message))?;
                }
                Notification::Success(message) => self.mount_success_popup(&message)?,
                Notification::Info(message) => self.mount_warning_popup(&message)?,
            }
        }

        self.remount_booking_views()
    }

    fn dispatch_wizard_command(&self, command: WizardCommand) {
        let loading = matches!(command, WizardCommand::SubmitBooking { .. })
            .then(|| "Confirmando agendamento...".to_string());
        let token = command.ticket().token().clone();
        let driver = self.driver.clone();

        log::debug!(
            "Dispatching {:?} (ticket {})",
            command.ticket().kind(),
            command.ticket().id()
        );
        self.task_manager.execute_scoped(token, loading, async move {
            driver
                .dispatch(command)
                .await
                .map(|event| Msg::BookingActivity(BookingActivityMsg::Event(event)))
        });
    }

    fn remount_booking_views(&mut self) -> AppResult<()> {
        let Some(wizard) = self.wizard.as_ref() else {
            return Ok(());
        };
        let list = wizard_list(wizard);
        let summary = booking_summary(wizard);

        self.app
            .remount(ComponentId::WizardList, Box::new(list), Vec::default())
            .map_err(|e| AppError::Component(e.to_string()))?;
        self.app
            .remount(ComponentId::BookingSummary, Box::new(summary), Vec::default())
            .map_err(|e| AppError::Component(e.to_string()))?;
        self.activate_component_for_current_state()
    }
}

fn wizard_list(wizard: &BookingWizard) -> ListPicker {
    let step = wizard.step();
    let title = format!(
        "Passo {}/{} · {}",
        step.index() + 1,
        WizardStep::LABELS.len(),
        WizardStep::LABELS[step.index()]
    );

    match step {
        WizardStep::ChoosingService => {
            let rows = wizard.services().iter().map(service_row).collect();
            ListPicker::new(ComponentId::WizardList, title, rows).with_placeholder(
                if wizard.is_loading(FetchKind::Services) {
                    "Carregando serviços..."
                } else {
                    "Nenhum serviço disponível."
                },
            )
        }
        WizardStep::ChoosingBarber => {
            let rows = wizard.barbers().iter().map(barber_row).collect();
            ListPicker::new(ComponentId::WizardList, title, rows).with_placeholder(
                if wizard.is_loading(FetchKind::Barbers) {
                    "Carregando barbeiros..."
                } else {
                    "Nenhum barbeiro disponível."
                },
            )
        }
        WizardStep::ChoosingSlot => {
            let chosen = wizard.slot();
            let rows = wizard
                .slots()
                .iter()
                .map(|slot| {
                    let mark = if Some(slot) == chosen { "●" } else { "○" };
                    format!("{mark} {slot}")
                })
                .collect();
            let placeholder = if wizard.is_loading(FetchKind::Slots) {
                "Carregando horários..."
            } else {
                wizard
                    .slots_notice()
                    .or(wizard.last_failure())
                    .unwrap_or("Sem horários disponíveis para esta data.")
            };
            let selected = chosen
                .and_then(|slot| wizard.slots().iter().position(|s| s == slot))
                .unwrap_or(0);
            ListPicker::new(ComponentId::WizardList, title, rows)
                .with_placeholder(placeholder)
                .with_selected(selected)
        }
        WizardStep::Submitting => ListPicker::new(ComponentId::WizardList, title, Vec::new())
            .with_placeholder("Confirmando agendamento..."),
        WizardStep::Succeeded => ListPicker::new(ComponentId::WizardList, title, Vec::new())
            .with_placeholder(MSG_BOOKING_CONFIRMED),
    }
}

fn booking_summary(wizard: &BookingWizard) -> DetailsPanel {
    let current = wizard.step().index();
    let steps = WizardStep::LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if i == current {
                format!("[{} {label}]", i + 1)
            } else {
                format!("{} {label}", i + 1)
            }
        })
        .collect::<Vec<_>>()
        .join(" › ");

    let service = wizard.service().map_or_else(
        || "-".to_string(),
        |s| {
            format!(
                "{} · {} · {}",
                s.nome,
                format_brl(s.preco),
                format_duration(s.duracao)
            )
        },
    );
    let barber = wizard.barber().map_or("-", |b| b.nome.as_str()).to_string();
    let slot = wizard.slot().map_or("-", |s| s.as_str()).to_string();

    let mut panel = DetailsPanel::new("Seu agendamento")
        .row("Etapas", steps)
        .row("Serviço", service)
        .row("Profissional", barber)
        .row("Data", wizard.date().format("%d/%m/%Y").to_string())
        .row("Horário", slot)
        .row("Pagamento", wizard.payment().label());

    if let Some(failure) = wizard.last_failure() {
        panel = panel.note(NoteKind::Error, failure);
    }
    if wizard.can_confirm() {
        panel = panel.note(NoteKind::Muted, "Tudo pronto: confirme para agendar.");
    } else if wizard.step() == WizardStep::ChoosingSlot {
        panel = panel.note(NoteKind::Muted, "Escolha um horário disponível.");
    }
    panel
}
