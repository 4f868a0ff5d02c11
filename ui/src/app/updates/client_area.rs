use super::surface;
use crate::app::model::Model;
use crate::app::router::Route;
use crate::components::common::{ClientAreaActivityMsg, ComponentId, Msg, PopupActivityMsg};
use crate::components::details_panel::{DetailsPanel, NoteKind};
use crate::components::input_form::FormKind;
use crate::components::list_picker::ListPicker;
use crate::error::{AppError, AppResult};
use crate::utils::format::{digits_only, format_brl, mask_cpf, mask_phone};
use client::model::{CustomerPublic, CustomerUpdate};
use client::session::SessionData;
use tuirealm::terminal::TerminalAdapter;

const LOAD_PROFILE: &str = "load_profile";
const SAVE_PROFILE: &str = "save_profile";
const MSG_PROFILE_FAILED: &str = "Falha ao carregar dados do cliente.";
const MSG_PROFILE_SAVE_FAILED: &str = "Falha ao salvar seus dados.";
const MSG_PROFILE_SAVED: &str = "Dados atualizados com sucesso.";
const MSG_PROFILE_NOT_LOADED: &str = "Aguarde o carregamento dos seus dados.";

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    pub fn enter_client_area(&mut self) -> AppResult<()> {
        self.remount_profile_panel()?;
        self.remount_recent_bookings()?;
        self.load_profile();
        Ok(())
    }

    fn load_profile(&self) {
        let Some(user) = self.session.get_user() else {
            return;
        };
        let backend = self.backend.clone();
        let tx = self.task_manager.sender();
        self.task_manager.execute_cancellable(
            LOAD_PROFILE,
            "Carregando seus dados...",
            move |token| async move {
                match backend.get_customer_details(&user.id, &token).await {
                    Ok(details) => tx
                        .send(Msg::ClientAreaActivity(
                            ClientAreaActivityMsg::ProfileLoaded(details),
                        ))
                        .map_err(|e| AppError::Channel(e.to_string())),
                    Err(e) => surface(e, MSG_PROFILE_FAILED),
                }
            },
        );
    }

    pub fn update_client_area(&mut self, msg: ClientAreaActivityMsg) -> Option<Msg> {
        let result = match msg {
            ClientAreaActivityMsg::ProfileLoaded(details) => {
                log::debug!("Profile loaded for {}", details.id);
                self.profile = Some(details);
                self.remount_if_on_client_area()
            }
            ClientAreaActivityMsg::ProfileSaved(public) => self.apply_saved_profile(public),
            ClientAreaActivityMsg::EditProfile => {
                if self.state_manager.route != Route::ClientArea
                    || self.state_manager.form.is_some()
                {
                    return None;
                }
                if self.profile.is_none() {
                    return Some(Msg::PopupActivity(PopupActivityMsg::ShowWarning(
                        MSG_PROFILE_NOT_LOADED.to_string(),
                    )));
                }
                self.open_form(FormKind::Profile)
            }
        };
        result.err().map(Msg::Error)
    }

    /// Send the edited name, email and phone. `values` come from the
    /// profile form in field order.
    pub fn submit_profile(&mut self, values: Vec<String>) -> AppResult<()> {
        let [nome, email, telefone]: [String; 3] = values
            .try_into()
            .map_err(|_| AppError::State("Formulário de perfil incompleto.".to_string()))?;
        let Some(profile) = self.profile.as_ref() else {
            return Err(AppError::State(MSG_PROFILE_NOT_LOADED.to_string()));
        };

        let id = profile.id.clone();
        let update = CustomerUpdate {
            nome,
            email,
            telefone: digits_only(&telefone),
        };
        let backend = self.backend.clone();
        let tx = self.task_manager.sender();

        self.task_manager.execute_cancellable(
            SAVE_PROFILE,
            "Salvando seus dados...",
            move |token| async move {
                let public = match backend.update_customer(&id, &update, &token).await {
                    Ok(public) => public,
                    Err(e) => return surface(e, MSG_PROFILE_SAVE_FAILED),
                };

                // Reload first so the session picks up the stored email and phone
                match backend.get_customer_details(&id, &token).await {
                    Ok(details) => tx
                        .send(Msg::ClientAreaActivity(
                            ClientAreaActivityMsg::ProfileLoaded(details),
                        ))
                        .map_err(|e| AppError::Channel(e.to_string()))?,
                    Err(e) => log::warn!("Profile reload after save failed: {e}"),
                }
                tx.send(Msg::ClientAreaActivity(
                    ClientAreaActivityMsg::ProfileSaved(public),
                ))
                .map_err(|e| AppError::Channel(e.to_string()))
            },
        );
        Ok(())
    }

    fn apply_saved_profile(&mut self, public: CustomerPublic) -> AppResult<()> {
        log::info!("Profile {} updated", public.id);
        self.close_form()?;

        // Keep the stored session in step so the header shows the new name
        if let Some(SessionData { token, mut user }) = self.session.session() {
            if user.id == public.id {
                user.nome = public.nome;
                if let Some(profile) = &self.profile {
                    user.email = profile.email.clone();
                    user.telefone = profile.telefone.clone();
                }
                if let Err(e) = self.session.save(SessionData { token, user }) {
                    self.error_reporter
                        .report_warning(e.into(), "ClientArea", "save_session");
                }
            }
        }

        self.mount_success_popup(MSG_PROFILE_SAVED)
    }

    /// Enter on a recent booking: preselect its service and barber and
    /// open the wizard at the slot step.
    pub fn rebook(&mut self, index: usize) -> Option<Msg> {
        let entry = self.history.entries().get(index)?.clone();
        log::info!(
            "Rebooking {} with {}",
            entry.service.nome,
            entry.barber.nome
        );
        let handle = self.selection.handle();
        handle.set_service(Some(entry.service));
        handle.set_barber(Some(entry.barber));
        Some(Msg::Navigate(Route::Booking))
    }

    fn remount_if_on_client_area(&mut self) -> AppResult<()> {
        if self.state_manager.route == Route::ClientArea {
            self.remount_profile_panel()?;
        }
        Ok(())
    }

    fn remount_profile_panel(&mut self) -> AppResult<()> {
        let panel = match &self.profile {
            Some(profile) => DetailsPanel::new("Meus dados")
                .row("Nome", profile.nome.clone())
                .row("Email", profile.email.clone())
                .row("Telefone", mask_phone(&profile.telefone))
                .row(
                    "CPF",
                    if profile.cpf.is_empty() {
                        "-".to_string()
                    } else {
                        mask_cpf(&profile.cpf)
                    },
                ),
            None => DetailsPanel::new("Meus dados").note(NoteKind::Muted, "Carregando..."),
        };

        self.app
            .remount(ComponentId::ProfilePanel, Box::new(panel), Vec::default())
            .map_err(|e| AppError::Component(e.to_string()))?;
        Ok(())
    }

    fn remount_recent_bookings(&mut self) -> AppResult<()> {
        let rows = self
            .history
            .entries()
            .iter()
            .map(|entry| {
                format!(
                    "{} · {} · {} (último: {})",
                    entry.service.nome,
                    entry.barber.nome,
                    format_brl(entry.service.preco),
                    entry.booked_at.format("%d/%m/%Y")
                )
            })
            .collect();
        let list = ListPicker::new(ComponentId::RecentBookings, "Agendar novamente", rows)
            .with_placeholder("Você ainda não tem agendamentos recentes.");

        self.app
            .remount(ComponentId::RecentBookings, Box::new(list), Vec::default())
            .map_err(|e| AppError::Component(e.to_string()))?;
        self.activate_component_for_current_state()
    }
}
