use super::auth::first_name;
use crate::app::model::Model;
use crate::app::router::{self, Route};
use crate::components::common::{ComponentId, ListActivityMsg, Msg, PopupActivityMsg};
use crate::components::input_form::FormKind;
use crate::components::text_label::TextLabel;
use crate::error::{AppError, AppResult};
use client::booking::{BookingWizard, WizardStep};
use client::model::UserView;
use tuirealm::terminal::TerminalAdapter;

const MSG_SUBMISSION_PENDING: &str = "Aguarde a confirmação do agendamento.";

/// Components that belong to a single page and go away when it is left.
const PAGE_COMPONENTS: [ComponentId; 8] = [
    ComponentId::CalendarPicker,
    ComponentId::ServiceList,
    ComponentId::BarberList,
    ComponentId::WizardList,
    ComponentId::BookingSummary,
    ComponentId::ProfilePanel,
    ComponentId::RecentBookings,
    ComponentId::InputForm,
];

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    pub fn update_navigation(&mut self, route: Route) -> Option<Msg> {
        let step = self.wizard.as_ref().map(BookingWizard::step);
        if submission_pending(self.state_manager.route, route, step) {
            log::info!("Staying on the booking page until the submission settles");
            return Some(Msg::PopupActivity(PopupActivityMsg::ShowWarning(
                MSG_SUBMISSION_PENDING.to_string(),
            )));
        }

        match self.navigate(route) {
            Ok(()) => None,
            Err(e) => Some(Msg::Error(e)),
        }
    }

    /// Show `requested`, or the login page when it needs a session we do
    /// not have.
    pub fn navigate(&mut self, requested: Route) -> AppResult<()> {
        let route = router::resolve(requested, self.is_authenticated());
        if route == Route::Login && requested != Route::Login {
            self.state_manager.after_login = Some(requested);
        }

        let page_mounted = self.app.mounted(&self.state_manager.page_focus());
        if route == self.state_manager.route && page_mounted {
            log::debug!("Already on {route}");
            return Ok(());
        }

        self.leave_page()?;
        self.state_manager.set_route(route);

        match route {
            Route::Home => self.mount_home()?,
            Route::Services => self.enter_services()?,
            Route::Barbers => self.enter_barbers()?,
            Route::Booking => self.open_wizard()?,
            Route::ClientArea => self.enter_client_area()?,
            Route::Login => self.open_form(FormKind::Login)?,
        }

        self.refresh_header()?;
        self.activate_component_for_current_state()
    }

    fn leave_page(&mut self) -> AppResult<()> {
        self.close_wizard();
        self.close_form()?;

        for id in PAGE_COMPONENTS {
            if self.app.mounted(&id) {
                self.app
                    .umount(&id)
                    .map_err(|e| AppError::Component(e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Header line: page title and who is signed in.
    pub fn refresh_header(&mut self) -> AppResult<()> {
        let title = self.state_manager.route.title();
        let text = match self.session.get_user() {
            Some(user) => format!("✂ BarberBook · {title} · Olá, {}", first_name(&user.nome)),
            None => format!("✂ BarberBook · {title}"),
        };

        self.app
            .remount(
                ComponentId::TextLabel,
                Box::new(TextLabel::new(text)),
                Vec::default(),
            )
            .map_err(|e| AppError::Component(e.to_string()))?;
        Ok(())
    }

    pub fn update_session(&mut self, user: Option<UserView>) -> Option<Msg> {
        log::info!(
            "Session changed: {}",
            user.as_ref().map_or("signed out", |u| u.email.as_str())
        );

        if user.is_none() {
            self.profile = None;
            // A guarded page cannot stay open without a session
            if self.state_manager.route.requires_auth() {
                return self.update_navigation(self.state_manager.route);
            }
        }

        if let Err(e) = self.refresh_header() {
            return Some(Msg::Error(e));
        }
        None
    }

    pub fn update_list(&mut self, msg: ListActivityMsg) -> Option<Msg> {
        match msg {
            ListActivityMsg::Picked { list, index } => match list {
                ComponentId::ServiceList => self.pick_catalog_service(index),
                ComponentId::BarberList => self.pick_catalog_barber(index),
                ComponentId::WizardList => self.pick_wizard_item(index),
                ComponentId::RecentBookings => self.rebook(index),
                other => {
                    log::warn!("Pick from unexpected list {other:?}");
                    None
                }
            },
            ListActivityMsg::Back(ComponentId::WizardList) => self.wizard_back(),
            ListActivityMsg::Back(_) => Some(Msg::Navigate(Route::Home)),
        }
    }
}

/// Leaving the booking page drops the wizard, which would cancel a booking
/// POST the server may already be processing.
fn submission_pending(current: Route, requested: Route, step: Option<WizardStep>) -> bool {
    current == Route::Booking && requested != Route::Booking && step == Some(WizardStep::Submitting)
}
