use crate::app::managers::StateManager;
use crate::app::task_manager::TaskManager;
use crate::components::common::{ComponentId, Msg};
use crate::error::ErrorReporter;
use client::api::BarberShopBackend;
use client::auth::AuthService;
use client::booking::{BookingCalendar, BookingWizard, RecentBookings, WizardDriver};
use client::model::{Barber, CustomerDetails, Service, UserView};
use client::selection::SelectionContext;
use client::session::SessionStore;
use client::taskpool::TaskPool;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use tokio::sync::watch;
use tuirealm::event::NoUserEvent;
use tuirealm::terminal::{TerminalAdapter, TerminalBridge};
use tuirealm::{Application, Update};

mod initialization;
mod popup_management;
mod state_management;
mod update_handler;

pub use initialization::ModelOptions;

/// Reference data shown on the services and barbers pages.
#[derive(Debug, Default)]
pub struct Catalog {
    pub services: Vec<Service>,
    pub barbers: Vec<Barber>,
}

/// Application model
pub struct Model<T>
where
    T: TerminalAdapter,
{
    /// Application
    pub app: Application<ComponentId, Msg, NoUserEvent>,
    /// Used to draw to terminal
    pub terminal: TerminalBridge<T>,

    pub state_manager: StateManager,

    pub taskpool: Arc<TaskPool>,
    pub rx_to_main: Receiver<Msg>,
    pub error_reporter: ErrorReporter,
    pub task_manager: TaskManager,

    pub backend: Arc<dyn BarberShopBackend>,
    pub session: Arc<SessionStore>,
    pub auth: AuthService,
    pub driver: WizardDriver,

    /// Root owner of the service/barber selection; pages get handles.
    pub selection: SelectionContext,
    pub calendar: BookingCalendar,
    /// Present only while the booking route is shown.
    pub wizard: Option<BookingWizard>,
    pub history: RecentBookings,
    pub catalog: Catalog,
    pub profile: Option<CustomerDetails>,

    session_rx: watch::Receiver<Option<UserView>>,
}

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    pub fn update_outside_msg(&mut self) {
        // Session changes made by background tasks
        if self.session_rx.has_changed().unwrap_or(false) {
            let user = self.session_rx.borrow_and_update().clone();
            let mut msg = Some(Msg::SessionChanged(user));
            while msg.is_some() {
                msg = self.update(msg);
            }
        }

        // Handle messages sent from background tasks
        while let Ok(msg) = self.rx_to_main.try_recv() {
            let mut msg = Some(msg);
            while msg.is_some() {
                msg = self.update(msg);
            }
        }
    }

    /// Shutdown the application and clean up resources
    pub fn shutdown(&mut self) {
        log::info!("Shutting down application");

        if let Some(mut wizard) = self.wizard.take() {
            wizard.close();
        }
        for operation in self.task_manager.get_active_operations() {
            self.task_manager.cancel_operation(&operation);
        }

        self.state_manager.shutdown();
    }

    pub fn set_redraw(&mut self, redraw: bool) {
        self.state_manager.set_redraw(redraw);
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

impl<T> Update<Msg> for Model<T>
where
    T: TerminalAdapter,
{
    fn update(&mut self, msg: Option<Msg>) -> Option<Msg> {
        self.handle_update(msg)
    }
}
