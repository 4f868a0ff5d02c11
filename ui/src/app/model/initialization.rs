use super::{Catalog, Model};
use crate::app::managers::StateManager;
use crate::app::router::Route;
use crate::app::task_manager::TaskManager;
use crate::components::common::{ComponentId, Msg};
use crate::components::global_key_watcher::GlobalKeyWatcher;
use crate::components::text_label::TextLabel;
use crate::config;
use crate::error::{AppError, AppResult, ErrorReporter};
use chrono::NaiveDate;
use client::api::{ApiGateway, BarberShopBackend, GatewayConfig, HttpBackend, TokenSource};
use client::auth::AuthService;
use client::booking::{BookingCalendar, RecentBookings, WizardDriver};
use client::selection::SelectionContext;
use client::session::{FileSessionStorage, MemorySessionStorage, SessionStorage, SessionStore};
use client::taskpool::TaskPool;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;
use tuirealm::event::NoUserEvent;
use tuirealm::terminal::{CrosstermTerminalAdapter, TerminalAdapter, TerminalBridge};
use tuirealm::{Application, EventListenerCfg, Sub, SubClause, SubEventClause};

/// Slack on top of the transport timeout before the UI gives up on a task.
const TASK_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

/// Startup choices taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct ModelOptions {
    pub route: Route,
    pub date: Option<NaiveDate>,
    /// Keep the session and booking history in memory only.
    pub ephemeral: bool,
}

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    fn init_app() -> AppResult<Application<ComponentId, Msg, NoUserEvent>> {
        let config = config::get_config_or_panic();
        let mut app: Application<ComponentId, Msg, NoUserEvent> = Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(
                    config.crossterm_input_listener_interval(),
                    config.crossterm_input_listener_retries(),
                )
                .poll_timeout(config.poll_timeout())
                .tick_interval(config.tick_interval()),
        );

        app.mount(
            ComponentId::TextLabel,
            Box::new(TextLabel::new("BarberBook".to_string())),
            Vec::default(),
        )
        .map_err(|e| AppError::Component(e.to_string()))?;

        app.mount(
            ComponentId::GlobalKeyWatcher,
            Box::new(GlobalKeyWatcher::default()),
            vec![Sub::new(SubEventClause::Any, SubClause::Always)],
        )
        .map_err(|e| AppError::Component(e.to_string()))?;

        Ok(app)
    }
}

impl Model<CrosstermTerminalAdapter> {
    pub fn new(options: ModelOptions) -> AppResult<Self> {
        let config = config::get_config_or_panic();

        let storage: Box<dyn SessionStorage> = if options.ephemeral {
            log::info!("Ephemeral mode: session and history stay in memory");
            Box::new(MemorySessionStorage::new())
        } else {
            Box::new(FileSessionStorage::new(config.session().file()))
        };
        let session = Arc::new(SessionStore::open(storage));
        let session_rx = session.subscribe();

        let history = if options.ephemeral {
            RecentBookings::in_memory(config.session().history_limit())
        } else {
            RecentBookings::open(
                config.session().history_file(),
                config.session().history_limit(),
            )
        };

        let gateway = ApiGateway::new(GatewayConfig::new(
            config.api().base_url(),
            config.api().request_timeout(),
        ))?
        .with_token_source(session.clone() as Arc<dyn TokenSource>);
        let backend: Arc<dyn BarberShopBackend> = Arc::new(HttpBackend::new(gateway));
        log::info!("Booking backend at {}", config.api().base_url());

        let (tx_to_main, rx_to_main) = mpsc::channel();
        let taskpool = Arc::new(TaskPool::new(config.task_pool_size()));

        // Create error reporter for enhanced error handling
        let error_reporter = ErrorReporter::new(tx_to_main.clone());

        // Create task manager for consistent async operations
        let task_manager = TaskManager::new(
            taskpool.clone(),
            tx_to_main,
            error_reporter.clone(),
            config.api().request_timeout() + TASK_TIMEOUT_SLACK,
        );

        let mut calendar = BookingCalendar::new(chrono::Local::now().date_naive());
        if let Some(date) = options.date {
            if !calendar.set(date) {
                log::warn!(
                    "Ignoring start date {date}: bookings open on {}",
                    calendar.earliest()
                );
            }
        }

        let mut model = Self {
            app: Self::init_app()?,
            terminal: TerminalBridge::init_crossterm()
                .map_err(|e| AppError::Component(e.to_string()))?,
            state_manager: StateManager::new(),
            taskpool,
            rx_to_main,
            error_reporter,
            task_manager,
            auth: AuthService::new(backend.clone(), session.clone()),
            driver: WizardDriver::new(backend.clone()),
            backend,
            session,
            selection: SelectionContext::new(),
            calendar,
            wizard: None,
            history,
            catalog: Catalog::default(),
            profile: None,
            session_rx,
        };

        model.navigate(options.route)?;
        Ok(model)
    }
}
