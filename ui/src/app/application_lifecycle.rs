//! Application lifecycle management
//!
//! Start-up (configuration, model), the main loop and shutdown, kept out of
//! `main.rs` so every step reports errors the same way.

use crate::app::model::{Model, ModelOptions};
use crate::components::common::{ComponentId, Msg};
use crate::config::{self, AppConfig, ConfigValidationError};
use crate::error::{AppError, ErrorReporter};

use log::{debug, error, info};
use std::error::Error as StdError;
use tuirealm::application::PollStrategy;
use tuirealm::terminal::CrosstermTerminalAdapter;
use tuirealm::{AttrValue, Attribute, Update};

/// Shows configuration errors in the TUI and waits until the user closes
/// the popup.
pub struct ConfigErrorDisplay {
    model: Model<CrosstermTerminalAdapter>,
}

impl ConfigErrorDisplay {
    pub fn new(validation_errors: &[ConfigValidationError]) -> Result<Self, Box<dyn StdError>> {
        // Nothing is written to disk while the configuration is broken
        let options = ModelOptions {
            ephemeral: true,
            ..ModelOptions::default()
        };
        let mut model = Model::new(options)
            .map_err(|e| format!("Failed to initialize model for error display: {e}"))?;

        if let Some(first_error) = validation_errors.first() {
            let error_message = first_error.user_message();
            error!("Configuration error: {error_message}");

            if let Err(e) = model.mount_error_popup(&AppError::Config(error_message)) {
                error!("Failed to mount configuration error popup: {e}");
            }
        }

        for (i, validation_error) in validation_errors.iter().enumerate() {
            error!("Config validation error {}: {validation_error}", i + 1);
        }

        Ok(Self { model })
    }

    pub fn show_and_wait_for_acknowledgment(&mut self) -> Result<(), Box<dyn StdError>> {
        info!("Configuration validation failed. Exiting once the error is acknowledged.");

        ApplicationLifecycle::setup_terminal(&mut self.model)?;
        if let Err(e) = self.model.view() {
            error!("Error during error popup rendering: {e}");
        }

        while !self.model.state_manager.should_quit() {
            match self.model.app.tick(PollStrategy::Once) {
                Err(err) => {
                    error!("Application tick error during error display: {err}");
                    break;
                }
                Ok(messages) if !messages.is_empty() => {
                    for msg in messages {
                        let mut msg = Some(msg);
                        while msg.is_some() {
                            msg = self.model.update(msg);
                        }
                    }

                    if !self.model.app.mounted(&ComponentId::ErrorPopup) {
                        info!("Configuration error popup closed by user");
                        break;
                    }

                    if let Err(e) = self.model.view() {
                        error!("Error during view rendering: {e}");
                        break;
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    pub fn shutdown(self) {
        info!("Terminating application due to configuration errors");
        if let Err(e) = ApplicationLifecycle::shutdown_application(self.model) {
            error!("Failed to restore the terminal: {e}");
        }
    }
}

pub struct ApplicationLifecycle;

impl ApplicationLifecycle {
    /// Load and validate the configuration, then build the model.
    pub fn initialize(
        options: ModelOptions,
    ) -> Result<Model<CrosstermTerminalAdapter>, Box<dyn StdError>> {
        info!("Starting BarberBook");

        let config = Self::load_configuration()?;
        Self::validate_configuration(config)?;
        info!(
            "Configuration loaded and validated, backend at {}",
            config.api().base_url()
        );

        Self::create_model(options)
    }

    fn load_configuration() -> Result<&'static AppConfig, Box<dyn StdError>> {
        match config::get_config() {
            config::ConfigLoadResult::Success(config) => Ok(config.as_ref()),
            config::ConfigLoadResult::LoadError(error) => {
                Self::report_critical_error(
                    AppError::Config(error.clone()),
                    "ConfigurationLoader",
                    "load_config",
                    "Configuration loading failed. The application cannot start without a valid configuration.",
                );
                Err(error.clone().into())
            }
            config::ConfigLoadResult::DeserializeError(error) => {
                Self::report_critical_error(
                    AppError::Config(error.clone()),
                    "ConfigurationParser",
                    "parse_config",
                    "Configuration parsing failed. Please fix your configuration syntax and try again.",
                );
                Err(error.clone().into())
            }
        }
    }

    fn validate_configuration(config: &AppConfig) -> Result<(), Box<dyn StdError>> {
        if let Err(validation_errors) = config.validate() {
            error!(
                "Configuration validation failed with {} errors",
                validation_errors.len()
            );
            Self::show_config_error_and_exit(&validation_errors)?;
            return Err("Configuration validation failed".into());
        }
        Ok(())
    }

    fn create_model(
        options: ModelOptions,
    ) -> Result<Model<CrosstermTerminalAdapter>, Box<dyn StdError>> {
        match Model::new(options) {
            Ok(model) => {
                info!("Model initialized successfully");
                Ok(model)
            }
            Err(e) => {
                Self::report_critical_error(
                    e.clone(),
                    "ApplicationModel",
                    "initialize",
                    "Failed to initialize the application. Please check your configuration and try again.",
                );
                Err(e.into())
            }
        }
    }

    pub fn setup_terminal(
        model: &mut Model<CrosstermTerminalAdapter>,
    ) -> Result<(), Box<dyn StdError>> {
        debug!("Entering alternate screen");
        model
            .terminal
            .enter_alternate_screen()
            .map_err(|e| format!("Failed to enter alternate screen: {e}"))?;
        model
            .terminal
            .enable_raw_mode()
            .map_err(|e| format!("Failed to enable raw mode: {e}"))?;
        Ok(())
    }

    pub fn run_application_loop(
        model: &mut Model<CrosstermTerminalAdapter>,
    ) -> Result<(), Box<dyn StdError>> {
        info!("Entering main application loop");

        while !model.state_manager.should_quit() {
            Self::process_single_iteration(model)?;
        }

        Ok(())
    }

    fn process_single_iteration(
        model: &mut Model<CrosstermTerminalAdapter>,
    ) -> Result<(), Box<dyn StdError>> {
        model.update_outside_msg();

        match model.app.tick(PollStrategy::Once) {
            Err(err) => {
                Self::handle_tick_error(model, err)?;
            }
            Ok(messages) if !messages.is_empty() => {
                Self::process_messages(model, messages);
            }
            _ => {}
        }

        Self::handle_redraw(model);
        Ok(())
    }

    fn handle_tick_error(
        model: &mut Model<CrosstermTerminalAdapter>,
        err: tuirealm::ApplicationError,
    ) -> Result<(), Box<dyn StdError>> {
        error!("Application tick error: {err:?}");

        if let Err(e) =
            model.mount_error_popup(&AppError::Component(format!("Application error: {err}")))
        {
            error!("Failed to mount error popup: {e}");
            if model
                .app
                .attr(
                    &ComponentId::TextLabel,
                    Attribute::Text,
                    AttrValue::String(format!("Application error: {err}")),
                )
                .is_err()
            {
                return Err(format!("Failed to display error: {err:?}").into());
            }
        }
        model.state_manager.set_redraw(true);
        Ok(())
    }

    fn process_messages(model: &mut Model<CrosstermTerminalAdapter>, messages: Vec<Msg>) {
        model.state_manager.set_redraw(true);
        for msg in messages {
            let mut msg = Some(msg);
            while msg.is_some() {
                msg = model.update(msg);
            }
        }
    }

    fn handle_redraw(model: &mut Model<CrosstermTerminalAdapter>) {
        if !model.state_manager.needs_redraw() {
            return;
        }
        if let Err(e) = model.view() {
            error!("Error during view rendering: {e}");
            if let Err(popup_err) = model.mount_error_popup(&e) {
                model
                    .error_reporter
                    .report_mount_error("ErrorPopup", "mount", popup_err);
                model
                    .error_reporter
                    .report_simple(e, "ViewRendering", "main_loop");
            }
        }
        model.state_manager.redraw_complete();
    }

    /// Cancel outstanding work and restore the terminal.
    pub fn shutdown_application(
        mut model: Model<CrosstermTerminalAdapter>,
    ) -> Result<(), Box<dyn StdError>> {
        info!("Application shutdown initiated");
        model.shutdown();

        debug!("Leaving alternate screen");
        let _ = model.terminal.leave_alternate_screen();
        let _ = model.terminal.disable_raw_mode();
        let _ = model.terminal.clear_screen();

        info!("Application terminated successfully");
        Ok(())
    }

    fn show_config_error_and_exit(
        validation_errors: &[ConfigValidationError],
    ) -> Result<(), Box<dyn StdError>> {
        let mut error_display = ConfigErrorDisplay::new(validation_errors)?;
        let result = error_display.show_and_wait_for_acknowledgment();
        error_display.shutdown();
        result
    }

    fn report_critical_error(
        error: AppError,
        component: &str,
        operation: &str,
        user_message: &str,
    ) {
        // No UI loop exists yet; the reporter only logs here
        let (tx, _rx) = std::sync::mpsc::channel();
        let error_reporter = ErrorReporter::new(tx);
        error_reporter.report_critical_and_exit(error, component, operation, user_message);

        eprintln!("Critical Error: {user_message}");
    }
}
