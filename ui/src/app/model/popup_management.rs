use super::Model;
use crate::components::common::ComponentId;
use crate::components::error_popup::ErrorPopup;
use crate::components::global_key_watcher::GlobalKeyWatcher;
use crate::components::loading_indicator::LoadingIndicator;
use crate::components::state::ComponentStateMount;
use crate::components::success_popup::SuccessPopup;
use crate::error::{AppError, AppResult};
use tuirealm::terminal::TerminalAdapter;
use tuirealm::{Sub, SubClause, SubEventClause};

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    pub fn mount_loading_indicator(&mut self, message: &str) -> AppResult<()> {
        log::debug!("Mounting loading indicator with message: {message}");

        self.app.remount_with_state(
            ComponentId::LoadingIndicator,
            LoadingIndicator::new(message),
            vec![
                Sub::new(SubEventClause::Tick, SubClause::Always),
                Sub::new(SubEventClause::Any, SubClause::Always),
            ],
        )?;

        self.activate_component_for_current_state()?;
        self.set_redraw(true);
        Ok(())
    }

    pub fn unmount_loading_indicator(&mut self) -> AppResult<()> {
        if self.app.mounted(&ComponentId::LoadingIndicator) {
            self.app
                .umount(&ComponentId::LoadingIndicator)
                .map_err(|e| AppError::Component(e.to_string()))?;
            log::debug!("Loading indicator unmounted");
        }

        self.activate_component_for_current_state()?;
        self.set_redraw(true);
        Ok(())
    }

    /// Mount error popup and give focus to it
    pub fn mount_error_popup(&mut self, error: &AppError) -> AppResult<()> {
        log::error!("Displaying error popup: {error}");

        self.app.remount_with_state(
            ComponentId::ErrorPopup,
            ErrorPopup::new(error),
            Vec::default(),
        )?;

        self.app
            .active(&ComponentId::ErrorPopup)
            .map_err(|e| AppError::Component(e.to_string()))?;

        self.set_redraw(true);
        Ok(())
    }

    /// Same popup as errors, in warning colours.
    pub fn mount_warning_popup(&mut self, message: &str) -> AppResult<()> {
        log::warn!("Displaying warning popup: {message}");

        self.app.remount_with_state(
            ComponentId::ErrorPopup,
            ErrorPopup::warning(message),
            Vec::default(),
        )?;

        self.app
            .active(&ComponentId::ErrorPopup)
            .map_err(|e| AppError::Component(e.to_string()))?;

        self.set_redraw(true);
        Ok(())
    }

    pub fn unmount_error_popup(&mut self) -> AppResult<()> {
        if self.app.mounted(&ComponentId::ErrorPopup) {
            self.app
                .umount(&ComponentId::ErrorPopup)
                .map_err(|e| AppError::Component(e.to_string()))?;
        }

        self.activate_component_for_current_state()?;
        self.set_redraw(true);
        Ok(())
    }

    pub fn mount_success_popup(&mut self, message: &str) -> AppResult<()> {
        log::info!("Displaying success popup: {message}");

        self.app.remount_with_state(
            ComponentId::SuccessPopup,
            SuccessPopup::new(message),
            Vec::default(),
        )?;

        // An error raised at the same time keeps the focus
        if !self.app.mounted(&ComponentId::ErrorPopup) {
            self.app
                .active(&ComponentId::SuccessPopup)
                .map_err(|e| AppError::Component(e.to_string()))?;
        }

        self.set_redraw(true);
        Ok(())
    }

    pub fn unmount_success_popup(&mut self) -> AppResult<()> {
        if self.app.mounted(&ComponentId::SuccessPopup) {
            self.app
                .umount(&ComponentId::SuccessPopup)
                .map_err(|e| AppError::Component(e.to_string()))?;
        }

        self.activate_component_for_current_state()?;
        self.set_redraw(true);
        Ok(())
    }

    /// True while a popup or the loading indicator owns the keyboard.
    pub fn has_overlay(&self) -> bool {
        self.app.mounted(&ComponentId::ErrorPopup)
            || self.app.mounted(&ComponentId::SuccessPopup)
            || self.app.mounted(&ComponentId::LoadingIndicator)
    }

    /// Update the GlobalKeyWatcher's editing state
    pub fn update_global_key_watcher_editing_state(&mut self) -> AppResult<()> {
        self.app
            .remount(
                ComponentId::GlobalKeyWatcher,
                Box::new(GlobalKeyWatcher::new(self.state_manager.is_editing)),
                vec![Sub::new(SubEventClause::Any, SubClause::Always)],
            )
            .map_err(|e| AppError::Component(e.to_string()))?;

        Ok(())
    }

    /// Give focus to the topmost overlay, or to the page's own component.
    pub fn activate_component_for_current_state(&mut self) -> AppResult<()> {
        let target = [
            ComponentId::ErrorPopup,
            ComponentId::SuccessPopup,
            ComponentId::LoadingIndicator,
        ]
        .into_iter()
        .find(|id| self.app.mounted(id))
        .unwrap_or_else(|| self.state_manager.page_focus());

        if !self.app.mounted(&target) {
            log::debug!("{target:?} is not mounted yet, focus unchanged");
            return Ok(());
        }

        self.app
            .active(&target)
            .map_err(|e| AppError::Component(e.to_string()))?;
        self.state_manager.set_active_component(target);
        Ok(())
    }
}
