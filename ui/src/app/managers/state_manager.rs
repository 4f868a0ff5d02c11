use crate::app::router::Route;
use crate::components::common::ComponentId;
use crate::components::input_form::FormKind;

/// Route, focus and redraw bookkeeping for the UI loop.
pub struct StateManager {
    pub route: Route,
    pub active_component: ComponentId,
    pub quit: bool,
    pub redraw: bool,
    /// Message of the innermost running load; the indicator stays up until
    /// every `Start` has been matched by a `Stop`.
    pub loading_message: Option<String>,
    pub loading_depth: usize,
    /// Form currently mounted as `ComponentId::InputForm`, if any.
    pub form: Option<FormKind>,
    pub is_editing: bool,
    /// Where to go once sign-in succeeds.
    pub after_login: Option<Route>,
}

impl StateManager {
    pub fn new() -> Self {
        Self {
            route: Route::Home,
            active_component: ComponentId::CalendarPicker,
            quit: false,
            redraw: true,
            loading_message: None,
            loading_depth: 0,
            form: None,
            is_editing: false,
            after_login: None,
        }
    }

    pub fn set_route(&mut self, route: Route) {
        log::debug!("Route transition: {} -> {}", self.route, route);
        self.route = route;
        self.redraw = true;
    }

    pub fn set_active_component(&mut self, component: ComponentId) {
        self.active_component = component;
        self.redraw = true;
    }

    /// Component that owns the keyboard on the current route.
    pub fn page_focus(&self) -> ComponentId {
        if self.form.is_some() {
            return ComponentId::InputForm;
        }
        match self.route {
            Route::Home => ComponentId::CalendarPicker,
            Route::Services => ComponentId::ServiceList,
            Route::Barbers => ComponentId::BarberList,
            Route::Booking => ComponentId::WizardList,
            Route::ClientArea => ComponentId::RecentBookings,
            Route::Login => ComponentId::InputForm,
        }
    }

    /// Record a `Start`. Returns true when the indicator was not yet shown.
    pub fn begin_loading(&mut self, message: String) -> bool {
        self.loading_depth += 1;
        self.loading_message = Some(message);
        self.redraw = true;
        self.loading_depth == 1
    }

    /// Record a `Stop`. Returns true when the last load finished.
    pub fn end_loading(&mut self) -> bool {
        self.loading_depth = self.loading_depth.saturating_sub(1);
        self.redraw = true;
        if self.loading_depth == 0 {
            self.loading_message = None;
            true
        } else {
            false
        }
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.is_editing = editing;
    }

    pub fn shutdown(&mut self) {
        self.quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    pub fn set_redraw(&mut self, redraw: bool) {
        self.redraw = redraw;
    }

    pub fn redraw_complete(&mut self) {
        self.redraw = false;
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_loading_keeps_indicator_until_last_stop() {
        let mut state = StateManager::new();
        assert!(state.begin_loading("Carregando serviços...".to_string()));
        assert!(!state.begin_loading("Carregando barbeiros...".to_string()));

        assert!(!state.end_loading());
        assert_eq!(state.loading_message.as_deref(), Some("Carregando barbeiros..."));
        assert!(state.end_loading());
        assert_eq!(state.loading_message, None);
    }

    #[test]
    fn test_unmatched_stop_does_not_underflow() {
        let mut state = StateManager::new();
        assert!(state.end_loading());
        assert_eq!(state.loading_depth, 0);
    }

    #[test]
    fn test_open_form_takes_focus() {
        let mut state = StateManager::new();
        state.route = Route::ClientArea;
        assert_eq!(state.page_focus(), ComponentId::RecentBookings);

        state.form = Some(FormKind::Profile);
        assert_eq!(state.page_focus(), ComponentId::InputForm);
    }
}
