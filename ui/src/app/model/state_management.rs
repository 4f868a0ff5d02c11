use super::Model;
use crate::app::router::Route;
use crate::app::view::*;
use crate::components::common::ComponentId;
use crate::components::help_bar::HelpBar;
use crate::error::{AppError, AppResult};
use tuirealm::ratatui::layout::{Constraint, Direction, Layout};
use tuirealm::terminal::TerminalAdapter;

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    pub fn view(&mut self) -> AppResult<()> {
        let mut view_result: AppResult<()> = Ok(());

        // Extract values before the closure to avoid borrowing issues
        let route = self.state_manager.route;
        let active_component = self.state_manager.active_component.clone();
        let is_authenticated = self.is_authenticated();

        self.terminal
            .draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints(
                        [
                            Constraint::Length(1),
                            Constraint::Length(1), // Label
                            Constraint::Length(2),
                            Constraint::Min(16),   // Main area
                            Constraint::Length(1), // Help bar
                        ]
                        .as_ref(),
                    )
                    .split(f.area());

                self.app.view(&ComponentId::TextLabel, f, chunks[1]);

                view_result = match route {
                    Route::Home => with_popup(&mut self.app, f, &chunks, view_home),
                    Route::Services => with_popup(&mut self.app, f, &chunks, view_services),
                    Route::Barbers => with_popup(&mut self.app, f, &chunks, view_barbers),
                    Route::Booking => with_popup(&mut self.app, f, &chunks, view_booking),
                    Route::ClientArea => {
                        with_popup(&mut self.app, f, &chunks, view_client_area)
                    }
                    Route::Login => with_popup(&mut self.app, f, &chunks, view_login),
                };

                if !self.app.mounted(&ComponentId::ErrorPopup)
                    && !self.app.mounted(&ComponentId::SuccessPopup)
                {
                    let mut help_bar = HelpBar::new();
                    help_bar.view_with_active(f, chunks[4], &active_component, is_authenticated);
                }
            })
            .map_err(|e| AppError::Component(e.to_string()))?;

        view_result
    }
}
