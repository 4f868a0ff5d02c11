use crate::app::model::Model;
use crate::app::router::Route;
use crate::components::common::{Msg, PopupActivityMsg};
use client::booking::WizardStep;
use tuirealm::terminal::TerminalAdapter;

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    pub fn update_popup(&mut self, msg: PopupActivityMsg) -> Option<Msg> {
        let result = match msg {
            PopupActivityMsg::ShowError(error) => self.mount_error_popup(&error),
            PopupActivityMsg::ShowWarning(message) => self.mount_warning_popup(&message),
            PopupActivityMsg::ShowSuccess(message) => self.mount_success_popup(&message),
            PopupActivityMsg::CloseError => self.unmount_error_popup(),
            PopupActivityMsg::CloseSuccess => {
                if let Err(e) = self.unmount_success_popup() {
                    return Some(Msg::Error(e));
                }
                return self.after_booking_confirmed();
            }
        };
        result.err().map(Msg::Error)
    }

    // Dismissing the confirmation of a finished booking goes back home
    fn after_booking_confirmed(&self) -> Option<Msg> {
        let finished = self.state_manager.route == Route::Booking
            && self
                .wizard
                .as_ref()
                .is_some_and(|wizard| wizard.step() == WizardStep::Succeeded);
        finished.then_some(Msg::Navigate(Route::Home))
    }
}
