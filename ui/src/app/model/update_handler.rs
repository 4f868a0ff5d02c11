use super::Model;
use crate::components::common::{
    BookingActivityMsg, ClientAreaActivityMsg, Msg, PopupActivityMsg,
};
use tuirealm::terminal::TerminalAdapter;

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    pub fn handle_update(&mut self, msg: Option<Msg>) -> Option<Msg> {
        let msg = msg?;
        self.set_redraw(true);

        if self.has_overlay() && is_page_shortcut(&msg) {
            log::debug!("Ignoring {msg:?} while an overlay is shown");
            return None;
        }

        let result = match msg {
            Msg::AppClose => {
                self.shutdown();
                None
            }
            Msg::ForceRedraw => None,
            Msg::Navigate(route) => self.update_navigation(route),
            Msg::Logout => self.update_logout(),
            Msg::SessionChanged(user) => self.update_session(user),
            Msg::ListActivity(msg) => self.update_list(msg),
            Msg::CalendarActivity(msg) => self.update_calendar(msg),
            Msg::CatalogActivity(msg) => self.update_catalog(msg),
            Msg::BookingActivity(msg) => self.update_booking(msg),
            Msg::ClientAreaActivity(msg) => self.update_client_area(msg),
            Msg::FormActivity(msg) => self.update_form(msg),
            Msg::AuthActivity(msg) => self.update_auth(msg),
            Msg::LoadingActivity(msg) => self.update_loading(msg),
            Msg::PopupActivity(msg) => self.update_popup(msg),
            Msg::Error(e) => {
                log::error!("Error received: {e}");
                self.update_popup(PopupActivityMsg::ShowError(e))
            }
        };

        if let Some(Msg::Error(e)) = result {
            log::error!("Error from message processing: {e}");
            if let Err(err) = self.mount_error_popup(&e) {
                log::error!("Failed to mount error popup: {err}");
                self.error_reporter
                    .report_mount_error("ErrorPopup", "mount", err);
            }
            None
        } else {
            result
        }
    }
}

/// Messages raised by the global shortcuts that act on the page below an
/// overlay.
fn is_page_shortcut(msg: &Msg) -> bool {
    matches!(
        msg,
        Msg::Navigate(_)
            | Msg::Logout
            | Msg::CalendarActivity(_)
            | Msg::BookingActivity(BookingActivityMsg::Confirm | BookingActivityMsg::CyclePayment)
            | Msg::ClientAreaActivity(ClientAreaActivityMsg::EditProfile)
    )
}
