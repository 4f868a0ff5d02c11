use crate::app::router::Route;
use crate::components::common::{
    BookingActivityMsg, CalendarActivityMsg, ClientAreaActivityMsg, Msg,
};
use crate::config::{self, KeyBindingsConfig};
use tui_realm_stdlib::Phantom;
use tuirealm::event::{Key, KeyEvent, KeyModifiers};
use tuirealm::{Component, Event, MockComponent, NoUserEvent};

/// Invisible component subscribed to every event; turns the configured
/// single-key shortcuts into navigation and booking messages.
///
/// While a form has focus it is remounted in editing mode and lets plain
/// characters through, so typing never triggers a shortcut.
#[derive(MockComponent, Default)]
pub struct GlobalKeyWatcher {
    component: Phantom,
    is_editing: bool,
}

impl GlobalKeyWatcher {
    pub fn new(is_editing: bool) -> Self {
        Self {
            component: Phantom::default(),
            is_editing,
        }
    }

    fn shortcut(keys: &KeyBindingsConfig, c: char) -> Option<Msg> {
        let msg = if c == keys.quit() {
            Msg::AppClose
        } else if c == keys.home() {
            Msg::Navigate(Route::Home)
        } else if c == keys.services() {
            Msg::Navigate(Route::Services)
        } else if c == keys.barbers() {
            Msg::Navigate(Route::Barbers)
        } else if c == keys.booking() {
            Msg::Navigate(Route::Booking)
        } else if c == keys.client_area() {
            Msg::Navigate(Route::ClientArea)
        } else if c == keys.login() {
            Msg::Navigate(Route::Login)
        } else if c == keys.logout() {
            Msg::Logout
        } else if c == keys.confirm() {
            Msg::BookingActivity(BookingActivityMsg::Confirm)
        } else if c == keys.payment() {
            Msg::BookingActivity(BookingActivityMsg::CyclePayment)
        } else if c == keys.prev_day() {
            Msg::CalendarActivity(CalendarActivityMsg::PrevDay)
        } else if c == keys.next_day() {
            Msg::CalendarActivity(CalendarActivityMsg::NextDay)
        } else if c == keys.edit_profile() {
            Msg::ClientAreaActivity(ClientAreaActivityMsg::EditProfile)
        } else {
            return None;
        };
        Some(msg)
    }
}

impl Component<Msg, NoUserEvent> for GlobalKeyWatcher {
    fn on(&mut self, ev: Event<NoUserEvent>) -> Option<Msg> {
        match ev {
            Event::Keyboard(KeyEvent {
                code: Key::Char('c'),
                modifiers: KeyModifiers::CONTROL,
            }) => Some(Msg::AppClose),
            Event::Keyboard(KeyEvent {
                code: Key::Char(c),
                modifiers,
            }) if !self.is_editing
                && (modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT) =>
            {
                Self::shortcut(config::get_config_or_panic().keys(), c)
            }
            _ => None,
        }
    }
}
