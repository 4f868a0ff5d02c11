use serde::Deserialize;
use std::collections::BTreeMap;

/// Key bindings configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct KeyBindingsConfig {
    // Global keys
    key_quit: Option<char>,
    key_home: Option<char>,
    key_services: Option<char>,
    key_barbers: Option<char>,
    key_booking: Option<char>,
    key_client_area: Option<char>,
    key_login: Option<char>,
    key_logout: Option<char>,

    // Booking actions
    key_confirm: Option<char>,
    key_payment: Option<char>,
    key_prev_day: Option<char>,
    key_next_day: Option<char>,

    // Client area
    key_edit_profile: Option<char>,

    // List navigation
    key_down: Option<char>,
    key_up: Option<char>,
}

impl KeyBindingsConfig {
    // Global keys
    pub fn quit(&self) -> char {
        self.key_quit.unwrap_or('q')
    }

    pub fn home(&self) -> char {
        self.key_home.unwrap_or('i')
    }

    pub fn services(&self) -> char {
        self.key_services.unwrap_or('s')
    }

    pub fn barbers(&self) -> char {
        self.key_barbers.unwrap_or('b')
    }

    pub fn booking(&self) -> char {
        self.key_booking.unwrap_or('a')
    }

    pub fn client_area(&self) -> char {
        self.key_client_area.unwrap_or('c')
    }

    pub fn login(&self) -> char {
        self.key_login.unwrap_or('l')
    }

    pub fn logout(&self) -> char {
        self.key_logout.unwrap_or('x')
    }

    // Booking actions
    pub fn confirm(&self) -> char {
        self.key_confirm.unwrap_or('y')
    }

    pub fn payment(&self) -> char {
        self.key_payment.unwrap_or('p')
    }

    pub fn prev_day(&self) -> char {
        self.key_prev_day.unwrap_or('[')
    }

    pub fn next_day(&self) -> char {
        self.key_next_day.unwrap_or(']')
    }

    // Client area
    pub fn edit_profile(&self) -> char {
        self.key_edit_profile.unwrap_or('e')
    }

    // List navigation
    pub fn down(&self) -> char {
        self.key_down.unwrap_or('j')
    }

    pub fn up(&self) -> char {
        self.key_up.unwrap_or('k')
    }

    /// Every binding with the action name it is known by in `[keys]`.
    pub fn bindings(&self) -> [(&'static str, char); 15] {
        [
            ("quit", self.quit()),
            ("home", self.home()),
            ("services", self.services()),
            ("barbers", self.barbers()),
            ("booking", self.booking()),
            ("client_area", self.client_area()),
            ("login", self.login()),
            ("logout", self.logout()),
            ("confirm", self.confirm()),
            ("payment", self.payment()),
            ("prev_day", self.prev_day()),
            ("next_day", self.next_day()),
            ("edit_profile", self.edit_profile()),
            ("down", self.down()),
            ("up", self.up()),
        ]
    }

    /// Keys bound to more than one action, in key order.
    pub fn collisions(&self) -> Vec<(char, Vec<&'static str>)> {
        let mut by_key: BTreeMap<char, Vec<&'static str>> = BTreeMap::new();
        for (action, key) in self.bindings() {
            by_key.entry(key).or_default().push(action);
        }
        by_key
            .into_iter()
            .filter(|(_, actions)| actions.len() > 1)
            .collect()
    }
}
