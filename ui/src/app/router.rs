//! Page routes and the authentication guard.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// Landing page with the booking calendar.
    #[default]
    Home,
    Services,
    Barbers,
    Booking,
    ClientArea,
    Login,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Home,
        Route::Services,
        Route::Barbers,
        Route::Booking,
        Route::ClientArea,
        Route::Login,
    ];

    /// Unknown paths land on [`Route::Home`]. A trailing slash is ignored.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .unwrap_or_default()
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Services => "/servicos",
            Route::Barbers => "/barbeiros",
            Route::Booking => "/agendamento",
            Route::ClientArea => "/cliente",
            Route::Login => "/login",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Início",
            Route::Services => "Serviços",
            Route::Barbers => "Barbeiros",
            Route::Booking => "Agendamento",
            Route::ClientArea => "Área do cliente",
            Route::Login => "Entrar",
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::ClientArea)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Where a navigation to `requested` actually lands.
///
/// Checked synchronously at navigation time: a guarded route without a
/// session token resolves to [`Route::Login`].
pub fn resolve(requested: Route, is_authenticated: bool) -> Route {
    if requested.requires_auth() && !is_authenticated {
        log::info!("Route {requested} requires a session, redirecting to login");
        Route::Login
    } else {
        requested
    }
}
