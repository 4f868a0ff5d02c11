use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::sync::{Mutex, OnceLock};
use tuirealm::props::Color;

static GLOBAL_THEME_MANAGER: OnceLock<Mutex<ThemeManager>> = OnceLock::new();

/// Shop colours used when no theme is configured or a colour does not parse.
mod fallback_colors {
    use tuirealm::props::Color;

    pub const TEXT_PRIMARY: Color = Color::White;
    pub const TEXT_MUTED: Color = Color::Gray;
    pub const PRIMARY_ACCENT: Color = Color::Rgb(12, 64, 16);
    pub const TITLE_ACCENT: Color = Color::Rgb(198, 161, 91);
    pub const SELECTION_FG: Color = Color::Yellow;
    pub const STATUS_SUCCESS: Color = Color::Green;
    pub const STATUS_WARNING: Color = Color::Yellow;
    pub const STATUS_ERROR: Color = Color::Red;
    pub const STATUS_LOADING: Color = Color::Rgb(198, 161, 91);
    pub const SHORTCUT_KEY: Color = Color::Yellow;
    pub const SHORTCUT_DESCRIPTION: Color = Color::White;
    pub const HELP_BAR_BG: Color = Color::DarkGray;
}

/// `[theme]` section: optional `#RRGGBB` overrides.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ThemeConfig {
    primary_accent: Option<String>,
    title_accent: Option<String>,
    selection: Option<String>,
    status_error: Option<String>,
    status_success: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    text_primary: Color,
    text_muted: Color,
    primary_accent: Color,
    title_accent: Color,
    selection_fg: Color,
    status_success: Color,
    status_warning: Color,
    status_error: Color,
    status_loading: Color,
    shortcut_key: Color,
    shortcut_description: Color,
    help_bar_bg: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text_primary: fallback_colors::TEXT_PRIMARY,
            text_muted: fallback_colors::TEXT_MUTED,
            primary_accent: fallback_colors::PRIMARY_ACCENT,
            title_accent: fallback_colors::TITLE_ACCENT,
            selection_fg: fallback_colors::SELECTION_FG,
            status_success: fallback_colors::STATUS_SUCCESS,
            status_warning: fallback_colors::STATUS_WARNING,
            status_error: fallback_colors::STATUS_ERROR,
            status_loading: fallback_colors::STATUS_LOADING,
            shortcut_key: fallback_colors::SHORTCUT_KEY,
            shortcut_description: fallback_colors::SHORTCUT_DESCRIPTION,
            help_bar_bg: fallback_colors::HELP_BAR_BG,
        }
    }
}

pub struct ThemeManager {
    palette: Palette,
}

impl ThemeManager {
    pub fn init_global(config: &ThemeConfig) -> AppResult<()> {
        let mut palette = Palette::default();
        override_color(&mut palette.primary_accent, config.primary_accent.as_deref());
        override_color(&mut palette.title_accent, config.title_accent.as_deref());
        override_color(&mut palette.selection_fg, config.selection.as_deref());
        override_color(&mut palette.status_error, config.status_error.as_deref());
        override_color(&mut palette.status_success, config.status_success.as_deref());

        GLOBAL_THEME_MANAGER
            .set(Mutex::new(ThemeManager { palette }))
            .map_err(|_| AppError::Config("Theme manager already initialized".to_string()))?;

        log::info!("Global theme manager initialized");
        Ok(())
    }

    fn with_palette<F>(f: F, fallback: Color) -> Color
    where
        F: FnOnce(&Palette) -> Color,
    {
        match GLOBAL_THEME_MANAGER.get() {
            Some(manager_mutex) => match manager_mutex.try_lock() {
                Ok(manager) => f(&manager.palette),
                Err(_) => {
                    log::warn!("Theme manager lock contention, using fallback");
                    fallback
                }
            },
            // Components built in tests and before start-up use the defaults.
            None => fallback,
        }
    }
}

fn override_color(slot: &mut Color, hex: Option<&str>) {
    let Some(hex) = hex else {
        return;
    };
    match hex_to_color(hex) {
        Some(color) => *slot = color,
        None => log::warn!("Ignoring invalid theme colour '{hex}'"),
    }
}

/// Parse `#RRGGBB` (the `#` is optional).
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

macro_rules! theme_accessor {
    ($method:ident, $field:ident, $fallback:expr) => {
        impl ThemeManager {
            pub fn $method() -> Color {
                Self::with_palette(|palette| palette.$field, $fallback)
            }
        }
    };
}

theme_accessor!(text_primary, text_primary, fallback_colors::TEXT_PRIMARY);
theme_accessor!(text_muted, text_muted, fallback_colors::TEXT_MUTED);
theme_accessor!(
    primary_accent,
    primary_accent,
    fallback_colors::PRIMARY_ACCENT
);
theme_accessor!(title_accent, title_accent, fallback_colors::TITLE_ACCENT);
theme_accessor!(selection_fg, selection_fg, fallback_colors::SELECTION_FG);
theme_accessor!(
    status_success,
    status_success,
    fallback_colors::STATUS_SUCCESS
);
theme_accessor!(
    status_warning,
    status_warning,
    fallback_colors::STATUS_WARNING
);
theme_accessor!(status_error, status_error, fallback_colors::STATUS_ERROR);
theme_accessor!(
    status_loading,
    status_loading,
    fallback_colors::STATUS_LOADING
);
theme_accessor!(shortcut_key, shortcut_key, fallback_colors::SHORTCUT_KEY);
theme_accessor!(
    shortcut_description,
    shortcut_description,
    fallback_colors::SHORTCUT_DESCRIPTION
);
theme_accessor!(help_bar_bg, help_bar_bg, fallback_colors::HELP_BAR_BG);
