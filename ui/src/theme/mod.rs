//! # Theme
//!
//! Colours for every component come from [`ThemeManager`] accessors such as
//! [`ThemeManager::primary_accent`]. The palette defaults to the shop colours
//! (green and gold) and individual colours can be overridden from the
//! `[theme]` section of `config.toml`:
//!
//! ```toml
//! [theme]
//! primary_accent = "#0C4010"
//! title_accent = "#C6A15B"
//! ```
//!
//! Accessors fall back to the defaults when the manager has not been
//! initialised, so components can be built in tests without any setup.

pub mod manager;

pub use manager::{ThemeConfig, ThemeManager};
