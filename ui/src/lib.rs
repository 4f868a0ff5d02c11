//! # BarberBook UI Library
//!
//! Terminal client for booking appointments at a barbershop, built with
//! Ratatui and tui-realm on top of the `client` crate.
//!
//! ## Modules
//!
//! - [`app`] - application model, routing and the message loop
//! - [`components`] - UI components and the messages they raise
//! - [`config`] - configuration loading and validation
//! - [`error`] - error types and centralized error reporting
//! - [`logger`] - file logging setup
//! - [`theme`] - colour palette
//! - [`utils`] - formatting helpers for money, durations and documents
//!
//! The library interface exists so integration tests can reach the
//! internal modules.

pub mod app;

pub mod components;
pub mod config;
pub mod error;
pub mod logger;
pub mod theme;
pub mod utils;

pub use error::AppError;

pub use components::common::Msg;
