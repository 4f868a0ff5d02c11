//! # Application Module
//!
//! The BarberBook application model and its message loop, following a
//! model-view-update layout:
//!
//! - [`model`] - application state, owned services and the `Update` impl
//! - [`view`] - per-route layout and overlay rendering
//! - [`updates`] - message handlers, one module per page or concern
//! - [`router`] - routes and the authentication guard
//! - [`task_manager`] - backend work on the task pool, with loading feedback
//! - [`application_lifecycle`] - start-up, main loop and shutdown
//!
//! ## Usage
//!
//! ```no_run
//! use barberbook::app::application_lifecycle::ApplicationLifecycle;
//! use barberbook::app::model::ModelOptions;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut model = ApplicationLifecycle::initialize(ModelOptions::default())?;
//!     ApplicationLifecycle::setup_terminal(&mut model)?;
//!     ApplicationLifecycle::run_application_loop(&mut model)?;
//!     ApplicationLifecycle::shutdown_application(model)?;
//!     Ok(())
//! }
//! ```

/// Application lifecycle management - startup, shutdown, and main loop
pub mod application_lifecycle;
/// Page, focus and loading state
pub mod managers;
/// Core application model and state structures
pub mod model;
/// Routes and the authentication guard
pub mod router;
/// Background task management and coordination
pub mod task_manager;
/// Message processing and state update logic
pub mod updates;
/// UI rendering and view composition
pub mod view;
