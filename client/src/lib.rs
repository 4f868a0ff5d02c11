//! # BarberBook Client Library
//!
//! Core library for the barbershop booking client. It talks to the booking
//! backend over HTTP and holds every piece of state that does not belong to a
//! particular front-end: the shared selection, the booking wizard, and the
//! persisted session.
//!
//! ## Modules
//!
//! - [`api`] - HTTP gateway and the typed backend facade
//! - [`auth`] - Sign-in, sign-up and sign-out on top of the session store
//! - [`booking`] - Booking wizard state machine, fetch tickets, calendar and history
//! - [`common`] - Error types shared across modules
//! - [`model`] - Wire and domain data models
//! - [`selection`] - Application-wide service/barber selection context
//! - [`session`] - Persisted token and user session store
//! - [`taskpool`] - Bounded task pool for concurrent operations

pub mod api;
pub mod auth;
pub mod booking;
pub mod common;
pub mod model;
pub mod selection;
pub mod session;
pub mod taskpool;
