//! HTTP access to the booking backend.
//!
//! [`gateway::ApiGateway`] owns the `reqwest` client and implements the
//! generic JSON verbs with cancellation. [`backend::BarberShopBackend`] is the
//! typed facade the rest of the crate depends on.

pub mod backend;
pub mod gateway;

pub use backend::{BarberShopBackend, HttpBackend};
pub use gateway::{ApiGateway, DEFAULT_BASE_URL, GatewayConfig, TokenSource};
