//! Data models exchanged with the booking backend.
//!
//! Field names follow the backend's JSON (Portuguese, camelCase) through serde
//! renames; Rust-side names stay snake_case.

pub mod booking;
pub mod catalog;
pub mod customer;

pub use booking::{
    AvailabilityResponse, BookingConfirmation, BookingRequest, PaymentMethod, TimeSlot,
    booking_instant,
};
pub use catalog::{Barber, Service, sort_by_name};
pub use customer::{
    CustomerDetails, CustomerPublic, CustomerUpdate, LoginRequest, LoginResponse,
    RegisterRequest, UserView,
};
