//! Booking flow: the wizard state machine, its fetch tickets and driver, the
//! date picker bounds and the recent-booking history.

pub mod calendar;
pub mod driver;
pub mod fetch;
pub mod history;
pub mod wizard;

pub use calendar::{BookingCalendar, earliest_bookable_date};
pub use driver::WizardDriver;
pub use fetch::{FetchKind, FetchTicket, InFlight};
pub use history::{DEFAULT_HISTORY_LIMIT, RecentBooking, RecentBookings, default_history_path};
pub use wizard::{
    BookingCompleted, BookingWizard, Notification, Transition, WizardCommand, WizardError,
    WizardEvent, WizardStep,
};
