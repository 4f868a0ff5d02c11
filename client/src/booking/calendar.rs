use chrono::{Datelike, NaiveDate};

/// Bookings open on 2025-01-01; nothing before that date is offered.
pub const BOOKING_OPENS: (i32, u32, u32) = (2025, 1, 1);

fn opening_day() -> NaiveDate {
    let (y, m, d) = BOOKING_OPENS;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// First date the calendar may show given the local `today`.
pub fn earliest_bookable_date(today: NaiveDate) -> NaiveDate {
    if today.year() < BOOKING_OPENS.0 {
        opening_day()
    } else {
        today.max(opening_day())
    }
}

/// Day picker that never moves before the earliest bookable date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingCalendar {
    earliest: NaiveDate,
    current: NaiveDate,
}

impl BookingCalendar {
    pub fn new(today: NaiveDate) -> Self {
        let earliest = earliest_bookable_date(today);
        Self {
            earliest,
            current: earliest,
        }
    }

    pub fn current(&self) -> NaiveDate {
        self.current
    }

    pub fn earliest(&self) -> NaiveDate {
        self.earliest
    }

    pub fn next_day(&mut self) -> NaiveDate {
        if let Some(next) = self.current.succ_opt() {
            self.current = next;
        }
        self.current
    }

    /// Move back one day, clamped at the earliest bookable date.
    pub fn prev_day(&mut self) -> NaiveDate {
        if let Some(prev) = self.current.pred_opt() {
            self.current = prev.max(self.earliest);
        }
        self.current
    }

    /// Jump to `date`. Returns false and leaves the calendar untouched if the
    /// date is before the earliest bookable date.
    pub fn set(&mut self, date: NaiveDate) -> bool {
        if date < self.earliest {
            return false;
        }
        self.current = date;
        true
    }

    /// DD/MM/YYYY.
    pub fn label(&self) -> String {
        self.current.format("%d/%m/%Y").to_string()
    }

    /// YYYY-MM-DD.
    pub fn iso(&self) -> String {
        self.current.format("%Y-%m-%d").to_string()
    }
}
