use super::catalog::{Barber, Service};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time-of-day string (`"09:00"`) offered for a barber on a date.
///
/// Only meaningful for the availability fetch that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(String);

impl TimeSlot {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimeSlot {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Payment methods accepted by `POST /agendamentos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Loja,
    Online,
    Cartao,
    Dinheiro,
}

impl PaymentMethod {
    /// Methods offered in the booking flow, in display order.
    pub const OFFERED: [PaymentMethod; 3] = [
        PaymentMethod::Loja,
        PaymentMethod::Cartao,
        PaymentMethod::Dinheiro,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Loja => "Na loja",
            PaymentMethod::Online => "Online",
            PaymentMethod::Cartao => "Cartão",
            PaymentMethod::Dinheiro => "Dinheiro",
        }
    }

    /// Next offered method, wrapping around. `Online` is not offered and
    /// cycles back to the first entry.
    pub fn next_offered(self) -> Self {
        let position = Self::OFFERED.iter().position(|method| *method == self);
        match position {
            Some(index) => Self::OFFERED[(index + 1) % Self::OFFERED.len()],
            None => Self::OFFERED[0],
        }
    }
}

/// Body of `POST /agendamentos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub user_id: Option<String>,
    pub servico_id: String,
    pub barbeiro_id: String,
    pub data_horario_iso: String,
    pub forma_pagamento: PaymentMethod,
}

impl BookingRequest {
    pub fn new(
        user_id: Option<String>,
        service: &Service,
        barber: &Barber,
        date: NaiveDate,
        slot: &TimeSlot,
        payment: PaymentMethod,
    ) -> Self {
        Self {
            user_id,
            servico_id: service.id.clone(),
            barbeiro_id: barber.id.clone(),
            data_horario_iso: booking_instant(date, slot),
            forma_pagamento: payment,
        }
    }
}

/// Local date-time string the backend expects: `YYYY-MM-DDTHH:MM:00`.
pub fn booking_instant(date: NaiveDate, slot: &TimeSlot) -> String {
    format!("{}T{}:00", date.format("%Y-%m-%d"), slot)
}

/// Whatever `POST /agendamentos` returned. An empty body reads as `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingConfirmation(pub serde_json::Value);

/// Body of `GET /disponibilidade`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub horarios: Option<Vec<String>>,
}

impl AvailabilityResponse {
    /// A missing `horarios` field means no free slots.
    pub fn into_slots(self) -> Vec<TimeSlot> {
        self.horarios
            .unwrap_or_default()
            .into_iter()
            .map(TimeSlot::new)
            .collect()
    }
}
