use chrono::{Datelike, Duration, NaiveDate};
use client::booking::{BookingCalendar, earliest_bookable_date};
use client::model::{Service, TimeSlot, booking_instant, sort_by_name};
use proptest::prelude::*;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2035, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN))
}

#[cfg(test)]
mod calendar_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_calendar_never_goes_below_floor(
            today in any_date(),
            moves in prop::collection::vec(any::<bool>(), 0..60)
        ) {
            let mut calendar = BookingCalendar::new(today);
            let floor = earliest_bookable_date(today);

            // Property: the floor is never before 2025-01-01 nor before today
            prop_assert!(floor.year() >= 2025);
            prop_assert!(floor >= today);

            for forward in moves {
                if forward {
                    calendar.next_day();
                } else {
                    calendar.prev_day();
                }
                prop_assert!(calendar.current() >= floor);
            }
        }

        #[test]
        fn test_set_accepts_only_dates_from_floor(today in any_date(), offset in -400i64..400) {
            let mut calendar = BookingCalendar::new(today);
            let target = calendar.earliest() + Duration::days(offset);
            let accepted = calendar.set(target);

            prop_assert_eq!(accepted, offset >= 0);
            if accepted {
                prop_assert_eq!(calendar.current(), target);
            } else {
                prop_assert_eq!(calendar.current(), calendar.earliest());
            }
        }
    }
}

#[cfg(test)]
mod booking_format_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_booking_instant_shape(date in any_date(), hour in 0u32..24, minute in 0u32..60) {
            let slot = TimeSlot::new(format!("{hour:02}:{minute:02}"));
            let instant = booking_instant(date, &slot);

            // Property: "{YYYY-MM-DD}T{slot}:00"
            prop_assert_eq!(instant.len(), 19);
            let expected = format!("{}T{}:00", date.format("%Y-%m-%d"), slot);
            prop_assert_eq!(&instant, &expected);
            prop_assert!(chrono::NaiveDateTime::parse_from_str(&instant, "%Y-%m-%dT%H:%M:%S").is_ok());
        }

        #[test]
        fn test_sort_by_name_is_case_insensitive_order(
            names in prop::collection::vec("[a-zA-Z]{1,8}", 0..20)
        ) {
            let mut services: Vec<Service> = names
                .iter()
                .enumerate()
                .map(|(i, nome)| Service {
                    id: i.to_string(),
                    nome: nome.clone(),
                    duracao: 30,
                    preco: 10.0,
                })
                .collect();
            sort_by_name(&mut services);

            // Property: names are in non-decreasing case-insensitive order
            for pair in services.windows(2) {
                prop_assert!(pair[0].nome.to_lowercase() <= pair[1].nome.to_lowercase());
            }
            prop_assert_eq!(services.len(), names.len());
        }
    }
}
