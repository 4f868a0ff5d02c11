//! Presentation formatting (pt-BR).
//!
//! These strings are display-only; nothing in the application parses them
//! back into values.

/// `30.0` → `"R$ 30,00"`, `1234.5` → `"R$ 1.234,50"`.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{fraction:02}")
}

/// `30` → `"30min"`, `60` → `"1h00min"`, `90` → `"1h30min"`.
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        format!("{minutes}min")
    } else {
        format!("{}h{:02}min", minutes / 60, minutes % 60)
    }
}

fn mask_digits(input: &str, pattern: &str) -> String {
    let mut digits = input.chars().filter(char::is_ascii_digit);
    let mut out = String::with_capacity(pattern.len());
    let mut pending = String::new();

    for slot in pattern.chars() {
        if slot == '0' {
            let Some(digit) = digits.next() else {
                break;
            };
            out.push_str(&pending);
            pending.clear();
            out.push(digit);
        } else {
            pending.push(slot);
        }
    }
    out
}

/// Progressive `000.000.000-00` mask; extra digits are dropped.
pub fn mask_cpf(input: &str) -> String {
    mask_digits(input, "000.000.000-00")
}

/// Progressive `(00) 00000-0000` mask; ten-digit landlines use
/// `(00) 0000-0000`.
pub fn mask_phone(input: &str) -> String {
    let count = input.chars().filter(char::is_ascii_digit).count();
    if count == 10 {
        mask_digits(input, "(00) 0000-0000")
    } else {
        mask_digits(input, "(00) 00000-0000")
    }
}

pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Up to two uppercase initials: first and last word.
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let pick = match words.as_slice() {
        [] => Vec::new(),
        [only] => vec![*only],
        [first, .., last] => vec![*first, *last],
    };
    pick.iter()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
