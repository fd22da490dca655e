use chrono::{Datelike, Months, NaiveDate, Utc};
use rand::Rng;

/// Bits of CSPRNG entropy in the ticket ID suffix.
const SUFFIX_BITS: u32 = 80;

/// Width of the suffix once base-36 encoded (ceil(80 / log2(36))).
const SUFFIX_WIDTH: usize = 16;

/// Generates a ticket identifier: `TKT-` followed by the current unix
/// millisecond timestamp and an 80-bit random suffix, both uppercase
/// base-36. The suffix makes collisions negligible even if two tickets are
/// issued in the same millisecond.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis().unsigned_abs() as u128;
    let suffix = rand::thread_rng().gen::<u128>() & ((1u128 << SUFFIX_BITS) - 1);
    format!(
        "TKT-{}{:0>width$}",
        base36(millis),
        base36(suffix),
        width = SUFFIX_WIDTH
    )
}

/// End of the validity window: the purchase date advanced by three calendar
/// months. The day of month is preserved, clamped to the last valid day when
/// the target month is shorter (Jan 31 -> Apr 30).
pub fn validity_window(purchase: NaiveDate) -> NaiveDate {
    purchase + Months::new(3)
}

/// Long-form date used on the ticket artwork and the invoice, e.g.
/// `Monday, January 15, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {}, {}",
        date.format("%A"),
        date.format("%B"),
        date.day(),
        date.year()
    )
}

fn base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_string();
    }
    let mut buf = [0u8; 25];
    let mut at = buf.len();
    while value > 0 {
        at -= 1;
        buf[at] = DIGITS[(value % 36) as usize];
        value /= 36;
    }
    String::from_utf8_lossy(&buf[at..]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_format() {
        let id = generate_id();
        assert!(id.starts_with("TKT-"));
        let token = &id[4..];
        assert!(!token.is_empty());
        assert!(token.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_ids_do_not_collide() {
        let ids: HashSet<String> = (0..2000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 2000);
    }

    #[test]
    fn test_validity_clamps_to_shorter_month() {
        let purchased = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let end = validity_window(purchased);
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
    }

    #[test]
    fn test_validity_preserves_day_of_month() {
        let purchased = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let end = validity_window(purchased);
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());
    }

    #[test]
    fn test_validity_clamps_into_leap_february() {
        let purchased = NaiveDate::from_ymd_opt(2023, 11, 30).unwrap();
        let end = validity_window(purchased);
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_long_date_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_long_date(date), "Monday, January 15, 2024");
    }

    #[test]
    fn test_base36_round_numbers() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "Z");
        assert_eq!(base36(36), "10");
    }
}
