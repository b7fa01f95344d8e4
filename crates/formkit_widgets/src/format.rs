//! Input masks
//!
//! Masks are applied to the whole raw input on every keystroke: the digits
//! are pulled out and the mask is rebuilt from scratch. Deleting a
//! character therefore re-derives a shorter mask instead of leaving stray
//! punctuation behind.

/// Digits kept for a phone number
pub const PHONE_DIGITS: usize = 10;

/// Digits kept for a date (MMDDYYYY)
pub const DATE_DIGITS: usize = 8;

/// Mask applied to a field's raw input
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mask {
    /// Store input verbatim
    #[default]
    None,
    /// `(AAA) BBB-CCCC`
    Phone,
    /// `MM/DD/YYYY`
    Date,
}

impl Mask {
    pub fn apply(self, raw: &str) -> String {
        match self {
            Mask::None => raw.to_string(),
            Mask::Phone => format_phone(raw),
            Mask::Date => format_date(raw),
        }
    }
}

/// ASCII digits of `raw`, at most `max` of them
fn digits(raw: &str, max: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Format raw input as a US phone number
///
/// 0-3 digits are returned as-is, 4-6 as `(AAA) BBB`, 7-10 as
/// `(AAA) BBB-CCCC`. Anything past ten digits is dropped.
pub fn format_phone(raw: &str) -> String {
    let digits = digits(raw, PHONE_DIGITS);
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

/// Format raw input as a date
///
/// 0-2 digits are returned as-is, 3-4 as `MM/DD`, 5-8 as `MM/DD/YYYY`.
/// No calendar check is made.
pub fn format_date(raw: &str) -> String {
    let digits = digits(raw, DATE_DIGITS);
    match digits.len() {
        0..=2 => digits,
        3..=4 => format!("{}/{}", &digits[..2], &digits[2..]),
        _ => format!("{}/{}/{}", &digits[..2], &digits[2..4], &digits[4..]),
    }
}
