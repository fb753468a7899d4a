//! Card expiry display formatting.

const SEPARATOR: &str = " / ";
const MAX_DIGITS: usize = 4;

/// The digits of an expiry entry, truncated to `MMYY`.
///
/// This is the form to persist; [`format_expiry`] is for display only.
pub fn expiry_digits(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DIGITS)
        .collect()
}

/// Format user-entered expiry digits as `MM` or `MM / YY`.
///
/// Non-digits are ignored, so `1225` and `12/25` give the same result. Up to
/// two digits are returned as typed; beyond four are dropped. Months are not
/// range-checked.
///
/// ```
/// use render_guard::format_expiry;
///
/// assert_eq!(format_expiry("12/25"), "12 / 25");
/// assert_eq!(format_expiry("1"), "1");
/// ```
pub fn format_expiry(raw: &str) -> String {
    let digits = expiry_digits(raw);
    if digits.len() <= 2 {
        return digits;
    }

    let (month, year) = digits.split_at(2);
    let mut formatted = String::with_capacity(digits.len() + SEPARATOR.len());
    formatted.push_str(month);
    formatted.push_str(SEPARATOR);
    formatted.push_str(year);
    formatted
}
