//! Payment-card masking and structural format checks.
//!
//! Neither function performs a Luhn checksum or issuer-prefix validation: a
//! `true` from [`is_valid_card_format`] only means the digit count is
//! plausible, not that the card exists.

/// Fewest digits accepted by [`is_valid_card_format`].
pub const MIN_CARD_DIGITS: usize = 13;

/// Most digits accepted by [`is_valid_card_format`].
pub const MAX_CARD_DIGITS: usize = 19;

const MASK_CHAR: char = '•';
const MASK_PREFIX: &str = "•••• •••• •••• ";
const VISIBLE_DIGITS: usize = 4;

/// Keep only the ASCII digits of `card_number`, dropping spaces, dashes and
/// anything else.
pub fn card_digits(card_number: &str) -> String {
    card_number.chars().filter(char::is_ascii_digit).collect()
}

/// Mask a card number for display, revealing only the last four digits.
///
/// With four or more digits the result is always `•••• •••• •••• ` followed by
/// the last four, whatever the total length. With fewer, every digit is
/// replaced by one `•`.
///
/// ```
/// use render_guard::mask_card_number;
///
/// assert_eq!(mask_card_number("4000 1234 5678 9012"), "•••• •••• •••• 9012");
/// assert_eq!(mask_card_number("12"), "••");
/// ```
pub fn mask_card_number(card_number: &str) -> String {
    let digits = card_digits(card_number);
    if digits.len() < VISIBLE_DIGITS {
        return MASK_CHAR.to_string().repeat(digits.len());
    }

    // Digits are ASCII, so byte offsets are char offsets.
    let last_four = &digits[digits.len() - VISIBLE_DIGITS..];
    let mut masked = String::with_capacity(MASK_PREFIX.len() + VISIBLE_DIGITS);
    masked.push_str(MASK_PREFIX);
    masked.push_str(last_four);
    masked
}

/// Returns `true` if `card_number` has between 13 and 19 digits inclusive,
/// ignoring formatting characters.
///
/// ```
/// use render_guard::is_valid_card_format;
///
/// assert!(is_valid_card_format("4000-1234-5678-9012"));
/// assert!(!is_valid_card_format("1234"));
/// ```
pub fn is_valid_card_format(card_number: &str) -> bool {
    let count = card_number.chars().filter(char::is_ascii_digit).count();
    (MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&count)
}
