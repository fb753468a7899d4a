//! # render_guard
//!
//! Sanitization and masking for untrusted strings on their way to a page,
//! a log line or a database row.
//!
//! ## Overview
//!
//! `render_guard` exposes five independent, pure operations:
//!
//! | Operation | Input | Output |
//! |-----------|-------|--------|
//! | [`sanitize_text`] | free text | text with scripts/tags removed and `& < > " '` escaped |
//! | [`sanitize_url`] | link target | the trimmed URL, or `""` if its scheme is not allowed |
//! | [`mask_card_number`] | card number | `•••• •••• •••• 1234` |
//! | [`is_valid_card_format`] | card number | `true` for 13 to 19 digits |
//! | [`format_expiry`] | expiry digits | `MM / YY` |
//!
//! None of them fail: degenerate input gives a degenerate (often empty)
//! result. Every output is safe to interpolate into a text node or quoted
//! attribute without further escaping.
//!
//! The two string sanitizers also exist as [`Sanitizer`] implementations
//! ([`TextSanitizer`], [`UrlSanitizer`]) for callers that want to hold one
//! behind a trait object or configure a custom URL policy with
//! [`UrlPolicyBuilder`].
//!
//! ## Quick start
//!
//! ```rust
//! use render_guard::{format_expiry, mask_card_number, sanitize_text, sanitize_url};
//!
//! assert_eq!(sanitize_text("<b>Tom</b> & Jerry"), "Tom &amp; Jerry");
//! assert_eq!(sanitize_url("javascript:alert(1)"), "");
//! assert_eq!(mask_card_number("4000 1234 5678 9012"), "•••• •••• •••• 9012");
//! assert_eq!(format_expiry("1225"), "12 / 25");
//! ```
//!
//! ## Limits
//!
//! This is not an HTML parser and not a substitute for a vetted HTML
//! sanitizer when markup must be preserved. Card checks are structural only:
//! no Luhn checksum, no issuer validation.
//!
//! ## Logging
//!
//! Diagnostic events are emitted through `tracing`. Card numbers, expiry
//! values and rejected URLs are never logged.

use std::sync::OnceLock;

pub mod card;
pub mod config;
pub mod error;
pub mod expiry;
pub mod sanitizer;

pub use card::{
    MAX_CARD_DIGITS, MIN_CARD_DIGITS, card_digits, is_valid_card_format, mask_card_number,
};
pub use config::UrlPolicyBuilder;
pub use error::{RenderGuardError, Result};
pub use expiry::{expiry_digits, format_expiry};
pub use sanitizer::{
    DEFAULT_ALLOWED_SCHEMES, DEFAULT_BLOCKED_PREFIXES, Sanitizer, TextSanitizer, UrlSanitizer,
    escape_html,
};

/// Sanitize untrusted free text with a [`TextSanitizer`].
///
/// ```
/// use render_guard::sanitize_text;
///
/// assert_eq!(sanitize_text("<script>alert(1)</script>  hello "), "hello");
/// ```
pub fn sanitize_text(text: &str) -> String {
    TextSanitizer::new().sanitize(text)
}

/// Sanitize a link or navigation target with the default [`UrlSanitizer`]
/// policy.
///
/// An empty result means the URL was rejected and must not be followed.
///
/// ```
/// use render_guard::sanitize_url;
///
/// assert_eq!(sanitize_url("https://example.com"), "https://example.com");
/// assert_eq!(sanitize_url("/checkout"), "/checkout");
/// assert_eq!(sanitize_url("data:text/html,<script>alert(1)</script>"), "");
/// ```
pub fn sanitize_url(url: &str) -> String {
    default_url_sanitizer().sanitize(url)
}

// Immutable after first use.
fn default_url_sanitizer() -> &'static UrlSanitizer {
    static DEFAULT: OnceLock<UrlSanitizer> = OnceLock::new();
    DEFAULT.get_or_init(UrlSanitizer::default)
}
