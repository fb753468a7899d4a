//! String sanitizers for rendering untrusted input.
//!
//! Both sanitizers implement the [`Sanitizer`] trait, so callers can hold
//! either one behind a trait object and share it across threads.
//!
//! Built-in sanitizers:
//!
//! - [`TextSanitizer`] -- removes scripts and tags, escapes the rest.
//! - [`UrlSanitizer`] -- keeps only allow-listed URL schemes.

mod text;
mod url;

pub use self::text::{TextSanitizer, escape_html};
pub use self::url::{DEFAULT_ALLOWED_SCHEMES, DEFAULT_BLOCKED_PREFIXES, UrlSanitizer};

/// Trait for untrusted-string sanitizers.
///
/// Each sanitizer receives raw input and returns a value that is safe to
/// interpolate into a text node or attribute. Implementations never fail:
/// a rejected input produces a degenerate (usually empty) result instead.
///
/// Implementations must be `Send + Sync` so one instance can be shared by
/// many callers.
pub trait Sanitizer: Send + Sync {
    /// Transform the given input, returning the sanitized result.
    fn sanitize(&self, input: &str) -> String;
}

/// Trim surrounding whitespace, including the byte-order mark U+FEFF that
/// `str::trim` keeps.
pub(crate) fn trim_input(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
