//! URL scheme allow-listing for link and navigation targets.

use url::Url;

use super::{Sanitizer, trim_input};

/// Schemes accepted by the default policy.
pub const DEFAULT_ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "sms", "tel"];

/// Prefixes rejected by the default policy when the input is not an absolute URL.
pub const DEFAULT_BLOCKED_PREFIXES: &[&str] = &["javascript:", "data:"];

/// Sanitizer that keeps a URL only if its scheme is allow-listed.
///
/// The input is trimmed first. Absolute URLs (as parsed by the WHATWG URL
/// parser) are kept only when their scheme is in the allow-list. Inputs that
/// do not parse as absolute URLs, such as relative paths, are kept unless
/// they start with a blocked prefix like `javascript:`.
///
/// The output is either the trimmed input unchanged or an empty string, which
/// callers must treat as "do not navigate".
///
/// Use [`UrlPolicyBuilder`](crate::UrlPolicyBuilder) for a non-default policy.
///
/// # Example
///
/// ```
/// use render_guard::{Sanitizer, UrlSanitizer};
///
/// let sanitizer = UrlSanitizer::default();
/// assert_eq!(sanitizer.sanitize(" https://example.com "), "https://example.com");
/// assert_eq!(sanitizer.sanitize("/checkout"), "/checkout");
/// assert_eq!(sanitizer.sanitize("javascript:alert(1)"), "");
/// ```
#[derive(Clone, Debug)]
pub struct UrlSanitizer {
    allowed_schemes: Vec<String>,
    blocked_prefixes: Vec<String>,
}

impl UrlSanitizer {
    /// Both lists must already be lowercase.
    pub(crate) fn from_policy(allowed_schemes: Vec<String>, blocked_prefixes: Vec<String>) -> Self {
        Self {
            allowed_schemes,
            blocked_prefixes,
        }
    }

    /// The lowercase schemes this sanitizer accepts.
    pub fn allowed_schemes(&self) -> impl Iterator<Item = &str> {
        self.allowed_schemes.iter().map(String::as_str)
    }

    /// The lowercase prefixes rejected on inputs that are not absolute URLs.
    pub fn blocked_prefixes(&self) -> impl Iterator<Item = &str> {
        self.blocked_prefixes.iter().map(String::as_str)
    }

    /// Returns `true` if [`sanitize`](Sanitizer::sanitize) would keep `url`.
    ///
    /// Blank input is never allowed.
    pub fn is_allowed(&self, url: &str) -> bool {
        !self.sanitize(url).is_empty()
    }

    fn allows_scheme(&self, scheme: &str) -> bool {
        self.allowed_schemes.iter().any(|s| s == scheme)
    }

    fn blocked_prefix(&self, url: &str) -> Option<&str> {
        self.blocked_prefixes
            .iter()
            .find(|prefix| starts_with_ignore_ascii_case(url, prefix))
            .map(String::as_str)
    }
}

impl Default for UrlSanitizer {
    fn default() -> Self {
        Self::from_policy(
            DEFAULT_ALLOWED_SCHEMES.iter().map(|s| s.to_string()).collect(),
            DEFAULT_BLOCKED_PREFIXES.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl Sanitizer for UrlSanitizer {
    fn sanitize(&self, url: &str) -> String {
        let trimmed = trim_input(url);
        if trimmed.is_empty() {
            return String::new();
        }

        match Url::parse(trimmed) {
            // The parser lowercases the scheme.
            Ok(parsed) => {
                let scheme = parsed.scheme();
                if self.allows_scheme(scheme) {
                    trimmed.to_string()
                } else {
                    tracing::debug!(scheme, "Rejected URL with disallowed scheme");
                    String::new()
                }
            }
            Err(_) => match self.blocked_prefix(trimmed) {
                Some(prefix) => {
                    tracing::debug!(prefix, "Rejected non-absolute URL with blocked prefix");
                    String::new()
                }
                None => trimmed.to_string(),
            },
        }
    }
}

fn starts_with_ignore_ascii_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
