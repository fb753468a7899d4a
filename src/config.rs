//! Builder for configuring a [`UrlSanitizer`] policy.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{RenderGuardError, Result};
use crate::sanitizer::{DEFAULT_ALLOWED_SCHEMES, DEFAULT_BLOCKED_PREFIXES, UrlSanitizer};

/// Builder for a [`UrlSanitizer`] with a custom scheme policy.
///
/// Starts from the default policy: schemes `http`, `https`, `mailto`, `sms`,
/// `tel`, and blocked prefixes `javascript:` and `data:`. Every scheme added
/// beyond the defaults widens the XSS surface, so doing so logs a warning.
///
/// # Example
///
/// ```
/// use render_guard::{Sanitizer, UrlPolicyBuilder};
///
/// let sanitizer = UrlPolicyBuilder::new()
///     .allowed_schemes(["https"])
///     .block_prefix("vbscript:")
///     .build()
///     .unwrap();
///
/// assert_eq!(sanitizer.sanitize("https://example.com"), "https://example.com");
/// assert_eq!(sanitizer.sanitize("http://example.com"), "");
/// ```
#[derive(Clone, Debug)]
pub struct UrlPolicyBuilder {
    allowed_schemes: Vec<String>,
    blocked_prefixes: Vec<String>,
}

impl UrlPolicyBuilder {
    /// Create a new builder holding the default policy.
    pub fn new() -> Self {
        Self {
            allowed_schemes: DEFAULT_ALLOWED_SCHEMES.iter().map(|s| s.to_string()).collect(),
            blocked_prefixes: DEFAULT_BLOCKED_PREFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add a scheme (without the trailing `:`) to the allow-list.
    pub fn allow_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.allowed_schemes.push(scheme.into());
        self
    }

    /// Replace the allow-list.
    pub fn allowed_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_schemes = schemes.into_iter().map(Into::into).collect();
        self
    }

    /// Add a prefix that rejects inputs which are not absolute URLs.
    pub fn block_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.blocked_prefixes.push(prefix.into());
        self
    }

    /// Validate the policy and build the [`UrlSanitizer`].
    ///
    /// Schemes and prefixes are lowercased and deduplicated. Fails with
    /// [`RenderGuardError::InvalidScheme`] for a scheme that is not an RFC 3986
    /// scheme token, and with [`RenderGuardError::Config`] for an empty
    /// allow-list or an empty or non-ASCII prefix.
    pub fn build(self) -> Result<UrlSanitizer> {
        let mut allowed_schemes: Vec<String> = Vec::with_capacity(self.allowed_schemes.len());
        for scheme in self.allowed_schemes {
            if !scheme_token().is_match(&scheme) {
                return Err(RenderGuardError::InvalidScheme(scheme));
            }
            let scheme = scheme.to_ascii_lowercase();
            if allowed_schemes.contains(&scheme) {
                continue;
            }
            if !DEFAULT_ALLOWED_SCHEMES.contains(&scheme.as_str()) {
                tracing::warn!(scheme = %scheme, "URL policy allows a scheme beyond the defaults");
            }
            allowed_schemes.push(scheme);
        }

        if allowed_schemes.is_empty() {
            return Err(RenderGuardError::Config("URL scheme allow-list is empty".into()));
        }

        let mut blocked_prefixes: Vec<String> = Vec::with_capacity(self.blocked_prefixes.len());
        for prefix in self.blocked_prefixes {
            if prefix.is_empty() || !prefix.is_ascii() {
                return Err(RenderGuardError::Config(format!(
                    "blocked URL prefix must be non-empty ASCII: {prefix:?}"
                )));
            }
            let prefix = prefix.to_ascii_lowercase();
            if !blocked_prefixes.contains(&prefix) {
                blocked_prefixes.push(prefix);
            }
        }

        Ok(UrlSanitizer::from_policy(allowed_schemes, blocked_prefixes))
    }
}

impl Default for UrlPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn scheme_token() -> &'static Regex {
    static SCHEME_TOKEN: OnceLock<Regex> = OnceLock::new();
    SCHEME_TOKEN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").expect("scheme token pattern is valid")
    })
}
