//! Error types for the `render_guard` crate.
//!
//! The sanitizers themselves are total and never fail; errors only come
//! from building a custom URL policy.

/// All errors that can occur while configuring a sanitizer.
#[derive(Debug, thiserror::Error)]
pub enum RenderGuardError {
    /// A configured URL scheme is not a valid scheme token.
    #[error("Invalid URL scheme: {0:?}")]
    InvalidScheme(String),

    /// The policy as a whole is invalid.
    #[error("Config error: {0}")]
    Config(String),
}

/// A type alias for `Result<T, RenderGuardError>`.
pub type Result<T> = std::result::Result<T, RenderGuardError>;
