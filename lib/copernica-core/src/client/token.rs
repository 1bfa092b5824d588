use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Copernica REST access token.
///
/// The token travels as the `access_token` query parameter of every request.
/// Its memory is cleared on drop, and neither `Debug` nor `Display` reveal it,
/// so clients and calls can be logged safely.
///
/// # Example
///
/// ```rust
/// use copernica_core::AccessToken;
///
/// let token = AccessToken::from("0123456789abcdef");
/// assert_eq!(token.to_string(), "0123...cdef");
/// assert_eq!(format!("{token:?}"), r#"AccessToken("[REDACTED]")"#);
/// ```
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a token from the provided value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token value.
    ///
    /// Only used when rendering the query string; avoid keeping the reference around.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty (or only whitespace).
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    fn masked(&self) -> String {
        let value = self.0.as_str();
        let char_count = value.chars().count();
        if char_count <= 8 {
            return "***".to_string();
        }
        let head: String = value.chars().take(4).collect();
        let tail: String = value.chars().skip(char_count - 4).collect();
        format!("{head}...{tail}")
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
