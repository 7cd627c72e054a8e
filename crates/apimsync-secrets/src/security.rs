//! Security utilities for token handling
//!
//! Provides:
//! - SecureString with zeroize
//! - Audit logging of token acquisition (never logs token values)
//! - Error sanitization

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bearer token or client secret, wiped from memory when dropped.
///
/// `Debug` and `Display` never print the value.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecureString {
    inner: String,
}

impl SecureString {
    pub fn new(value: String) -> Self {
        Self { inner: value }
    }

    /// Raw value for an `Authorization` header or a token request form
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureString([REDACTED])")
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Audit log entry for a token acquisition
#[derive(Debug, Clone)]
pub struct AuditLog {
    pub platform: String,
    pub source: String,
    pub success: bool,
    pub error: Option<String>,
}

impl AuditLog {
    pub fn new(platform: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            source: source.into(),
            success: true,
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl AsRef<str>) -> Self {
        self.success = false;
        self.error = Some(sanitize_error(error.as_ref()));
        self
    }

    /// Log the audit entry (never logs token values)
    pub fn log(&self) {
        if self.success {
            tracing::debug!(
                platform = %self.platform,
                source = %self.source,
                "Token acquired"
            );
        } else {
            tracing::warn!(
                platform = %self.platform,
                source = %self.source,
                error = ?self.error,
                "Token acquisition failed"
            );
        }
    }
}

static REDACTIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (
            r#"(?i)(access_token|client_secret|token|secret|password)("?\s*[=:]\s*"?)[^\s&,"]+"#,
            "$1$2[REDACTED]",
        ),
        // Bearer headers
        (r"(?i)bearer\s+[^\s]+", "Bearer [REDACTED]"),
        // Base64-looking strings (48+ chars of base64 characters)
        (r"[A-Za-z0-9+/_\-\.]{48,}={0,2}", "[REDACTED_BASE64]"),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Sanitize error messages to remove potential secret values
pub fn sanitize_error(error: &str) -> String {
    let mut sanitized = error.to_string();
    for (re, replacement) in REDACTIONS.iter() {
        sanitized = re.replace_all(&sanitized, *replacement).into_owned();
    }
    sanitized
}
