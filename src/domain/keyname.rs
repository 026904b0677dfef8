//! Keyname derivation and identity validation.
//!
//! Pure functions only. Zero imports from `crate::infra`,
//! `crate::application`, `std::fs`, or `std::net`.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::ValidationError;

/// Prefix baked into derived default key labels.
pub const KEYNAME_PREFIX: &str = "xdocker";

/// Label used when parameters carry no explicit keyname.
pub const DEFAULT_KEY_LABEL: &str = "default";

/// Keynames and explicit labels become filename stems; checked here before
/// any path interpolation to prevent path-traversal (CWE-22).
pub static KEY_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").expect("valid regex")
});

/// Validate a username before it is used as a storage path component.
///
/// # Errors
///
/// Returns `ValidationError::InvalidUsername` when the username is empty,
/// starts with a dot, or contains path separators, traversal sequences,
/// whitespace, or control characters.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let reject = |reason: &str| {
        Err(ValidationError::InvalidUsername {
            username: username.to_string(),
            reason: reason.to_string(),
        })
    };
    if username.is_empty() {
        return reject("must not be empty");
    }
    if username.starts_with('.') {
        return reject("must not start with '.'");
    }
    if username.contains("..") {
        return reject("must not contain '..'");
    }
    if username
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_whitespace() || c.is_control())
    {
        return reject("must not contain path separators, whitespace, or control characters");
    }
    Ok(())
}

/// Validate an explicit keyname label against [`KEY_LABEL_RE`].
///
/// # Errors
///
/// Returns `ValidationError::InvalidKeyname` when the label doesn't match.
pub fn validate_key_label(label: &str) -> Result<(), ValidationError> {
    if KEY_LABEL_RE.is_match(label) {
        Ok(())
    } else {
        Err(ValidationError::InvalidKeyname(label.to_string()))
    }
}

/// Derive the stable keyname for a user's credential set.
///
/// The base is the explicit label when given, otherwise
/// `xdocker_<DEFAULT_KEY_LABEL>_<username>`. The final keyname prefixes the
/// base with the credential fingerprint: `<fingerprint>_<base>`. Same
/// inputs always reproduce the same keyname.
#[must_use]
pub fn derive_keyname(username: &str, label: Option<&str>, fingerprint: &str) -> String {
    let base = match label {
        Some(label) => label.to_string(),
        None => format!("{KEYNAME_PREFIX}_{DEFAULT_KEY_LABEL}_{username}"),
    };
    format!("{fingerprint}_{base}")
}
