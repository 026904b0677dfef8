//! Property-based tests for fingerprinting and keyname derivation.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use xdocker::domain::fingerprint::{FINGERPRINT_LEN, credential_fingerprint};
use xdocker::domain::keyname::{derive_keyname, validate_username};

// ── Fingerprint invariants ────────────────────────────────────────────────────

proptest! {
    /// The same value sequence always produces the same fingerprint.
    #[test]
    fn prop_fingerprint_is_deterministic(
        values in proptest::collection::vec(".*", 0..6),
    ) {
        prop_assert_eq!(
            credential_fingerprint(&values),
            credential_fingerprint(&values)
        );
    }

    /// Every fingerprint is exactly `FINGERPRINT_LEN` lowercase hex chars.
    #[test]
    fn prop_fingerprint_is_fixed_length_lowercase_hex(
        values in proptest::collection::vec(".*", 0..6),
    ) {
        let fp = credential_fingerprint(&values);
        prop_assert_eq!(fp.len(), FINGERPRINT_LEN);
        prop_assert!(
            fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
            "non-hex char in fingerprint: {}",
            fp
        );
    }

    /// Swapping two values changes the fingerprint whenever it changes the
    /// concatenated byte sequence.
    #[test]
    fn prop_fingerprint_depends_on_value_order(
        a in "[a-z]{1,8}",
        b in "[a-z]{1,8}",
    ) {
        if format!("{a}{b}") != format!("{b}{a}") {
            prop_assert_ne!(
                credential_fingerprint([&a, &b]),
                credential_fingerprint([&b, &a])
            );
        }
    }
}

#[test]
fn test_fingerprint_uniqueness_batch() {
    // 100 distinct credential sets must produce 100 distinct fingerprints.
    let fps: std::collections::HashSet<_> = (0..100)
        .map(|i| credential_fingerprint([format!("credential-{i}")]))
        .collect();
    assert_eq!(fps.len(), 100, "fingerprint collision in batch");
}

// ── Keyname invariants ────────────────────────────────────────────────────────

proptest! {
    /// Without an override the keyname is `<fp>_xdocker_default_<username>`.
    #[test]
    fn prop_default_keyname_has_fingerprint_then_default_base(
        username in "[a-z][a-z0-9]{0,15}",
    ) {
        let fp = credential_fingerprint(["k", "s"]);
        prop_assert_eq!(
            derive_keyname(&username, None, &fp),
            format!("{fp}_xdocker_default_{username}")
        );
    }

    /// An override label fully replaces the default base.
    #[test]
    fn prop_override_label_replaces_default_base(
        label in "[A-Za-z0-9][A-Za-z0-9_.-]{0,20}",
    ) {
        let fp = credential_fingerprint(["k", "s"]);
        prop_assert_eq!(
            derive_keyname("alice", Some(label.as_str()), &fp),
            format!("{fp}_{label}")
        );
    }

    /// Usernames containing a path separator never validate.
    #[test]
    fn prop_usernames_with_separators_are_rejected(
        prefix in "[a-z]{0,5}",
        suffix in "[a-z]{0,5}",
    ) {
        let username = format!("{prefix}/{suffix}");
        prop_assert!(validate_username(&username).is_err(), "accepted: {}", username);
    }
}
