//! Infra ID derivation.
//!
//! An infra ID is a short, cloud-API-safe identifier built from the
//! free-form cluster name:
//!
//! ```text
//! <sanitized name prefix>-<5 random chars>
//! ```
//!
//! The prefix is the cluster name truncated to `max_len - 6` characters,
//! with every character outside `[A-Za-z0-9-]` replaced by `-`. Short names
//! are not padded, so the result may be shorter than `max_len`.

use crate::constants::{MIN_INFRA_ID_MAX_LEN, RANDOM_SUFFIX_LEN};
use crate::random::RandomSource;

/// Derive an infra ID from `base` that fits in `max_len` characters.
///
/// Only the trailing suffix is random; the prefix is a pure function of
/// `base` and `max_len`.
///
/// Truncation counts Unicode characters, not UTF-8 bytes. For non-ASCII
/// names this keeps more of the name than a byte slice of the same length
/// would (`"éééééé"` keeps all six characters at `max_len = 12`, where a
/// 6-byte slice would keep three), and it never splits a character.
///
/// # Panics
///
/// Panics if `max_len` is smaller than the separator plus suffix
/// (`RANDOM_SUFFIX_LEN + 1`). Callers pick `max_len` from a fixed
/// platform policy, so a smaller value is a programming error.
pub fn generate_infra_id(base: &str, max_len: usize, random: &dyn RandomSource) -> String {
    assert!(
        max_len >= MIN_INFRA_ID_MAX_LEN,
        "infra ID max length {max_len} leaves no room for the {RANDOM_SUFFIX_LEN}-character suffix"
    );
    let max_base_len = max_len - (RANDOM_SUFFIX_LEN + 1);

    let truncated: String = base.chars().take(max_base_len).collect();
    let prefix = sanitize_base(&truncated);
    let suffix = random.alphanumeric(RANDOM_SUFFIX_LEN);

    format!("{prefix}-{suffix}")
}

/// Replace every character that is not an ASCII letter, digit or `-` with `-`.
///
/// Replacement is one-for-one: the result has exactly as many characters as
/// the input, and runs of invalid characters are not collapsed.
pub fn sanitize_base(base: &str) -> String {
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}
