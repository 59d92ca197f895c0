use assetgraph::installconfig::{generate_infra_id, sanitize_base};
use assetgraph::random::{SequenceRandom, SystemRandom};
use proptest::prelude::*;

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

proptest! {
    /// Sanitizing keeps one output character per input character.
    #[test]
    fn sanitize_preserves_length_and_charset(base in any::<String>()) {
        let sanitized = sanitize_base(&base);
        prop_assert_eq!(sanitized.chars().count(), base.chars().count());
        prop_assert!(sanitized.chars().all(is_allowed));
    }

    /// Already-valid names pass through unchanged.
    #[test]
    fn sanitize_is_identity_on_valid_names(base in "[A-Za-z0-9-]{0,40}") {
        prop_assert_eq!(sanitize_base(&base), base);
    }

    /// Output never exceeds the requested maximum.
    #[test]
    fn infra_id_respects_max_len(base in any::<String>(), max_len in 6usize..64) {
        let id = generate_infra_id(&base, max_len, &SystemRandom);
        prop_assert!(id.len() <= max_len, "{} is longer than {}", id, max_len);
        prop_assert!(id.chars().all(is_allowed));
    }

    /// Long names are cut to exactly `max_len - 6` sanitized characters.
    #[test]
    fn infra_id_truncates_long_names(base in "\\PC{30,60}", max_len in 6usize..30) {
        let random = SequenceRandom::new().with_suffixes(["qqqqq"]);
        let id = generate_infra_id(&base, max_len, &random);

        let expected_prefix: String = base.chars().take(max_len - 6).collect();
        prop_assert_eq!(id, format!("{}-qqqqq", sanitize_base(&expected_prefix)));
    }

    /// Short names are kept whole, so the output is shorter than the limit.
    #[test]
    fn infra_id_keeps_short_names(base in "[a-z0-9-]{0,21}") {
        let random = SequenceRandom::new();
        let id = generate_infra_id(&base, 27, &random);
        prop_assert_eq!(id.len(), base.len() + 6);
        let prefix = format!("{}-", base);
        prop_assert!(id.starts_with(&prefix));
    }
}
