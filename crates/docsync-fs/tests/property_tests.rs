use docsync_fs::{IgnoreRule, NormalizedPath, content_hash};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_hash_is_64_lowercase_hex(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let hash = content_hash(&bytes);
        prop_assert_eq!(hash.len(), 64);
        prop_assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_normalization_invariants(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        let as_str = path.as_str();

        prop_assert!(!as_str.contains('\\'));
        prop_assert!(!as_str.contains("//"));

        // Normalizing twice is the identity
        let again = NormalizedPath::new(as_str);
        prop_assert_eq!(again.as_str(), as_str);
    }

    #[test]
    fn test_rule_matching_never_panics(pattern in "[a-z*?/!.]{0,12}", path in "[a-z./]{0,24}") {
        let rule = IgnoreRule::parse(&pattern);
        let _ = rule.matches(&path);
    }

    #[test]
    fn test_literal_rule_matches_itself(name in "[a-z][a-z0-9_.-]{0,10}") {
        let rule = IgnoreRule::parse(&name);
        prop_assert!(rule.matches(&name));
        let nested = format!("dir/{}", name);
        prop_assert!(rule.matches(&nested));
    }
}
