use proptest::prelude::*;
use xtask_fs::NormalizedPath;

proptest! {
    #[test]
    fn test_normalized_paths_never_contain_backslashes(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        prop_assert!(!path.as_str().contains('\\'));

        let roundtripped = NormalizedPath::new(path.to_native());
        prop_assert_eq!(path, roundtripped);
    }

    #[test]
    fn test_join_then_relative_to_recovers_segment(
        root in "/[a-z]{1,8}(/[a-z]{1,8}){0,3}",
        segment in "[a-z]{1,8}(/[a-z]{1,8}){0,3}",
    ) {
        let root = NormalizedPath::new(&root);
        let joined = root.join(&segment);
        prop_assert_eq!(joined.relative_to(&root), segment.as_str());
    }
}
