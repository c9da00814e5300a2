//! Fuzz target for path pattern compilation and matching.
//!
//! Arbitrary templates must either compile or fail with an error, and
//! every match must honour the final matching group shape.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use trellis_core::path::{PathPattern, RemainingPath};

#[derive(Debug, Arbitrary)]
struct FuzzMatch {
    pattern: String,
    limited: bool,
    paths: Vec<String>,
}

fuzz_target!(|data: FuzzMatch| {
    // Limit sizes to keep regex compilation cheap
    if data.pattern.len() > 256 {
        return;
    }

    let Ok(pattern) = PathPattern::new(&data.pattern, data.limited) else {
        return;
    };

    for path in data.paths.into_iter().take(32) {
        let remaining = RemainingPath::new(path);
        let result = pattern.match_path(&remaining);

        if let Some(result) = &result {
            let group = result.final_matching_group();
            let stripped = remaining.without_params();
            if !stripped.ends_with('/') {
                assert!(group.is_empty() || (group.starts_with('/') && !group.ends_with('/')));
            }
            assert_eq!(result.final_capturing_group(), group);
        }

        assert_eq!(
            pattern.matches_with_empty(&remaining),
            result.is_some_and(|r| r.is_final_capturing_group_empty_or_slash())
        );
    }
});
