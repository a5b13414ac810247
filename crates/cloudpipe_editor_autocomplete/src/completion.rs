// SPDX-License-Identifier: MIT OR Apache-2.0
//! Suggestion and acceptance over a comma-delimited token field.
//!
//! Only the trailing, in-progress fragment ever participates: suggestions
//! match against it, and accepting a token replaces it. Tokens already
//! committed earlier in the field are never touched.

use crate::vocabulary::Vocabulary;

/// Split on `,` followed by optional whitespace
fn segments(text: &str) -> Vec<&str> {
    text.split(',').map(str::trim_start).collect()
}

/// Vocabulary entries matching the trailing fragment of `current_text`
///
/// An entry matches when it contains the fragment as a case-sensitive
/// substring; entries come back in vocabulary order. An empty fragment
/// (empty field, or a fresh segment right after a comma) matches everything.
pub fn suggest<'a>(current_text: &str, vocabulary: &'a Vocabulary) -> Vec<&'a str> {
    let fragment = segments(current_text).pop().unwrap_or_default();
    vocabulary
        .entries()
        .filter(|entry| entry.contains(fragment))
        .collect()
}

/// Replace the trailing fragment of `current_text` with `chosen`
///
/// Earlier segments are kept as committed and the list is rejoined with
/// `", "`.
pub fn accept(current_text: &str, chosen: &str) -> String {
    let mut parts = segments(current_text);
    parts.pop();
    parts.push(chosen);
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{attribute_metrics, filter_flags};

    #[test]
    fn suggest_matches_only_the_trailing_fragment() {
        let vocabulary = attribute_metrics();
        let suggestions = suggest("a, b, z_me", &vocabulary);
        assert!(suggestions.contains(&"z_mean"));
        assert!(suggestions.contains(&"z_median"));
        assert!(suggestions.iter().all(|entry| entry.contains("z_me")));
    }

    #[test]
    fn suggest_preserves_vocabulary_order() {
        let vocabulary = attribute_metrics();
        let suggestions = suggest("z_m", &vocabulary);
        let expected: Vec<&str> = vocabulary
            .entries()
            .filter(|entry| entry.contains("z_m"))
            .collect();
        assert_eq!(suggestions, expected);
    }

    #[test]
    fn suggest_is_case_sensitive() {
        let vocabulary = attribute_metrics();
        assert!(suggest("Z_me", &vocabulary).is_empty());
    }

    #[test]
    fn empty_fragment_suggests_the_whole_vocabulary() {
        let vocabulary = filter_flags();
        assert_eq!(suggest("", &vocabulary).len(), vocabulary.len());
        assert_eq!(suggest("-keep_first, ", &vocabulary).len(), vocabulary.len());
    }

    #[test]
    fn suggest_matches_anywhere_in_the_entry() {
        let vocabulary = filter_flags();
        let suggestions = suggest("scan_angle", &vocabulary);
        assert!(suggestions.contains(&"-keep_scan_angle <min_angle> <max_angle>"));
        assert!(suggestions.contains(&"-drop_abs_scan_angle_above <max_abs_angle>"));
    }

    #[test]
    fn accept_replaces_the_trailing_fragment() {
        assert_eq!(accept("a, b, z_me", "z_mean"), "a, b, z_mean");
    }

    #[test]
    fn accept_on_an_empty_field_inserts_the_token() {
        assert_eq!(accept("", "-keep_first"), "-keep_first");
    }

    #[test]
    fn accept_normalizes_the_separator() {
        assert_eq!(accept("z_max,z_me", "z_mean"), "z_max, z_mean");
    }

    #[test]
    fn accept_never_touches_committed_tokens() {
        let text = "-keep_first, -drop_z_below <min_z>, -keep_cir";
        assert_eq!(
            accept(text, "-keep_circle <x> <y> <radius>"),
            "-keep_first, -drop_z_below <min_z>, -keep_circle <x> <y> <radius>"
        );
    }
}
