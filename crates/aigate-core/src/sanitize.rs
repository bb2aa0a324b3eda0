use std::sync::LazyLock;

use regex::Regex;

/// Upper bound on any free-text field forwarded to a provider.
pub const MAX_INPUT_LEN: usize = 10_000;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("script regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

/// Strips script blocks and remaining angle-bracket tags, then truncates to
/// [`MAX_INPUT_LEN`] characters. Idempotent and infallible; applied to every
/// free-text field before it reaches a provider call.
pub fn sanitize(input: &str) -> String {
    let stripped = SCRIPT_BLOCK.replace_all(input, "");
    let stripped = TAG.replace_all(&stripped, "");
    if stripped.chars().count() <= MAX_INPUT_LEN {
        stripped.into_owned()
    } else {
        stripped.chars().take(MAX_INPUT_LEN).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_blocks_case_insensitive() {
        assert_eq!(sanitize("a<SCRIPT src=x>alert(1)</ScRiPt>b"), "ab");
    }

    #[test]
    fn strips_remaining_tags() {
        assert_eq!(sanitize("<b>bold</b> and <img src=x>"), "bold and ");
    }

    #[test]
    fn text_without_brackets_passes_through() {
        assert_eq!(sanitize("hello world"), "hello world");
    }

    #[test]
    fn lone_angle_bracket_survives() {
        // No closing bracket means no tag match.
        assert_eq!(sanitize("2 < 3"), "2 < 3");
    }

    #[test]
    fn truncates_to_bound() {
        let long = "x".repeat(MAX_INPUT_LEN + 500);
        assert_eq!(sanitize(&long).chars().count(), MAX_INPUT_LEN);
    }

    #[test]
    fn idempotent() {
        for input in [
            "plain",
            "<b>bold</b>",
            "a<script>x</script>b",
            "<<b>nested>",
            "1<2 and 3>4",
            &"y".repeat(MAX_INPUT_LEN + 1),
        ] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn always_length_bounded() {
        for input in ["", "short", &"<i>".repeat(9_000), &"z".repeat(50_000)] {
            assert!(sanitize(input).chars().count() <= MAX_INPUT_LEN);
        }
    }
}
