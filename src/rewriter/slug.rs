use std::sync::OnceLock;

use regex::Regex;

struct SlugPatterns {
    disallowed: Regex,
    whitespace: Regex,
    dash_runs: Regex,
}

fn slug_patterns() -> &'static SlugPatterns {
    static PATTERNS: OnceLock<SlugPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| SlugPatterns {
        disallowed: Regex::new(r"[^a-z0-9 -]+").expect("invalid disallowed character regex"),
        whitespace: Regex::new(r"\s").expect("invalid whitespace regex"),
        dash_runs: Regex::new(r"-{2,}").expect("invalid dash run regex"),
    })
}

/// Reduce `input` to a URL-safe slug.
///
/// Characters outside `a-z`, `0-9`, space and `-` are dropped *before* the result is
/// lower-cased, so uppercase ASCII letters disappear rather than being folded. Whitespace
/// then becomes `-` and runs of dashes collapse to one.
pub fn sanitize_str(input: &str) -> String {
    let patterns = slug_patterns();
    let kept = patterns.disallowed.replace_all(input, "");
    let dashed = patterns.whitespace.replace_all(&kept, "-");
    patterns.dash_runs.replace_all(&dashed, "-").to_lowercase()
}
