//! Normalized glob-style pattern matching used by every policy gate.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use globset::GlobBuilder;

/// Trim and fully case-fold a string for comparison.
///
/// Folding goes through uppercase first so one-to-many mappings collapse
/// identically from both directions: `"ß"` and `"SS"` both fold to
/// `"ss"`. Plain lowercasing would leave `"ß"` unequal to `"ss"`.
#[must_use]
pub fn fold(s: &str) -> String {
    s.trim().to_uppercase().to_lowercase()
}

/// Return the first pattern in `patterns` that matches `item`.
///
/// Both sides are case-folded before matching; patterns are evaluated
/// left to right with shell-glob semantics (`*`, `?`, bracket classes).
/// The returned pattern is the literal string as supplied, so callers
/// can report exactly which rule fired. A pattern that fails to compile
/// matches nothing.
#[must_use]
pub fn match_blocked<'a>(item: &str, patterns: &'a [String]) -> Option<&'a str> {
    let folded = fold(item);
    patterns
        .iter()
        .find(|p| glob_matches(&fold(p.as_str()), &folded))
        .map(String::as_str)
}

/// Three-valued allowlist contract.
///
/// `allowed` absent means unrestricted (always true); present-but-empty
/// means deny-all (always false); otherwise at least one pattern must
/// match.
#[must_use]
pub fn is_allowed(item: &str, allowed: Option<&[String]>) -> bool {
    match allowed {
        None => true,
        Some(patterns) => match_blocked(item, patterns).is_some(),
    }
}

fn glob_matches(pattern: &str, candidate: &str) -> bool {
    // literal_separator stays off: these are item names and URLs, not
    // filesystem paths, so `*` must match `/` too.
    GlobBuilder::new(pattern)
        .literal_separator(false)
        .build()
        .ok()
        .is_some_and(|glob| glob.compile_matcher().is_match(candidate))
}

// ── Unit tests ───────────────────────────────────────────────────────────────
