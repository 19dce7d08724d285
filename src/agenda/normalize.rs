use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical comparison key for free text.
///
/// Lowercases, decomposes (NFD), drops combining marks and collapses
/// whitespace, so "  Pérez " and "PEREZ" produce the same key. Total and pure.
///
/// Lowercasing happens before decomposition: some lowercase mappings emit
/// combining marks of their own (`İ` → `i̇`), and those must be stripped too
/// for `normalize(normalize(x)) == normalize(x)` to hold.
pub fn normalize(text: &str) -> String {
    let lowered: String = text.chars().flat_map(char::to_lowercase).collect();
    let folded: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
