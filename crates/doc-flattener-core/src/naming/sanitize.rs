use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Whitespace followed by exactly 32 hex digits at the end of a name.
    static ref HASH_SUFFIX: Regex = Regex::new(r"\s+[0-9a-fA-F]{32}$").unwrap();
    /// Anything that is not a word character, whitespace, or a pictograph.
    static ref DISALLOWED: Regex = Regex::new(
        r"[^\w\s\x{1F300}-\x{1F5FF}\x{1F600}-\x{1F64F}\x{1F680}-\x{1F6FF}\x{1F900}-\x{1F9FF}\x{2600}-\x{26FF}\x{2700}-\x{27BF}]"
    )
    .unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Turn an exported folder name into a display name: drop the export hash
/// suffix, drop punctuation, and join words with underscores.
///
/// ```
/// use doc_flattener_core::naming::sanitize;
///
/// assert_eq!(
///     sanitize("Team Wiki 0123456789abcdef0123456789ABCDEF"),
///     "Team_Wiki"
/// );
/// assert_eq!(sanitize("Q3: Roadmap (draft)"), "Q3_Roadmap_draft");
/// ```
pub fn sanitize(segment: &str) -> String {
    clean_segment(strip_hash_suffix(segment))
}

/// Remove a trailing `" " + 32 hex` export suffix, if present.
pub fn strip_hash_suffix(segment: &str) -> &str {
    match HASH_SUFFIX.find(segment) {
        Some(m) => &segment[..m.start()],
        None => segment,
    }
}

/// The cleaning half of [`sanitize`], without hash stripping.
pub fn clean_segment(segment: &str) -> String {
    let kept = DISALLOWED.replace_all(segment, "");
    WHITESPACE_RUN.replace_all(kept.trim(), "_").into_owned()
}
