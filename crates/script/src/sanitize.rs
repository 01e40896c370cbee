/// Characters that are invalid in file names on at least one common
/// filesystem, and the look-alike each is replaced with.
const REPLACEMENTS: [(char, char); 9] = [
    ('*', '★'),
    ('|', '¦'),
    ('\\', '⧹'),
    ('/', '⁄'),
    (':', '։'),
    ('"', '″'),
    ('<', '‹'),
    ('>', '›'),
    ('?', '？'),
];

/// Makes a name safe to use as a single path component.
///
/// Reserved characters become visually similar Unicode characters, runs of
/// three dots become an ellipsis, and control characters are dropped. None of
/// the replacements are themselves reserved, so sanitizing twice changes
/// nothing.
pub fn sanitize_name(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| {
            REPLACEMENTS
                .iter()
                .find_map(|(from, to)| (*from == c).then_some(*to))
                .unwrap_or(c)
        })
        .collect();
    if sanitized.contains("...") {
        sanitized = sanitized.replace("...", "…");
    }
    sanitized
}
