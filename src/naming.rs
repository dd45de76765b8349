/// Render an arbitrary section title or number as a filesystem-safe token.
///
/// Keeps alphanumerics, spaces, hyphens and underscores, drops every other
/// character, trims, then replaces spaces with underscores. Deterministic and
/// independent of the target filesystem.
pub fn sanitize(name: &str) -> String {
    let safe: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    safe.trim().replace(' ', "_")
}
