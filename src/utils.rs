/// Compute Blake3 hash of an in-memory buffer
pub fn compute_hash(content: &[u8]) -> String {
    blake3::hash(content).to_hex().to_string()
}

/// Get the text after the last '.' of a filename, lowercased.
/// Returns None when the name has no '.' at all.
pub fn get_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

/// Reduce a client-supplied filename to something safe to join onto the
/// upload folder: last path component only, ASCII letters, digits, '.', '_'
/// and '-', whitespace folded into '_'.
pub fn sanitize_filename(filename: &str) -> String {
    let last = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let cleaned: String = last
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(*c, '.' | '_' | '-'))
        .collect();

    cleaned.trim_matches(|c: char| c == '.' || c == '_').to_string()
}
