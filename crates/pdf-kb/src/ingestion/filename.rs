//! Upload filename checks

/// True when `name` ends in a `.pdf` extension (any case)
pub fn has_pdf_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Reduce an uploaded filename to a safe basename.
///
/// Path separators become spaces, non-ASCII characters are dropped, runs of
/// whitespace become a single `_`, anything outside `[A-Za-z0-9_.-]` is
/// removed and leading/trailing `.`/`_` are stripped. May return an empty
/// string.
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .filter(char::is_ascii)
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    filtered.trim_matches(|c| c == '.' || c == '_').to_string()
}
