use sanitize_filename::{sanitize_with_options, Options};
use unicode_normalization::UnicodeNormalization;

/// Reduces a client-supplied file name to a safe, flat storage name.
///
/// Accented letters are decomposed and keep their ASCII base letter. Directory
/// components are discarded, whitespace becomes `_`, anything outside
/// `[A-Za-z0-9._-]` is dropped and leading/trailing dots and underscores are
/// trimmed. Reserved device names (`CON`, `nul.txt`, ...) come back empty on
/// every platform. An empty return value means the name is unusable.
pub fn secure_filename(file_name: &str) -> String {
    let ascii = file_name.nfkd().filter(char::is_ascii).collect::<String>();
    let last_component = ascii.rsplit(&['/', '\\'][..]).next().unwrap_or_default();
    let flattened = last_component.split_whitespace().collect::<Vec<_>>().join("_");
    let filtered = flattened
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect::<String>();
    let trimmed = filtered.trim_matches(&['.', '_'][..]);
    let options = Options {
        windows: true,
        truncate: true,
        replacement: "",
    };
    sanitize_with_options(trimmed, options)
}
