//! Download names for uploaded files.

use std::path::Path;

use unicode_normalization::UnicodeNormalization;
use unredact::unredacted_file_name;

/// Reduce a client-supplied file name to a safe ASCII name.
///
/// The name is NFKD-normalized and non-ASCII characters are dropped. Path
/// separators and whitespace runs become single underscores, anything outside
/// `[A-Za-z0-9_.-]` is removed, and leading or trailing dots and underscores
/// are trimmed. The result may be empty.
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Name of the processed download for an uploaded file name.
///
/// The extension of the sanitized name is replaced; an empty stem becomes
/// `unredacted`.
pub fn download_name(upload_name: &str) -> String {
    let secured = secure_filename(upload_name);
    let stem = Path::new(&secured)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("");
    unredacted_file_name(stem)
}
