//! Output file naming.

use std::path::{Path, PathBuf};

/// Suffix appended to the input's base name.
pub const OUTPUT_SUFFIX: &str = "_unredacted.pdf";

/// Base name used when the input has none.
const FALLBACK_BASE: &str = "unredacted";

/// Build `<base>_unredacted.pdf`, falling back to `unredacted` for an
/// empty base.
pub fn unredacted_file_name(base: &str) -> String {
    let base = if base.is_empty() { FALLBACK_BASE } else { base };
    format!("{base}{OUTPUT_SUFFIX}")
}

/// The default output path for `input`: its last extension replaced by
/// `_unredacted.pdf`, in the same directory.
///
/// `scans/report.pdf` becomes `scans/report_unredacted.pdf` and
/// `archive.tar.gz` becomes `archive.tar_unredacted.pdf`.
pub fn output_path_for(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let base = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(unredacted_file_name(&base))
}
