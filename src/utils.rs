/*!
 * Utility functions for paper-export
 */

use std::path::{Path, PathBuf};

/// Path of `remote_path` relative to `root`, without a leading separator.
///
/// The prefix match ignores ASCII case since Dropbox paths are
/// case-insensitive, and only strips whole path components. Paths outside
/// `root` are returned whole.
pub fn relative_remote_path<'a>(remote_path: &'a str, root: &str) -> &'a str {
    let stripped = remote_path
        .get(..root.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(root))
        .map(|_| &remote_path[root.len()..])
        .filter(|rest| rest.is_empty() || rest.starts_with('/'))
        .unwrap_or(remote_path);

    stripped.trim_start_matches('/')
}

/// Local output path for a remote document.
///
/// Strips `root` from `remote_path`, swaps `source_ext` for `output_ext` and
/// joins the result onto `output_dir` one component at a time.
pub fn output_path(
    remote_path: &str,
    root: &str,
    output_dir: &Path,
    source_ext: &str,
    output_ext: &str,
) -> PathBuf {
    let relative = relative_remote_path(remote_path, root);
    let relative = relative.strip_suffix(source_ext).unwrap_or(relative);

    let (dirs, file_stem) = relative.rsplit_once('/').unwrap_or(("", relative));

    let mut path = output_dir.to_path_buf();
    for dir in dirs
        .split('/')
        .filter(|c| !c.is_empty() && *c != "." && *c != "..")
    {
        path.push(dir);
    }
    path.push(format!("{}{}", file_stem, output_ext));

    path
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
