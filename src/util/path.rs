use std::path::{Path, PathBuf};

use regex::Regex;

/// Expand environment variables in a path string.
///
/// Supports:
/// - `$VAR` syntax
/// - `${VAR}` syntax
/// - `~` for home directory
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(expand_env_vars(path.to_string_lossy().as_ref()))
}

/// Make a pathway name usable as a file name.
///
/// Path separators, characters reserved on Windows and control characters
/// become `_`; surrounding whitespace and dots are trimmed.
pub fn sanitize_file_name(name: &str) -> String {
    let reserved = Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).expect("valid regex");
    let sanitized = reserved.replace_all(name, "_");
    let trimmed = sanitized.trim().trim_matches('.');
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}
