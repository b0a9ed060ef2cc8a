//! Directory defaults for xtask commands

use std::path::PathBuf;

/// Environment variable naming the content directory.
pub const CONTENT_DIR_ENV: &str = "COMBAT_CONTENT_DIR";

/// Content directory used when `--content` is not given.
///
/// `$COMBAT_CONTENT_DIR` if set, otherwise `data/` at the workspace root.
pub fn content_dir() -> PathBuf {
    std::env::var_os(CONTENT_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data"))
}

/// Platform-specific directory for saved simulation reports
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/combat/reports`
/// - Linux: `~/.local/share/combat/reports` (or `$XDG_DATA_HOME/combat/reports`)
/// - Windows: `%APPDATA%\combat\reports`
/// - Fallback: `./reports`
pub fn report_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "combat")
        .map(|dirs| dirs.data_dir().join("reports"))
        .unwrap_or_else(|| PathBuf::from("./reports"))
}
