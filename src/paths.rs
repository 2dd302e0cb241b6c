use std::path::PathBuf;

/// Returns the root Vista directory path.
///
/// Resolution order:
/// 1. `VISTA_ROOT` environment variable (if set)
/// 2. Current working directory + `.vista`
pub fn vista_root() -> PathBuf {
    if let Ok(root) = std::env::var("VISTA_ROOT") {
        PathBuf::from(root)
    } else {
        PathBuf::from(".vista")
    }
}

/// Returns the default directory holding persisted view preferences.
pub fn preferences_dir() -> PathBuf {
    vista_root().join("views")
}
