use std::path::PathBuf;

const APP_DIR: &str = "issue-digest";

/// Returns the XDG config directory (~/.config or $XDG_CONFIG_HOME).
/// Empty values are treated as unset per XDG Base Directory Specification.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(xdg) = non_empty_env("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg));
    }
    non_empty_env("HOME").map(|home| PathBuf::from(home).join(".config"))
}

/// Directory holding the issue-digest config file.
pub fn app_config_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(APP_DIR))
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
