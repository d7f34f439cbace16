// Cache path and key utilities.
// Names the session storage keys and where file-backed sessions live on disk.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Storage key holding the remote quote list for the session.
pub const QUOTES_KEY: &str = "remoteQuotes";

/// Storage key for an identity's project subset.
pub fn projects_key(identity: &str) -> String {
    format!("projects_cache_{}", identity)
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "showcase")
}

/// Get the base cache directory (~/.cache/showcase on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Default location of the config file.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Path to the log file written by the binary.
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("showcase.log"))
}

/// Directory backing a named session.
pub fn session_dir(session: &str) -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("sessions").join(sanitize_name(session)))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
