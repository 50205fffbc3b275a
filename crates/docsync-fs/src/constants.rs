//! Built-in exclusion lists.
//!
//! These apply to every push regardless of the user's ignore rules file and
//! cannot be overridden by it.

/// Default name of the ignore rules file, relative to the project root.
pub const DEFAULT_IGNORE_FILE: &str = ".syncignore";

/// Version-control metadata directories.
pub const VCS_DIRS: &[&str] = &[".git", ".hg", ".svn"];

/// Cache and build-artifact directories.
pub const CACHE_DIRS: &[&str] = &[
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".tox",
    ".coverage",
    "htmlcov",
    "dist",
    "build",
    ".eggs",
    "node_modules",
];

/// Suffix of packaging metadata directories (`foo.egg-info`).
pub const EGG_INFO_SUFFIX: &str = ".egg-info";

/// File name endings of compiled artifacts.
pub const COMPILED_EXTENSIONS: &[&str] = &[".pyc", ".pyo", ".pyd", ".so"];

/// Returns true if a single path component names a directory that is never synced.
pub fn is_denied_component(component: &str) -> bool {
    VCS_DIRS.contains(&component)
        || CACHE_DIRS.contains(&component)
        || component.ends_with(EGG_INFO_SUFFIX)
}

/// Returns true if a file name ends in a compiled-artifact extension.
pub fn is_compiled_artifact(file_name: &str) -> bool {
    COMPILED_EXTENSIONS
        .iter()
        .any(|ext| file_name.ends_with(ext))
}
