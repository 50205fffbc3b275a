//! Cache-artifact matching for clean
//!
//! Matching is a plain substring test against the stored path, so a path
//! such as `mybuild/readme.md` matches `build/`. Tightening this to whole
//! path components would change which chains existing stores lose.

/// Markers of interpreter caches and build output.
pub const CACHE_PATTERNS: &[&str] = &[
    ".pyc",
    ".pyo",
    ".pyd",
    ".so",
    "__pycache__/",
    ".pytest_cache/",
    ".mypy_cache/",
    "dist/",
    "build/",
    ".eggs/",
    ".egg-info/",
];

/// Whether a stored path looks like a cache or build artifact.
///
/// True if the path contains a pattern, or ends with a pattern stripped of
/// its trailing `/`.
pub fn is_cache_artifact(path: &str) -> bool {
    CACHE_PATTERNS.iter().any(|pattern| {
        path.contains(pattern) || path.ends_with(pattern.trim_end_matches('/'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pkg/__pycache__/mod.cpython-312.pyc", true)]
    #[case("mod.pyc", true)]
    #[case("lib/_ext.so", true)]
    #[case("dist/pkg-1.0.tar.gz", true)]
    #[case("build/lib/x.py", true)]
    #[case("pkg.egg-info/PKG-INFO", true)]
    #[case(".eggs/README.txt", true)]
    #[case("out/build", true)]
    #[case("mybuild/readme.md", true)]
    #[case("src/main.py", false)]
    #[case("docs/building.md", false)]
    #[case("README.md", false)]
    fn cache_artifact_matching(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_cache_artifact(path), expected, "{path}");
    }
}
