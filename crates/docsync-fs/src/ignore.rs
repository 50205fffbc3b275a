//! Ignore rules
//!
//! Decides which local paths take part in a push. Two layers apply, in order:
//!
//! 1. Built-in exclusions from [`crate::constants`] (VCS metadata, cache
//!    directories, compiled artifacts). These cannot be overridden.
//! 2. User rules, one pattern per line in `<root>/.syncignore`.
//!
//! Each rule is parsed once into tokens (with a directory-only flag) and
//! compiled into a single [`Regex`] matched against the whole
//! root-relative path. Supported syntax:
//!
//! - a leading `/` is dropped; the rest of the rule decides where it matches
//! - trailing `/` matches the named directory and everything beneath it
//! - `*` matches within one path component, `?` matches one character
//! - `**/` matches zero or more directories, a bare `**` matches anything
//! - a rule without a `/` matches an entry of that name at any depth
//! - a rule with a `/` must match the full path from the root
//!
//! Negation (`!pattern`) is not supported; such rules never match.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::NormalizedPath;
use crate::constants::{self, DEFAULT_IGNORE_FILE};

/// One element of a parsed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    /// `*`
    Star,
    /// `?`
    Single,
    /// bare `**`
    AnyPath,
    /// `**/`
    AnyDirs,
}

#[derive(Debug, Clone)]
enum Matcher {
    Compiled {
        regex: Regex,
        anchored: bool,
        dir_only: bool,
    },
    /// Rule could not be compiled; falls back to plain containment.
    Substring(String),
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternError {
    Empty,
    EmptySegment,
    Regex(String),
}

/// A single compiled ignore pattern.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    raw: String,
    matcher: Matcher,
}

impl IgnoreRule {
    /// Compile a raw pattern line.
    pub fn parse(raw: &str) -> Self {
        let matcher = compile(raw).unwrap_or_else(|err| match err {
            PatternError::Empty => Matcher::Never,
            PatternError::EmptySegment | PatternError::Regex(_) => {
                tracing::warn!(pattern = raw, error = ?err, "Malformed ignore pattern, using substring match");
                Matcher::Substring(raw.to_string())
            }
        });
        Self {
            raw: raw.to_string(),
            matcher,
        }
    }

    /// The pattern as written in the rules file.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the rule only matches at a fixed position from the root.
    pub fn is_anchored(&self) -> bool {
        matches!(self.matcher, Matcher::Compiled { anchored: true, .. })
    }

    /// Whether the rule names a directory (trailing `/`).
    pub fn is_dir_only(&self) -> bool {
        matches!(self.matcher, Matcher::Compiled { dir_only: true, .. })
    }

    /// Test a forward-slash path relative to the root.
    pub fn matches(&self, relative: &str) -> bool {
        match &self.matcher {
            Matcher::Never => false,
            Matcher::Substring(needle) => relative.contains(needle.as_str()),
            Matcher::Compiled { regex, .. } => regex.is_match(relative),
        }
    }
}

fn compile(raw: &str) -> Result<Matcher, PatternError> {
    if raw.starts_with('!') {
        return Ok(Matcher::Never);
    }

    let body = raw.strip_prefix('/').unwrap_or(raw);
    let (body, dir_only) = match body.strip_suffix('/') {
        Some(rest) => (rest, true),
        None => (body, false),
    };

    if body.is_empty() {
        return Err(PatternError::Empty);
    }
    if body.split('/').any(str::is_empty) {
        return Err(PatternError::EmptySegment);
    }

    let anchored = body.contains('/');
    let regex = Regex::new(&to_regex(&tokenize(body), anchored, dir_only))
        .map_err(|e| PatternError::Regex(e.to_string()))?;

    Ok(Matcher::Compiled {
        regex,
        anchored,
        dir_only,
    })
}

fn tokenize(body: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        let token = match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    Token::AnyDirs
                } else {
                    Token::AnyPath
                }
            }
            '*' => Token::Star,
            '?' => Token::Single,
            _ => {
                literal.push(c);
                continue;
            }
        };
        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }
        tokens.push(token);
    }
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

/// Render tokens as a whole-path regular expression.
///
/// Unanchored rules may be preceded by any directories. Directory rules
/// also accept anything beneath the matched directory.
fn to_regex(tokens: &[Token], anchored: bool, dir_only: bool) -> String {
    let mut pattern = String::from("^");
    if !anchored {
        pattern.push_str("(?:.*/)?");
    }
    for token in tokens {
        match token {
            Token::Literal(lit) => pattern.push_str(&regex::escape(lit)),
            Token::Star => pattern.push_str("[^/]*"),
            Token::Single => pattern.push_str("[^/]"),
            Token::AnyPath => pattern.push_str(".*"),
            Token::AnyDirs => pattern.push_str("(?:.*/)?"),
        }
    }
    if dir_only {
        pattern.push_str("(?:/.*)?");
    }
    pattern.push('$');
    pattern
}

/// Parse the contents of an ignore rules file.
///
/// Blank lines and `#` comments are skipped; file order is preserved.
pub fn parse_rules(content: &str) -> Vec<IgnoreRule> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(IgnoreRule::parse)
        .collect()
}

/// Answers "is this path excluded from sync?" for paths under a root.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    root: PathBuf,
    rules: Vec<IgnoreRule>,
}

impl IgnoreMatcher {
    /// Load rules from `<root>/.syncignore`.
    pub fn load(root: impl Into<PathBuf>) -> Self {
        Self::load_with_file(root, DEFAULT_IGNORE_FILE)
    }

    /// Load rules from `<root>/<file_name>`.
    ///
    /// A missing file yields an empty rule set. An unreadable file is logged
    /// and also yields an empty rule set.
    pub fn load_with_file(root: impl Into<PathBuf>, file_name: &str) -> Self {
        let root = root.into();
        let rules_path = root.join(file_name);

        let rules = match fs::read_to_string(&rules_path) {
            Ok(content) => parse_rules(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %rules_path.display(), "No ignore rules file");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(path = %rules_path.display(), error = %e, "Could not read ignore rules file");
                Vec::new()
            }
        };

        Self { root, rules }
    }

    /// Build a matcher from in-memory patterns.
    pub fn from_patterns<I, S>(root: impl Into<PathBuf>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            root: root.into(),
            rules: patterns
                .into_iter()
                .map(|p| IgnoreRule::parse(p.as_ref()))
                .collect(),
        }
    }

    /// The root that relative paths are computed against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loaded user rules, in file order.
    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    /// Number of loaded user rules.
    pub fn pattern_count(&self) -> usize {
        self.rules.len()
    }

    /// Decide whether an absolute path under the root is excluded.
    ///
    /// Paths outside the root are never ignored.
    pub fn should_ignore(&self, path: &Path) -> bool {
        match NormalizedPath::relative_to(&self.root, path) {
            Ok(relative) => self.is_ignored(&relative),
            Err(_) => false,
        }
    }

    /// Decide whether a root-relative path is excluded.
    pub fn is_ignored(&self, relative: &NormalizedPath) -> bool {
        if relative.components().any(constants::is_denied_component) {
            return true;
        }
        if relative
            .file_name()
            .is_some_and(constants::is_compiled_artifact)
        {
            return true;
        }

        let text = relative.as_str();
        match self.rules.iter().find(|rule| rule.matches(text)) {
            Some(rule) => {
                tracing::trace!(path = text, rule = rule.as_str(), "Ignored by rule");
                true
            }
            None => false,
        }
    }
}
