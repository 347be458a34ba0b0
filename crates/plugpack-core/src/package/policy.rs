//! Exclusion policy applied during packaging.
//!
//! Exclusion is a two-stage predicate over a single path segment's name:
//! `excluded(name) = matches_any(patterns, name) && !in_skip_list(name)`.
//! The skip list is a veto over exclusion, not an independent inclusion
//! rule: a name that no pattern flags never consults it.

use crate::error::BuildError;
use crate::error::Result;
use glob::MatchOptions;
use glob::Pattern;

/// Pattern set always applied: hidden OS artifacts, compiled bytecode
/// caches, and bundled sample-data directories.
pub const BASE_PATTERNS: &[&str] = &[".DS_Store", "*.pyc", "gisdata*"];

/// Additional patterns for release packaging: test directories, coverage
/// artifacts, and packaged external source checkouts.
pub const RELEASE_PATTERNS: &[&str] = &["test", "test-output", "ext-src", "coverage*", "nose*"];

/// Which of the two named pattern sets a packaging call applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionProfile {
    /// Base patterns only; test directories are retained.
    Minimal,
    /// Base plus release patterns.
    Full,
}

/// An ordered set of shell-glob exclusion patterns plus a skip list of
/// literal filenames that are kept even when pattern-matched.
///
/// Patterns are matched against a single path segment's name, never a full
/// path, with shell-glob semantics (`*`, `?`, character classes).
///
/// # Examples
///
/// ```
/// use plugpack_core::ExclusionPolicy;
///
/// let policy = ExclusionPolicy::full(&["coverage.xsd".to_string()])?;
/// assert!(policy.excluded("module.pyc"));
/// assert!(policy.excluded("coverage.xml"));
/// assert!(!policy.excluded("coverage.xsd")); // skip list veto
/// assert!(!policy.excluded("module.py"));
/// # Ok::<(), plugpack_core::BuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ExclusionPolicy {
    patterns: Vec<Pattern>,
    skip: Vec<String>,
}

impl ExclusionPolicy {
    /// Compiles a policy from glob patterns and a literal skip list.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::InvalidPattern` if any glob fails to compile.
    pub fn new<S: AsRef<str>>(patterns: &[S], skip: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref()).map_err(|e| BuildError::InvalidPattern {
                    pattern: p.as_ref().to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            patterns,
            skip: skip.to_vec(),
        })
    }

    /// Policy with the base pattern set only.
    pub fn minimal(skip: &[String]) -> Result<Self> {
        Self::new(BASE_PATTERNS, skip)
    }

    /// Policy with the base and release pattern sets.
    pub fn full(skip: &[String]) -> Result<Self> {
        let mut patterns: Vec<&str> = BASE_PATTERNS.to_vec();
        patterns.extend_from_slice(RELEASE_PATTERNS);
        Self::new(&patterns, skip)
    }

    /// Policy for the given profile.
    pub fn for_profile(profile: ExclusionProfile, skip: &[String]) -> Result<Self> {
        match profile {
            ExclusionProfile::Minimal => Self::minimal(skip),
            ExclusionProfile::Full => Self::full(skip),
        }
    }

    /// Whether `name` (one path segment) is dropped from the archive.
    #[must_use]
    pub fn excluded(&self, name: &str) -> bool {
        self.matches(name) && !self.in_skip_list(name)
    }

    /// Whether any exclusion pattern matches `name`.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        // Path-segment matching: `*` must be free to cross `/` boundaries
        // that glob would otherwise treat specially. Names never contain
        // separators, so literal matching is the correct semantics.
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };
        self.patterns
            .iter()
            .any(|p| p.matches_with(name, options))
    }

    /// Whether `name` is exempt from exclusion.
    #[must_use]
    pub fn in_skip_list(&self, name: &str) -> bool {
        self.skip.iter().any(|s| s == name)
    }
}
