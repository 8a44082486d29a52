//! Build target labels.
//!
//! Textual form is `@repo//pkg/path:name`. The `@repo` part is dropped for the
//! current repository and `:name` is dropped when it equals the last segment
//! of the package path. A label written as `:name` (or a bare `name`) is
//! relative to whatever package it appears in.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{BuildGenError, Result};

static REPO_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.~+-]+$").expect("repository name pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetLabel {
    /// Repository identifier, empty for the current repository
    pub repo: String,
    /// Slash-separated package path, empty for the repository root
    pub pkg: String,
    pub name: String,
    /// `:name` form, resolved against a context package by [`TargetLabel::to_absolute`]
    pub relative: bool,
}

impl TargetLabel {
    pub fn new(repo: impl Into<String>, pkg: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            pkg: pkg.into(),
            name: name.into(),
            relative: false,
        }
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self {
            repo: String::new(),
            pkg: String::new(),
            name: name.into(),
            relative: true,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let fail = |reason: &str| BuildGenError::LabelParse {
            label: s.to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(fail("empty label"));
        }

        let mut rest = s;
        let mut repo = "";
        if let Some(after_at) = s.strip_prefix('@') {
            // `@@` marks a canonical repository name
            let after_at = after_at.strip_prefix('@').unwrap_or(after_at);
            match after_at.find("//") {
                Some(idx) => {
                    repo = &after_at[..idx];
                    rest = &after_at[idx..];
                }
                None => {
                    // `@repo` is shorthand for `@repo//:repo`
                    if !REPO_NAME.is_match(after_at) {
                        return Err(fail("invalid repository name"));
                    }
                    return Ok(Self::new(after_at, "", after_at));
                }
            }
            if !REPO_NAME.is_match(repo) {
                return Err(fail("invalid repository name"));
            }
        }

        if let Some(body) = rest.strip_prefix("//") {
            let (pkg, name) = match body.split_once(':') {
                Some((pkg, name)) => (pkg, name),
                None => (body, body.rsplit('/').next().unwrap_or(body)),
            };
            validate_package(pkg).map_err(|reason| fail(reason))?;
            let name = if name.is_empty() && pkg.is_empty() && !repo.is_empty() {
                repo
            } else {
                name
            };
            validate_name(name).map_err(|reason| fail(reason))?;
            return Ok(Self::new(repo, pkg, name));
        }

        let name = rest.strip_prefix(':').unwrap_or(rest);
        if name.contains(':') {
            return Err(fail("relative label must not name a package"));
        }
        validate_name(name).map_err(|reason| fail(reason))?;
        Ok(Self::local(name))
    }

    /// Resolves a relative label against `repo`/`pkg`. Absolute labels are returned unchanged.
    pub fn to_absolute(&self, repo: &str, pkg: &str) -> Self {
        if !self.relative {
            return self.clone();
        }
        Self::new(repo, pkg, self.name.clone())
    }

    /// Shortest form of this label as written from inside `repo`/`pkg`.
    pub fn to_relative(&self, repo: &str, pkg: &str) -> Self {
        if self.relative || self.repo != repo {
            return self.clone();
        }
        if self.pkg == pkg {
            return Self::local(self.name.clone());
        }
        Self::new("", self.pkg.clone(), self.name.clone())
    }

    pub fn is_external(&self) -> bool {
        !self.repo.is_empty()
    }
}

fn validate_package(pkg: &str) -> std::result::Result<(), &'static str> {
    if pkg.starts_with('/') || pkg.ends_with('/') || pkg.contains("//") {
        return Err("malformed package path");
    }
    if pkg.contains(|c: char| c.is_whitespace() || c == ':' || c == '\\') {
        return Err("invalid character in package path");
    }
    Ok(())
}

fn validate_name(name: &str) -> std::result::Result<(), &'static str> {
    if name.is_empty() {
        return Err("empty target name");
    }
    if name.contains(|c: char| c.is_whitespace() || c == ':' || c == '\\') {
        return Err("invalid character in target name");
    }
    if name.starts_with('/') || name.ends_with('/') || name.contains("//") {
        return Err("malformed target name");
    }
    if name.split('/').any(|seg| seg == "." || seg == "..") {
        return Err("target name must not contain up-level references");
    }
    Ok(())
}

impl fmt::Display for TargetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.relative {
            return write!(f, ":{}", self.name);
        }
        if !self.repo.is_empty() {
            write!(f, "@{}", self.repo)?;
        }
        write!(f, "//{}", self.pkg)?;
        let last = self.pkg.rsplit('/').next().unwrap_or_default();
        if self.name != last {
            write!(f, ":{}", self.name)?;
        }
        Ok(())
    }
}

impl FromStr for TargetLabel {
    type Err = BuildGenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
