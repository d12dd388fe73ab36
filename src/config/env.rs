//! Raw process environment and field-level validation.
//!
//! # Responsibilities
//! - Snapshot the process environment exactly once
//! - Apply per-variable rules (present, unicode, non-empty, URL)
//! - Collect every failing variable instead of stopping at the first
//!
//! # Design Decisions
//! - Values are never trimmed or normalized; a valid value is returned as-is
//! - `Debug` on [`RawEnv`] prints variable names only, never values

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::fmt;

use url::Url;

/// Snapshot of the process environment table.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawEnv {
    vars: BTreeMap<String, String>,
    /// Names whose values are present but not valid UTF-8.
    non_unicode: BTreeSet<String>,
}

impl RawEnv {
    /// Read the current process environment.
    pub fn from_process() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Build a snapshot from OS-level key/value pairs.
    ///
    /// Keys that are not valid UTF-8 cannot be declared by any schema and
    /// are skipped.
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut env = Self::default();
        for (key, value) in vars {
            let Ok(key) = key.into_string() else {
                continue;
            };
            match value.into_string() {
                Ok(value) => {
                    env.non_unicode.remove(&key);
                    env.vars.insert(key, value);
                }
                Err(_) => {
                    env.vars.remove(&key);
                    env.non_unicode.insert(key);
                }
            }
        }
        env
    }

    /// Look up a variable's value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Number of readable variables in the snapshot.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.non_unicode.is_empty()
    }

    fn is_non_unicode(&self, name: &str) -> bool {
        self.non_unicode.contains(name)
    }
}

impl<K, V> FromIterator<(K, V)> for RawEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            non_unicode: BTreeSet::new(),
        }
    }
}

impl fmt::Debug for RawEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawEnv")
            .field("vars", &self.vars.keys().collect::<Vec<_>>())
            .field("non_unicode", &self.non_unicode)
            .finish()
    }
}

/// Why a single variable was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueReason {
    /// The variable is not set.
    Missing,
    /// The variable is set but its value is not a string.
    NotUnicode,
    /// The variable is set to the empty string.
    Empty,
    /// The value does not parse as a URL.
    InvalidUrl(String),
}

impl fmt::Display for IssueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueReason::Missing => write!(f, "required but not set"),
            IssueReason::NotUnicode => write!(f, "expected a string, value is not valid UTF-8"),
            IssueReason::Empty => write!(f, "must not be empty"),
            IssueReason::InvalidUrl(detail) => write!(f, "must be a valid URL ({})", detail),
        }
    }
}

/// A rejected variable and the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub reason: IssueReason,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Every variable that failed validation, in schema declaration order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("environment validation failed: {}", join_issues(.issues))]
pub struct ConfigValidationError {
    issues: Vec<FieldIssue>,
}

impl ConfigValidationError {
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Names of the rejected variables.
    pub fn fields(&self) -> Vec<&'static str> {
        self.issues.iter().map(|issue| issue.field).collect()
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Accumulates issues while typed values are pulled out of a [`RawEnv`].
///
/// Each accessor returns `None` and records an issue when its rule fails,
/// so a schema can read all of its fields before deciding the outcome.
pub struct EnvValidator<'a> {
    env: &'a RawEnv,
    issues: Vec<FieldIssue>,
}

impl<'a> EnvValidator<'a> {
    pub fn new(env: &'a RawEnv) -> Self {
        Self {
            env,
            issues: Vec::new(),
        }
    }

    /// A present, unicode value. Empty strings are accepted.
    pub fn string(&mut self, field: &'static str) -> Option<String> {
        self.lookup(field).map(str::to_owned)
    }

    /// A present, unicode, non-empty value.
    pub fn non_empty_string(&mut self, field: &'static str) -> Option<String> {
        let value = self.lookup(field)?;
        if value.is_empty() {
            self.reject(field, IssueReason::Empty);
            return None;
        }
        Some(value.to_owned())
    }

    /// A non-empty value that parses as an absolute URL.
    ///
    /// Returns the original string together with the parsed form.
    pub fn url(&mut self, field: &'static str) -> Option<(String, Url)> {
        let value = self.non_empty_string(field)?;
        match Url::parse(&value) {
            Ok(parsed) => Some((value, parsed)),
            Err(e) => {
                self.reject(field, IssueReason::InvalidUrl(e.to_string()));
                None
            }
        }
    }

    /// True while no rule has failed.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Consume the validator, returning the collected issues as an error.
    pub fn into_error(self) -> ConfigValidationError {
        ConfigValidationError {
            issues: self.issues,
        }
    }

    fn lookup(&mut self, field: &'static str) -> Option<&'a str> {
        if self.env.is_non_unicode(field) {
            self.reject(field, IssueReason::NotUnicode);
            return None;
        }
        let env = self.env;
        match env.get(field) {
            Some(value) => Some(value),
            None => {
                self.reject(field, IssueReason::Missing);
                None
            }
        }
    }

    fn reject(&mut self, field: &'static str, reason: IssueReason) {
        self.issues.push(FieldIssue { field, reason });
    }
}
