//! Configuration errors

use std::fmt;

/// A single problem found while reading the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    /// A required variable is unset or empty
    Missing { var: &'static str },

    /// A variable is set but its value is unusable
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ConfigIssue {
    /// Name of the offending variable
    pub fn var(&self) -> &'static str {
        match self {
            ConfigIssue::Missing { var } | ConfigIssue::Invalid { var, .. } => var,
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::Missing { var } => write!(f, "{} is required", var),
            ConfigIssue::Invalid {
                var,
                value,
                expected,
            } => write!(f, "{}={:?} is invalid, expected {}", var, value, expected),
        }
    }
}

/// Every problem found in one pass over the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    issues: Vec<ConfigIssue>,
}

impl ConfigError {
    pub(crate) fn new(issues: Vec<ConfigIssue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: YN80XB - Parsing and validating env vars")?;
        for issue in &self.issues {
            write!(f, "; {}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigError {}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
