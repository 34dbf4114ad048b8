//! Policies for the two ambiguous cases of tree mutation and data binding.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What `set_data` does with a mapping key that names no child.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeyPolicy {
    #[default]
    Ignore,
    Reject,
}

/// What `add` does when the composite already has a child with the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateNamePolicy {
    #[default]
    Replace,
    Reject,
}

/// Policy set carried by a `NodeTree`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingPolicy {
    pub unknown_keys: UnknownKeyPolicy,
    pub duplicate_names: DuplicateNamePolicy,
}

impl BindingPolicy {
    /// Rejects unknown keys and duplicate names.
    pub fn strict() -> Self {
        Self {
            unknown_keys: UnknownKeyPolicy::Reject,
            duplicate_names: DuplicateNamePolicy::Reject,
        }
    }
}

/// Error for policy names that don't parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown policy: {0}")]
pub struct ParsePolicyError(pub String);

impl FromStr for UnknownKeyPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "reject" => Ok(Self::Reject),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

impl FromStr for DuplicateNamePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "reject" => Ok(Self::Reject),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}
