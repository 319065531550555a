//! Upstream package requirements.
//!
//! A Requirement describes one upstream package a recipe needs, pinned to
//! an exact reference (`boost/1.75.0`) or to the system-provided package
//! (`xorg/system`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::resolver::errors::RecipeError;

/// Version pin of a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionPin {
    /// Exact upstream version string. Not necessarily semver (`1.1.1o`).
    Exact(String),
    /// Provided by the host system package manager.
    System,
}

impl fmt::Display for VersionPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionPin::Exact(v) => f.write_str(v),
            VersionPin::System => f.write_str("system"),
        }
    }
}

/// A requirement on an upstream package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Requirement {
    name: String,
    pin: VersionPin,
    /// Replaces the transitive version constraint instead of adding to it
    #[serde(default, rename = "override")]
    overrides: bool,
}

impl Requirement {
    pub fn new(name: impl Into<String>, pin: VersionPin) -> Self {
        Requirement {
            name: name.into(),
            pin,
            overrides: false,
        }
    }

    /// Parse a `name/version` reference.
    pub fn parse(reference: &str) -> Result<Self, String> {
        reference.parse()
    }

    /// Mark this requirement as an override.
    pub fn overriding(mut self) -> Self {
        self.overrides = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pin(&self) -> &VersionPin {
        &self.pin
    }

    pub fn is_override(&self) -> bool {
        self.overrides
    }

    pub fn is_system(&self) -> bool {
        self.pin == VersionPin::System
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.pin)?;
        if self.overrides {
            f.write_str(" (override)")?;
        }
        Ok(())
    }
}

impl FromStr for Requirement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, version) = s
            .split_once('/')
            .ok_or_else(|| format!("invalid package reference `{}`: expected `name/version`", s))?;
        if name.is_empty() || version.is_empty() {
            return Err(format!(
                "invalid package reference `{}`: name and version must be non-empty",
                s
            ));
        }
        let pin = if version == "system" {
            VersionPin::System
        } else {
            VersionPin::Exact(version.to_string())
        };
        Ok(Requirement::new(name, pin))
    }
}

/// Ordered collection of requirements with per-name uniqueness.
///
/// Declarations keep their first position. Re-declaring the same
/// requirement is a no-op; an override replaces the earlier entry in
/// place; any other conflicting re-declaration is rejected.
#[derive(Debug, Clone, Default)]
pub struct RequirementSet {
    entries: Vec<Requirement>,
}

impl RequirementSet {
    pub fn new() -> Self {
        RequirementSet {
            entries: Vec::new(),
        }
    }

    /// Declare a requirement.
    pub fn declare(&mut self, requirement: Requirement) -> Result<(), RecipeError> {
        let position = self
            .entries
            .iter()
            .position(|r| r.name == requirement.name);
        let Some(position) = position else {
            self.entries.push(requirement);
            return Ok(());
        };
        let existing = &mut self.entries[position];

        if *existing == requirement {
            return Ok(());
        }

        if requirement.overrides {
            tracing::debug!("`{}` overrides `{}`", requirement, existing);
            *existing = requirement;
            return Ok(());
        }

        Err(RecipeError::DuplicateRequirement {
            name: requirement.name.clone(),
            first: existing.to_string(),
            second: requirement.to_string(),
        })
    }

    /// Declare a requirement from its `name/version` reference.
    pub fn require(&mut self, reference: &str) -> Result<(), RecipeError> {
        let requirement = parse_reference(reference)?;
        self.declare(requirement)
    }

    /// Declare an overriding requirement from its reference.
    pub fn require_override(&mut self, reference: &str) -> Result<(), RecipeError> {
        let requirement = parse_reference(reference)?.overriding();
        self.declare(requirement)
    }

    pub fn get(&self, name: &str) -> Option<&Requirement> {
        self.entries.iter().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Requirement> {
        self.entries
    }
}

fn parse_reference(reference: &str) -> Result<Requirement, RecipeError> {
    reference
        .parse()
        .map_err(|reason| RecipeError::InvalidReference {
            reference: reference.to_string(),
            reason,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference() {
        let req = Requirement::parse("openssl/1.1.1o").unwrap();
        assert_eq!(req.name(), "openssl");
        assert_eq!(req.pin(), &VersionPin::Exact("1.1.1o".to_string()));
        assert!(!req.is_override());

        let req = Requirement::parse("xorg/system").unwrap();
        assert!(req.is_system());
        assert_eq!(req.to_string(), "xorg/system");

        assert!(Requirement::parse("zlib").is_err());
        assert!(Requirement::parse("/1.0").is_err());
    }

    #[test]
    fn test_identical_redeclaration_collapses() {
        let mut set = RequirementSet::new();
        set.require("zlib/1.2.12").unwrap();
        set.require("boost/1.75.0").unwrap();
        set.require("zlib/1.2.12").unwrap();

        let names: Vec<_> = set.iter().map(|r| r.name().to_string()).collect();
        assert_eq!(names, vec!["zlib", "boost"]);
    }

    #[test]
    fn test_override_replaces_in_place() {
        let mut set = RequirementSet::new();
        set.require("openssl/1.1.1k").unwrap();
        set.require("zlib/1.2.12").unwrap();
        set.require_override("openssl/1.1.1o").unwrap();

        let reqs = set.into_vec();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].to_string(), "openssl/1.1.1o (override)");
        assert!(reqs[0].is_override());
    }

    #[test]
    fn test_conflicting_duplicate_rejected() {
        let mut set = RequirementSet::new();
        set.require("zlib/1.2.12").unwrap();
        let err = set.require("zlib/1.2.13").unwrap_err();

        match err {
            RecipeError::DuplicateRequirement {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "zlib");
                assert_eq!(first, "zlib/1.2.12");
                assert_eq!(second, "zlib/1.2.13");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_reference_is_an_error() {
        let mut set = RequirementSet::new();
        let err = set.require("zlib-1.2.12").unwrap_err();
        assert!(matches!(err, RecipeError::InvalidReference { .. }));
    }
}
