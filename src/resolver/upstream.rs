//! Upstream build-feature requirements.

use crate::core::options::{OptionValue, UpstreamOptions};
use crate::resolver::errors::RecipeError;

/// An option an upstream package must have been built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamFeature {
    pub package: &'static str,
    pub option: &'static str,
    pub value: OptionValue,
}

impl UpstreamFeature {
    pub fn new(package: &'static str, option: &'static str, value: impl Into<OptionValue>) -> Self {
        UpstreamFeature {
            package,
            option,
            value: value.into(),
        }
    }

    /// Check the feature against the upstream options handed over by the
    /// package manager. An option that was never reported counts as
    /// missing.
    pub fn check(&self, recipe: &str, upstream: &UpstreamOptions) -> Result<(), RecipeError> {
        match upstream.get(self.package, self.option) {
            Some(value) if *value == self.value => Ok(()),
            found => Err(RecipeError::MissingUpstreamFeature {
                recipe: recipe.to_string(),
                dependency: self.package.to_string(),
                option: self.option.to_string(),
                expected: self.value.to_string(),
                found: found.map(ToString::to_string),
            }),
        }
    }
}
