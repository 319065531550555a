//! Resolved recipe configuration.

use semver::Version;
use serde::Serialize;

use crate::core::options::{OptionMap, OptionValue, UpstreamOptions};
use crate::core::platform::HostProfile;

/// A validated, immutable recipe configuration.
///
/// Produced once by the [`Resolver`](crate::resolver::Resolver) and then
/// passed by reference through every later stage. Nothing downstream can
/// change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    recipe: String,
    version: Version,
    options: OptionMap,
    host: HostProfile,
    #[serde(skip_serializing_if = "UpstreamOptions::is_empty")]
    upstream: UpstreamOptions,
}

impl Configuration {
    pub(crate) fn new(
        recipe: impl Into<String>,
        version: Version,
        options: OptionMap,
        host: HostProfile,
        upstream: UpstreamOptions,
    ) -> Self {
        Configuration {
            recipe: recipe.into(),
            version,
            options,
            host,
            upstream,
        }
    }

    pub fn recipe(&self) -> &str {
        &self.recipe
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    pub fn options(&self) -> &OptionMap {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// Boolean option value; removed or absent options read as false.
    pub fn flag(&self, name: &str) -> bool {
        self.options.flag(name)
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains(name)
    }

    pub fn host(&self) -> &HostProfile {
        &self.host
    }

    pub fn upstream(&self) -> &UpstreamOptions {
        &self.upstream
    }
}
