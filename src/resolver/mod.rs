//! Version and option resolution.
//!
//! The resolver turns a raw request (version string, user options, host
//! profile, upstream options) into a validated [`Configuration`]. It is
//! pure and deterministic: the same request always yields the same
//! configuration or the same error.

pub mod compiler;
pub mod errors;
pub mod rules;
pub mod upstream;
pub mod version;

pub use compiler::CompilerConstraint;
pub use errors::RecipeError;
pub use rules::{OptionRule, RuleAction, RuleCondition};
pub use upstream::UpstreamFeature;

use semver::Version;

use crate::core::options::{OptionMap, UpstreamOptions};
use crate::core::platform::HostProfile;
use crate::core::{Configuration, Recipe};

/// A raw configuration request from the package-manager runtime.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub version: String,
    pub options: OptionMap,
    pub host: HostProfile,
    pub upstream: UpstreamOptions,
}

impl ResolveRequest {
    pub fn new(version: impl Into<String>, host: HostProfile) -> Self {
        ResolveRequest {
            version: version.into(),
            options: OptionMap::new(),
            host,
            upstream: UpstreamOptions::new(),
        }
    }

    pub fn with_options(mut self, options: OptionMap) -> Self {
        self.options = options;
        self
    }

    pub fn with_upstream(mut self, upstream: UpstreamOptions) -> Self {
        self.upstream = upstream;
        self
    }
}

/// Resolver for one recipe.
pub struct Resolver<'a> {
    recipe: &'a dyn Recipe,
}

impl<'a> Resolver<'a> {
    pub fn new(recipe: &'a dyn Recipe) -> Self {
        Resolver { recipe }
    }

    /// Resolve a request into a configuration.
    ///
    /// # Algorithm
    ///
    /// 1. Parse the version and check it against the recipe's range
    /// 2. Overlay user options on declared defaults; drop unknown names,
    ///    reject values outside an option's allowed set
    /// 3. Apply the recipe's option rule table in order
    /// 4. Check compiler constraints for the resolved version
    /// 5. Check upstream build features
    pub fn resolve(&self, request: &ResolveRequest) -> Result<Configuration, RecipeError> {
        let name = self.recipe.name();

        let version = self.resolve_version(&request.version)?;
        tracing::debug!("resolving {}/{}", name, version);

        let mut options = self.resolve_options(&request.options)?;

        let rules = self.recipe.option_rules();
        rules::apply_rules(&rules, &mut options, &request.host);

        for constraint in self.recipe.compiler_constraints() {
            if let Some(reason) = constraint.check(&version, &request.host.compiler) {
                return Err(RecipeError::unsupported(name, reason));
            }
        }

        for feature in self.recipe.upstream_features() {
            feature.check(name, &request.upstream)?;
        }

        Ok(Configuration::new(
            name,
            version,
            options,
            request.host.clone(),
            request.upstream.clone(),
        ))
    }

    fn resolve_version(&self, requested: &str) -> Result<Version, RecipeError> {
        let name = self.recipe.name();
        let version = version::parse_version_lenient(requested).ok_or_else(|| {
            RecipeError::unsupported(name, format!("`{}` is not a valid version", requested))
        })?;

        let supported = self.recipe.supported_versions();
        if !supported.matches(&version::release(&version)) {
            return Err(RecipeError::unsupported(
                name,
                format!(
                    "version {} is outside the supported range `{}`",
                    version, supported
                ),
            ));
        }

        Ok(version)
    }

    fn resolve_options(&self, requested: &OptionMap) -> Result<OptionMap, RecipeError> {
        let name = self.recipe.name();
        let decls = self.recipe.options();

        let mut options: OptionMap = decls
            .iter()
            .map(|decl| (decl.name.to_string(), decl.default.clone()))
            .collect();

        for (option, value) in requested.iter() {
            let Some(decl) = decls.iter().find(|d| d.name == option.as_str()) else {
                tracing::warn!("`{}` has no option `{}`, ignoring it", name, option);
                continue;
            };

            if !decl.accepts(value) {
                return Err(RecipeError::unsupported(
                    name,
                    format!(
                        "`{}` is not a valid value for option `{}` (expected one of: {})",
                        value,
                        option,
                        decl.allowed()
                    ),
                ));
            }

            options.set(option.clone(), value.clone());
        }

        Ok(options)
    }
}
