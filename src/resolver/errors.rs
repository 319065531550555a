//! Recipe error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Error raised while evaluating a recipe.
///
/// Every variant is deterministic for a given input and fatal: the
/// pipeline stops before any metadata is written.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum RecipeError {
    #[error("unsupported configuration for `{recipe}`: {reason}")]
    #[diagnostic(code(slipway::resolve::unsupported_configuration))]
    UnsupportedConfiguration { recipe: String, reason: String },

    #[error("`{recipe}` requires `{dependency}` built with `{option}={expected}`")]
    #[diagnostic(code(slipway::resolve::missing_upstream_feature))]
    MissingUpstreamFeature {
        recipe: String,
        dependency: String,
        option: String,
        expected: String,
        found: Option<String>,
    },

    #[error("component `{component}` requires unknown `{target}`")]
    #[diagnostic(code(slipway::graph::unresolved_edge))]
    UnresolvedComponentEdge { component: String, target: String },

    #[error("cycle detected in component graph")]
    #[diagnostic(code(slipway::graph::cycle))]
    ComponentCycle { components: Vec<String> },

    #[error("component `{name}` is declared more than once")]
    #[diagnostic(code(slipway::graph::duplicate_component))]
    DuplicateComponent { name: String },

    #[error("conflicting requirements for `{name}`")]
    #[diagnostic(code(slipway::declare::duplicate_requirement))]
    DuplicateRequirement {
        name: String,
        first: String,
        second: String,
    },

    #[error("invalid package reference `{reference}`")]
    #[diagnostic(code(slipway::declare::invalid_reference))]
    InvalidReference { reference: String, reason: String },

    #[error("unknown recipe `{name}`")]
    #[diagnostic(code(slipway::recipe::unknown))]
    UnknownRecipe { name: String, available: Vec<String> },
}

impl RecipeError {
    pub fn unsupported(recipe: impl Into<String>, reason: impl Into<String>) -> Self {
        RecipeError::UnsupportedConfiguration {
            recipe: recipe.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error is a defect in a recipe rather than a bad request.
    pub fn is_recipe_defect(&self) -> bool {
        matches!(
            self,
            RecipeError::UnresolvedComponentEdge { .. }
                | RecipeError::ComponentCycle { .. }
                | RecipeError::DuplicateComponent { .. }
                | RecipeError::DuplicateRequirement { .. }
                | RecipeError::InvalidReference { .. }
        )
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = match self {
            RecipeError::UnsupportedConfiguration { recipe, reason } => {
                Diagnostic::error(format!("`{}` cannot be built in this configuration", recipe))
                    .with_context(reason.clone())
                    .with_suggestion("Pick a different compiler, version, or option value")
                    .with_suggestion(format!(
                        "Run `slipway list` to see the options `{}` accepts",
                        recipe
                    ))
            }

            RecipeError::MissingUpstreamFeature {
                recipe,
                dependency,
                option,
                expected,
                found,
            } => {
                let found = match found {
                    Some(value) => format!("`{}` is configured with `{}={}`", dependency, option, value),
                    None => format!("`{}` has no value for `{}`", dependency, option),
                };
                Diagnostic::error(format!(
                    "`{}` needs `{}` with `{}` enabled",
                    recipe, dependency, option
                ))
                .with_context(found)
                .with_suggestion(format!(
                    "Pass `--upstream {}:{}={}`",
                    dependency, option, expected
                ))
                .with_suggestion(format!(
                    "Or set `{} = {}` under `[upstream.{}]` in .slipway/config.toml",
                    option, expected, dependency
                ))
            }

            RecipeError::UnresolvedComponentEdge { component, target } => Diagnostic::error(
                format!("component `{}` requires `{}`, which is not declared", component, target),
            )
            .with_context("edges must name a component of this package or a declared requirement"),

            RecipeError::ComponentCycle { components } => {
                Diagnostic::error("cycle detected in component graph")
                    .with_context(format!("cycle: {}", components.join(" -> ")))
            }

            RecipeError::DuplicateComponent { name } => {
                Diagnostic::error(format!("component `{}` is declared twice", name))
            }

            RecipeError::DuplicateRequirement {
                name,
                first,
                second,
            } => Diagnostic::error(format!("conflicting requirements for `{}`", name))
                .with_context(format!("first declared as {}", first))
                .with_context(format!("then declared as {}", second))
                .with_suggestion("Mark the later requirement as an override"),

            RecipeError::InvalidReference { reference, reason } => {
                Diagnostic::error(format!("invalid package reference `{}`", reference))
                    .with_context(reason.clone())
            }

            RecipeError::UnknownRecipe { name, available } => {
                Diagnostic::error(format!("no recipe named `{}`", name))
                    .with_context(format!("available recipes: {}", available.join(", ")))
                    .with_suggestion("Run `slipway list` to see all recipes")
            }
        };

        if self.is_recipe_defect() {
            diag = diag.with_suggestion("This is a bug in the recipe; please report it");
        }

        if let Some(code) = MietteDiagnostic::code(self) {
            diag = diag.with_code(code.to_string());
        }

        diag
    }
}
