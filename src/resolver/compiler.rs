//! Compiler compatibility constraints.
//!
//! Old upstream releases often stop compiling with newer compilers. A
//! constraint records, for a range of recipe versions, which versions of
//! one compiler family are known to work.

use semver::{Version, VersionReq};

use crate::core::platform::{Compiler, CompilerFamily};
use crate::resolver::version::release;

/// Allowed compiler versions for a range of recipe versions.
#[derive(Debug, Clone)]
pub struct CompilerConstraint {
    /// Recipe versions the constraint applies to
    pub versions: VersionReq,
    pub family: CompilerFamily,
    /// Compiler versions known to work
    pub allowed: VersionReq,
}

impl CompilerConstraint {
    /// Build a constraint from requirement strings written in a recipe.
    ///
    /// An unparsable recipe range matches every recipe version; an
    /// unparsable allowed range matches no compiler.
    pub fn new(versions: &str, family: CompilerFamily, allowed: &str) -> Self {
        CompilerConstraint {
            versions: versions.parse().unwrap_or(VersionReq::STAR),
            family,
            allowed: allowed.parse().unwrap_or_else(|_| never()),
        }
    }

    /// Check a compiler against this constraint.
    ///
    /// Returns a human-readable reason when the combination is rejected.
    pub fn check(&self, recipe_version: &Version, compiler: &Compiler) -> Option<String> {
        if compiler.family != self.family || !self.versions.matches(&release(recipe_version)) {
            return None;
        }
        if self.allowed.matches(&release(&compiler.version)) {
            return None;
        }
        Some(format!(
            "{} {} is not supported for version {} (requires {} {})",
            compiler.family,
            compiler.version.major,
            recipe_version,
            self.family,
            self.allowed
        ))
    }
}

fn never() -> VersionReq {
    VersionReq::parse(">0.0.0, <0.0.0").unwrap_or(VersionReq::STAR)
}
