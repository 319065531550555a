//! Configuration file support for slipway.
//!
//! slipway reads two configuration files:
//! - Global: `~/.slipway/config.toml` - user-wide defaults
//! - Project: `.slipway/config.toml` - project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.
//!
//! ```toml
//! [profile]
//! os = "linux"
//! compiler = "gcc"
//! compiler_version = "8"
//! cppstd = "17"
//!
//! [options.ogre]
//! ogre_glsupport_use_egl = false
//!
//! [upstream.openblas]
//! build_lapack = true
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::options::{OptionMap, UpstreamOptions};
use crate::core::platform::{Arch, BuildType, Compiler, CppStandard, HostProfile, Os};

/// slipway configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host profile defaults
    pub profile: ProfileConfig,

    /// Default option values, per recipe
    pub options: BTreeMap<String, OptionMap>,

    /// Options upstream packages were built with, per package
    pub upstream: UpstreamOptions,
}

/// Host profile settings, all optional until merged with CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub os: Option<String>,
    pub arch: Option<String>,
    pub compiler: Option<String>,
    pub compiler_version: Option<String>,
    pub build_type: Option<String>,
    pub cppstd: Option<String>,
}

impl ProfileConfig {
    /// Overlay `other` on top of this profile (other takes precedence).
    pub fn merge(&mut self, other: ProfileConfig) {
        if other.os.is_some() {
            self.os = other.os;
        }
        if other.arch.is_some() {
            self.arch = other.arch;
        }
        if other.compiler.is_some() {
            self.compiler = other.compiler;
        }
        if other.compiler_version.is_some() {
            self.compiler_version = other.compiler_version;
        }
        if other.build_type.is_some() {
            self.build_type = other.build_type;
        }
        if other.cppstd.is_some() {
            self.cppstd = other.cppstd;
        }
    }

    /// Build a host profile. OS and architecture default to the running
    /// machine; the compiler must be given.
    pub fn to_host_profile(&self) -> Result<HostProfile> {
        let os = match &self.os {
            Some(s) => s.parse::<Os>()?,
            None => Os::host(),
        };
        let arch = match &self.arch {
            Some(s) => s.parse::<Arch>()?,
            None => Arch::host(),
        };

        let (Some(family), Some(version)) = (&self.compiler, &self.compiler_version) else {
            bail!(
                "no compiler configured\n\
                 help: pass `--compiler <name> --compiler-version <version>` \
                 or set them under [profile] in .slipway/config.toml"
            );
        };
        let compiler = Compiler::parse(family, version)?;

        let build_type = match &self.build_type {
            Some(s) => s.parse::<BuildType>()?,
            None => BuildType::default(),
        };
        let cppstd = self
            .cppstd
            .as_deref()
            .map(str::parse::<CppStandard>)
            .transpose()?;

        Ok(HostProfile::new(os, compiler)
            .with_arch(arch)
            .with_build_type(build_type)
            .with_cppstd(cppstd))
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        self.profile.merge(other.profile);
        for (recipe, options) in &other.options {
            self.options.entry(recipe.clone()).or_default().merge(options);
        }
        self.upstream.merge(&other.upstream);
    }

    /// Configured default options for a recipe.
    pub fn options_for(&self, recipe: &str) -> OptionMap {
        self.options.get(recipe).cloned().unwrap_or_default()
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.slipway/config.toml)
/// 2. Global config (~/.slipway/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global slipway config directory (~/.slipway).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".slipway"))
}

/// Get the project config path (.slipway/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".slipway").join("config.toml")
}
