//! CLI definitions using clap.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use slipway::core::options::{parse_assignment, parse_upstream_assignment};
use slipway::core::{OptionMap, OptionValue};
use slipway::util::config::{Config, ProfileConfig};
use slipway::ResolveRequest;

/// slipway - package metadata recipes for C++ libraries
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List built-in recipes and their options
    List,

    /// Resolve a configuration and print it
    Resolve(RecipeArgs),

    /// Print the packages a configuration requires
    Requirements(RecipeArgs),

    /// Print the component graph
    Graph(RecipeArgs),

    /// Print CMake cache definitions for the configure step
    Definitions(RecipeArgs),

    /// Emit package metadata into an install prefix
    Package(PackageArgs),

    /// Print the binary package id
    PackageId(RecipeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// A recipe request: name, version, options and host profile.
#[derive(Args)]
pub struct RecipeArgs {
    /// Recipe name
    pub recipe: String,

    /// Upstream version to package
    #[arg(long = "version", value_name = "VERSION")]
    pub pkg_version: String,

    /// Set a recipe option (repeatable)
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub options: Vec<(String, OptionValue)>,

    /// Report an upstream package option (repeatable)
    #[arg(long = "upstream", value_name = "PKG:NAME=VALUE", value_parser = parse_upstream_assignment)]
    pub upstream: Vec<(String, String, OptionValue)>,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Host profile flags; each overrides the config file.
#[derive(Args, Default)]
pub struct ProfileArgs {
    /// Target operating system (linux, macos, windows, freebsd)
    #[arg(long)]
    pub os: Option<String>,

    /// Target architecture (x86_64, aarch64, ...)
    #[arg(long)]
    pub arch: Option<String>,

    /// Compiler family (gcc, clang, apple-clang, msvc)
    #[arg(long)]
    pub compiler: Option<String>,

    /// Compiler version (e.g. 8, 13.2)
    #[arg(long)]
    pub compiler_version: Option<String>,

    /// Build type (Release, Debug, RelWithDebInfo, MinSizeRel)
    #[arg(long)]
    pub build_type: Option<String>,

    /// C++ standard (11, 14, 17, ...)
    #[arg(long)]
    pub cppstd: Option<String>,
}

impl ProfileArgs {
    fn to_profile_config(&self) -> ProfileConfig {
        ProfileConfig {
            os: self.os.clone(),
            arch: self.arch.clone(),
            compiler: self.compiler.clone(),
            compiler_version: self.compiler_version.clone(),
            build_type: self.build_type.clone(),
            cppstd: self.cppstd.clone(),
        }
    }
}

impl RecipeArgs {
    /// Build a resolve request, layering these flags over `config`.
    pub fn to_request(&self, recipe: &str, config: &Config) -> Result<ResolveRequest> {
        let mut profile = config.profile.clone();
        profile.merge(self.profile.to_profile_config());
        let host = profile.to_host_profile()?;

        let mut options = config.options_for(recipe);
        options.merge(&self.options.iter().cloned().collect::<OptionMap>());

        let mut upstream = config.upstream.clone();
        for (package, option, value) in &self.upstream {
            upstream.set(package.clone(), option.clone(), value.clone());
        }

        Ok(ResolveRequest::new(self.pkg_version.clone(), host)
            .with_options(options)
            .with_upstream(upstream))
    }
}

#[derive(Args)]
pub struct PackageArgs {
    #[command(flatten)]
    pub recipe: RecipeArgs,

    /// Install prefix to describe
    #[arg(long, value_name = "DIR")]
    pub prefix: PathBuf,

    /// Remove upstream pkg-config and CMake config files first
    #[arg(long)]
    pub prune: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

