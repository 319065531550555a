//! Host platform and compiler descriptors.
//!
//! A `HostProfile` is what the package-manager runtime hands to a recipe:
//! the operating system, architecture, compiler and build type the
//! package is being produced for.

use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::resolver::version::parse_version_lenient;

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    #[serde(alias = "darwin", alias = "macosx")]
    Macos,
    Windows,
    #[serde(alias = "freebsd")]
    FreeBsd,
}

impl Os {
    /// Get the OS name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Macos => "macos",
            Os::Windows => "windows",
            Os::FreeBsd => "freebsd",
        }
    }

    /// The OS this binary was compiled for.
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Os::Windows
        } else if cfg!(target_os = "macos") {
            Os::Macos
        } else if cfg!(target_os = "freebsd") {
            Os::FreeBsd
        } else {
            Os::Linux
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(Os::Linux),
            "macos" | "darwin" | "macosx" => Ok(Os::Macos),
            "windows" | "win" => Ok(Os::Windows),
            "freebsd" => Ok(Os::FreeBsd),
            _ => Err(PlatformParseError::new(
                "operating system",
                s,
                "linux, macos, windows, freebsd",
            )),
        }
    }
}

/// CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86_64,
    #[serde(alias = "armv8", alias = "arm64")]
    Aarch64,
    X86,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
            Arch::X86 => "x86",
        }
    }

    pub fn host() -> Self {
        if cfg!(target_arch = "aarch64") {
            Arch::Aarch64
        } else if cfg!(target_arch = "x86") {
            Arch::X86
        } else {
            Arch::X86_64
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x86_64" | "amd64" | "x64" => Ok(Arch::X86_64),
            "aarch64" | "arm64" | "armv8" => Ok(Arch::Aarch64),
            "x86" | "i686" => Ok(Arch::X86),
            _ => Err(PlatformParseError::new(
                "architecture",
                s,
                "x86_64, aarch64, x86",
            )),
        }
    }
}

/// Compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerFamily {
    /// GCC (GNU Compiler Collection)
    Gcc,
    /// Clang/LLVM
    Clang,
    /// Apple Clang (macOS)
    AppleClang,
    /// Microsoft Visual C++
    Msvc,
}

impl CompilerFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::AppleClang => "apple-clang",
            CompilerFamily::Msvc => "msvc",
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompilerFamily {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcc" | "g++" => Ok(CompilerFamily::Gcc),
            "clang" | "clang++" => Ok(CompilerFamily::Clang),
            "apple-clang" | "apple_clang" | "appleclang" => Ok(CompilerFamily::AppleClang),
            "msvc" | "cl" | "visual studio" => Ok(CompilerFamily::Msvc),
            _ => Err(PlatformParseError::new(
                "compiler",
                s,
                "gcc, clang, apple-clang, msvc",
            )),
        }
    }
}

/// A compiler family plus its version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Compiler {
    pub family: CompilerFamily,
    pub version: Version,
}

impl Compiler {
    pub fn new(family: CompilerFamily, version: Version) -> Self {
        Compiler { family, version }
    }

    /// Parse a compiler from its family name and a possibly partial version
    /// such as `11` or `13.2`.
    pub fn parse(family: &str, version: &str) -> Result<Self, PlatformParseError> {
        let family = family.parse()?;
        let version = parse_version_lenient(version).ok_or_else(|| {
            PlatformParseError::new("compiler version", version, "e.g. 11, 13.2, 19.29.30133")
        })?;
        Ok(Compiler { family, version })
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.version)
    }
}

/// Build type (CMAKE_BUILD_TYPE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            "minsizerel" => Ok(BuildType::MinSizeRel),
            _ => Err(PlatformParseError::new(
                "build type",
                s,
                "Debug, Release, RelWithDebInfo, MinSizeRel",
            )),
        }
    }
}

/// C++ language standard requested by the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CppStandard {
    #[serde(rename = "98")]
    Cpp98,
    #[serde(rename = "11")]
    Cpp11,
    #[serde(rename = "14")]
    Cpp14,
    #[serde(rename = "17")]
    Cpp17,
    #[serde(rename = "20")]
    Cpp20,
    #[serde(rename = "23")]
    Cpp23,
}

impl CppStandard {
    /// Numeric value as used by CMAKE_CXX_STANDARD.
    pub fn as_number(&self) -> &'static str {
        match self {
            CppStandard::Cpp98 => "98",
            CppStandard::Cpp11 => "11",
            CppStandard::Cpp14 => "14",
            CppStandard::Cpp17 => "17",
            CppStandard::Cpp20 => "20",
            CppStandard::Cpp23 => "23",
        }
    }
}

impl fmt::Display for CppStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C++{}", self.as_number())
    }
}

impl FromStr for CppStandard {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s
            .trim_start_matches("gnu")
            .trim_start_matches("c++")
            .trim_start_matches("cpp");
        match trimmed {
            "98" => Ok(CppStandard::Cpp98),
            "11" => Ok(CppStandard::Cpp11),
            "14" => Ok(CppStandard::Cpp14),
            "17" => Ok(CppStandard::Cpp17),
            "20" => Ok(CppStandard::Cpp20),
            "23" => Ok(CppStandard::Cpp23),
            _ => Err(PlatformParseError::new(
                "C++ standard",
                s,
                "98, 11, 14, 17, 20, 23",
            )),
        }
    }
}

/// Everything a recipe is told about the machine it is packaging for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostProfile {
    pub os: Os,
    pub arch: Arch,
    pub compiler: Compiler,
    #[serde(default)]
    pub build_type: BuildType,
    #[serde(default)]
    pub cppstd: Option<CppStandard>,
}

impl HostProfile {
    pub fn new(os: Os, compiler: Compiler) -> Self {
        HostProfile {
            os,
            arch: Arch::host(),
            compiler,
            build_type: BuildType::default(),
            cppstd: None,
        }
    }

    pub fn with_arch(mut self, arch: Arch) -> Self {
        self.arch = arch;
        self
    }

    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    pub fn with_cppstd(mut self, cppstd: Option<CppStandard>) -> Self {
        self.cppstd = cppstd;
        self
    }

    /// Whether the profile's C++ standard is at least `min`.
    ///
    /// An unset standard never satisfies a minimum; the compiler default
    /// is unknown here.
    pub fn cppstd_at_least(&self, min: CppStandard) -> bool {
        self.cppstd.is_some_and(|std| std >= min)
    }
}

impl fmt::Display for HostProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}, {}, {}",
            self.os, self.arch, self.compiler, self.build_type
        )?;
        if let Some(std) = self.cppstd {
            write!(f, ", {}", std)?;
        }
        Ok(())
    }
}

/// Error returned when parsing a platform descriptor.
#[derive(Debug, Clone)]
pub struct PlatformParseError {
    what: &'static str,
    value: String,
    expected: &'static str,
}

impl PlatformParseError {
    fn new(what: &'static str, value: &str, expected: &'static str) -> Self {
        PlatformParseError {
            what,
            value: value.to_string(),
            expected,
        }
    }
}

impl fmt::Display for PlatformParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} '{}', valid values: {}",
            self.what, self.value, self.expected
        )
    }
}

impl std::error::Error for PlatformParseError {}
