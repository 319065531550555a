//! Recipe options.
//!
//! An option is a named toggle declared by a recipe (`shared`, `fPIC`,
//! `ogre_set_double`, ...). Values are either booleans or one of a fixed
//! set of enum strings.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Name of the shared-linking option.
pub const SHARED: &str = "shared";

/// Name of the position-independent-code option.
pub const FPIC: &str = "fPIC";

/// A single option value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Enum(String),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            OptionValue::Enum(_) => None,
        }
    }

    /// Render as a CMake cache value (`ON`/`OFF` for booleans).
    pub fn to_cmake(&self) -> String {
        match self {
            OptionValue::Bool(true) => "ON".to_string(),
            OptionValue::Bool(false) => "OFF".to_string(),
            OptionValue::Enum(s) => s.clone(),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| OptionValue::Enum(s.to_string()))
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(true) => f.write_str("True"),
            OptionValue::Bool(false) => f.write_str("False"),
            OptionValue::Enum(s) => f.write_str(s),
        }
    }
}

impl FromStr for OptionValue {
    type Err = std::convert::Infallible;

    /// Boolean spellings are recognised case-insensitively; anything else
    /// is kept as an enum value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => OptionValue::Bool(true),
            "false" | "off" | "no" | "0" => OptionValue::Bool(false),
            _ => OptionValue::Enum(s.to_string()),
        })
    }
}

/// Config files may spell booleans as TOML booleans, integers or strings
/// (`true`, `1`, `"True"`); all of them go through the same parsing as
/// command-line values.
impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawValue {
            Bool(bool),
            Int(i64),
            Str(String),
        }

        Ok(match RawValue::deserialize(deserializer)? {
            RawValue::Bool(b) => OptionValue::Bool(b),
            RawValue::Int(n) => OptionValue::from(n.to_string().as_str()),
            RawValue::Str(s) => OptionValue::from(s.as_str()),
        })
    }
}

/// The values an option may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    Bool,
    Enum(Vec<&'static str>),
}

/// An option declared by a recipe.
#[derive(Debug, Clone)]
pub struct OptionDecl {
    pub name: &'static str,
    pub kind: OptionKind,
    pub default: OptionValue,
    pub description: &'static str,
}

impl OptionDecl {
    pub fn boolean(name: &'static str, default: bool, description: &'static str) -> Self {
        OptionDecl {
            name,
            kind: OptionKind::Bool,
            default: OptionValue::Bool(default),
            description,
        }
    }

    pub fn choice(
        name: &'static str,
        values: &[&'static str],
        default: &'static str,
        description: &'static str,
    ) -> Self {
        OptionDecl {
            name,
            kind: OptionKind::Enum(values.to_vec()),
            default: OptionValue::Enum(default.to_string()),
            description,
        }
    }

    /// Check a user-supplied value against the allowed set.
    pub fn accepts(&self, value: &OptionValue) -> bool {
        match (&self.kind, value) {
            (OptionKind::Bool, OptionValue::Bool(_)) => true,
            (OptionKind::Enum(values), OptionValue::Enum(v)) => values.contains(&v.as_str()),
            _ => false,
        }
    }

    /// Human-readable list of allowed values.
    pub fn allowed(&self) -> String {
        match &self.kind {
            OptionKind::Bool => "True, False".to_string(),
            OptionKind::Enum(values) => values.join(", "),
        }
    }
}

/// Ordered option name → value map.
///
/// Ordering is by name so that rendering and hashing are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionMap(BTreeMap<String, OptionValue>);

impl OptionMap {
    pub fn new() -> Self {
        OptionMap(BTreeMap::new())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<OptionValue> {
        self.0.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Boolean value of an option; absent or non-boolean options are false.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(OptionValue::as_bool).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay `other` on top of this map.
    pub fn merge(&mut self, other: &OptionMap) {
        for (name, value) in other.iter() {
            self.0.insert(name.clone(), value.clone());
        }
    }
}

impl FromIterator<(String, OptionValue)> for OptionMap {
    fn from_iter<I: IntoIterator<Item = (String, OptionValue)>>(iter: I) -> Self {
        OptionMap(iter.into_iter().collect())
    }
}

impl fmt::Display for OptionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        f.write_str(&parts.join(", "))
    }
}

/// Parse a `name=value` assignment as given on the command line.
pub fn parse_assignment(s: &str) -> Result<(String, OptionValue), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected `name=value`, got `{}`", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing option name in `{}`", s));
    }
    let value = value.trim().parse().unwrap_or(OptionValue::Bool(false));
    Ok((name.to_string(), value))
}

/// Option values for upstream packages, keyed by package name.
///
/// The package-manager runtime resolves upstream packages before this
/// recipe is evaluated and hands over their final options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpstreamOptions(BTreeMap<String, OptionMap>);

impl UpstreamOptions {
    pub fn new() -> Self {
        UpstreamOptions(BTreeMap::new())
    }

    pub fn set(
        &mut self,
        package: impl Into<String>,
        option: impl Into<String>,
        value: impl Into<OptionValue>,
    ) {
        self.0.entry(package.into()).or_default().set(option, value);
    }

    pub fn with(
        mut self,
        package: impl Into<String>,
        option: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Self {
        self.set(package, option, value);
        self
    }

    pub fn get(&self, package: &str, option: &str) -> Option<&OptionValue> {
        self.0.get(package).and_then(|opts| opts.get(option))
    }

    pub fn merge(&mut self, other: &UpstreamOptions) {
        for (package, opts) in &other.0 {
            self.0.entry(package.clone()).or_default().merge(opts);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parse a `package:option=value` assignment.
pub fn parse_upstream_assignment(s: &str) -> Result<(String, String, OptionValue), String> {
    let (package, rest) = s
        .split_once(':')
        .ok_or_else(|| format!("expected `package:option=value`, got `{}`", s))?;
    let (option, value) = parse_assignment(rest)?;
    Ok((package.trim().to_string(), option, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_value_parse() {
        assert_eq!("True".parse::<OptionValue>().unwrap(), OptionValue::Bool(true));
        assert_eq!("off".parse::<OptionValue>().unwrap(), OptionValue::Bool(false));
        assert_eq!(
            "x11".parse::<OptionValue>().unwrap(),
            OptionValue::Enum("x11".to_string())
        );
    }

    #[test]
    fn test_option_value_cmake_rendering() {
        assert_eq!(OptionValue::Bool(true).to_cmake(), "ON");
        assert_eq!(OptionValue::Bool(false).to_cmake(), "OFF");
        assert_eq!(OptionValue::from("lib").to_cmake(), "lib");
    }

    #[test]
    fn test_decl_accepts() {
        let shared = OptionDecl::boolean(SHARED, false, "Build shared libraries");
        assert!(shared.accepts(&OptionValue::Bool(true)));
        assert!(!shared.accepts(&OptionValue::from("maybe")));

        let backend = OptionDecl::choice("backend", &["egl", "glx"], "egl", "GL backend");
        assert!(backend.accepts(&OptionValue::from("glx")));
        assert!(!backend.accepts(&OptionValue::from("wgl")));
        assert!(!backend.accepts(&OptionValue::Bool(true)));
        assert_eq!(backend.allowed(), "egl, glx");
    }

    #[test]
    fn test_parse_assignment() {
        let (name, value) = parse_assignment("shared=True").unwrap();
        assert_eq!(name, "shared");
        assert_eq!(value, OptionValue::Bool(true));

        assert!(parse_assignment("shared").is_err());
        assert!(parse_assignment("=True").is_err());
    }

    #[test]
    fn test_parse_upstream_assignment() {
        let (pkg, opt, value) = parse_upstream_assignment("openblas:build_lapack=True").unwrap();
        assert_eq!(pkg, "openblas");
        assert_eq!(opt, "build_lapack");
        assert_eq!(value, OptionValue::Bool(true));

        assert!(parse_upstream_assignment("build_lapack=True").is_err());
    }

    #[test]
    fn test_option_map_display_is_sorted() {
        let map = OptionMap::new().with("shared", true).with("fPIC", false);
        assert_eq!(map.to_string(), "fPIC=False, shared=True");
    }

    #[test]
    fn test_upstream_merge() {
        let mut base = UpstreamOptions::new().with("openblas", "build_lapack", false);
        let overlay = UpstreamOptions::new().with("openblas", "build_lapack", true);
        base.merge(&overlay);
        assert_eq!(
            base.get("openblas", "build_lapack"),
            Some(&OptionValue::Bool(true))
        );
    }
}
