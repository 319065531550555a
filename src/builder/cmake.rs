//! CMake cache definitions derived from a configuration.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::options::OptionValue;

/// Ordered set of `-D<name>=<value>` definitions for the configure step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CMakeDefinitions(BTreeMap<String, String>);

impl CMakeDefinitions {
    pub fn new() -> Self {
        CMakeDefinitions(BTreeMap::new())
    }

    /// Define a cache variable; booleans render as `ON`/`OFF`.
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> &mut Self {
        self.0.insert(name.into(), value.into().to_cmake());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Command-line arguments for `cmake -S ... -B ...`.
    pub fn to_args(&self) -> Vec<String> {
        self.iter()
            .map(|(name, value)| format!("-D{}={}", name, value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_definitions_render_on_off() {
        let mut defs = CMakeDefinitions::new();
        defs.define("OGRE_STATIC", true)
            .define("OGRE_CONFIG_DOUBLE", false)
            .define("CMAKE_CXX_STANDARD", "11");

        assert_eq!(defs.get("OGRE_STATIC"), Some("ON"));
        assert_eq!(defs.get("OGRE_CONFIG_DOUBLE"), Some("OFF"));
        assert_eq!(
            defs.to_args(),
            vec![
                "-DCMAKE_CXX_STANDARD=11",
                "-DOGRE_CONFIG_DOUBLE=OFF",
                "-DOGRE_STATIC=ON",
            ]
        );
    }
}
