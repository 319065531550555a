//! Library components.
//!
//! A Component is an independently linkable unit inside a packaged
//! library: `OgreMain`, `OgreOverlay`, or the single root component of a
//! package that has no sub-modules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An edge from a component to something it links against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ComponentRef {
    /// Another component of the same package.
    Local { name: String },
    /// A component of an upstream package (`boost::boost`).
    External { package: String, component: String },
}

impl ComponentRef {
    pub fn local(name: impl Into<String>) -> Self {
        ComponentRef::Local { name: name.into() }
    }

    pub fn external(package: impl Into<String>, component: impl Into<String>) -> Self {
        ComponentRef::External {
            package: package.into(),
            component: component.into(),
        }
    }

    /// Parse `package::component` as external, anything else as local.
    pub fn parse(s: &str) -> Self {
        match s.split_once("::") {
            Some((package, component)) => ComponentRef::external(package, component),
            None => ComponentRef::local(s),
        }
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentRef::Local { name } => f.write_str(name),
            ComponentRef::External { package, component } => {
                write!(f, "{}::{}", package, component)
            }
        }
    }
}

/// A named, independently linkable library unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,

    /// Name used for the imported CMake target (`OGRE::OgreMain`)
    pub target: String,

    /// Library file names, in link order
    #[serde(default)]
    pub libs: Vec<String>,

    /// Include directories, relative to the install root
    #[serde(default)]
    pub include_dirs: Vec<String>,

    /// Library search directories, relative to the install root
    #[serde(default)]
    pub lib_dirs: Vec<String>,

    /// Directories searched for CMake modules, relative to the install root
    #[serde(default)]
    pub build_dirs: Vec<String>,

    #[serde(default)]
    pub requires: Vec<ComponentRef>,
}

impl Component {
    /// Create a component with the conventional `include` and `lib`
    /// directories and a target named after the component.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Component {
            target: name.clone(),
            name,
            libs: Vec::new(),
            include_dirs: vec!["include".to_string()],
            lib_dirs: vec!["lib".to_string()],
            build_dirs: Vec::new(),
            requires: Vec::new(),
        }
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn lib(mut self, lib: impl Into<String>) -> Self {
        self.libs.push(lib.into());
        self
    }

    /// Replace the include directories.
    pub fn include_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn include_dir(mut self, dir: impl Into<String>) -> Self {
        self.include_dirs.push(dir.into());
        self
    }

    pub fn lib_dir(mut self, dir: impl Into<String>) -> Self {
        self.lib_dirs.push(dir.into());
        self
    }

    pub fn build_dir(mut self, dir: impl Into<String>) -> Self {
        self.build_dirs.push(dir.into());
        self
    }

    /// Add requirement edges, parsed with [`ComponentRef::parse`].
    pub fn requires<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.requires
            .extend(refs.into_iter().map(|r| ComponentRef::parse(r.as_ref())));
        self
    }

    /// Local components this one depends on.
    pub fn local_requires(&self) -> impl Iterator<Item = &str> {
        self.requires.iter().filter_map(|r| match r {
            ComponentRef::Local { name } => Some(name.as_str()),
            ComponentRef::External { .. } => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_ref_parse() {
        assert_eq!(
            ComponentRef::parse("boost::boost"),
            ComponentRef::external("boost", "boost")
        );
        assert_eq!(ComponentRef::parse("OgreMain"), ComponentRef::local("OgreMain"));
        assert_eq!(ComponentRef::parse("zlib::zlib").to_string(), "zlib::zlib");
    }

    #[test]
    fn test_component_builder() {
        let comp = Component::new("Overlay")
            .target("OGRE::Overlay")
            .lib("OgreOverlay")
            .include_dirs(["include/OGRE", "include/OGRE/Overlay"])
            .requires(["OgreMain", "freetype::freetype"]);

        assert_eq!(comp.libs, vec!["OgreOverlay"]);
        assert_eq!(comp.include_dirs, vec!["include/OGRE", "include/OGRE/Overlay"]);
        assert_eq!(comp.lib_dirs, vec!["lib"]);
        assert_eq!(comp.local_requires().collect::<Vec<_>>(), vec!["OgreMain"]);
        assert_eq!(comp.requires.len(), 2);
    }
}
