//! OGRE 1.x: a scene-oriented 3D rendering engine.

use semver::VersionReq;

use crate::builder::cmake::CMakeDefinitions;
use crate::builder::shim::ShimSpec;
use crate::core::options::{FPIC, SHARED};
use crate::core::platform::{CompilerFamily, CppStandard, Os};
use crate::core::recipe::{Generator, PackageNames, Recipe, RecipeInfo, SystemLibRule};
use crate::core::{Component, Configuration, OptionDecl, RequirementSet};
use crate::resolver::compiler::CompilerConstraint;
use crate::resolver::errors::RecipeError;

const SET_DOUBLE: &str = "ogre_set_double";
const USE_EGL: &str = "ogre_glsupport_use_egl";

const MODULE_FILE: &str = "lib/cmake/conan-official-ogre-variables.cmake";
const INCLUDE_ROOT: &str = "include/OGRE";

static INFO: RecipeInfo = RecipeInfo {
    name: "ogre",
    description: "A scene-oriented, flexible 3D engine written in C++",
    license: "MIT",
    homepage: "https://github.com/OGRECave/ogre",
    topics: &["graphics", "rendering", "engine", "c++"],
    header_only: false,
};

/// `(component, library, include subdirectory)`; all require OgreMain.
const PLUGIN_COMPONENTS: &[(&str, &str, &str)] = &[
    ("HLMS", "OgreHLMS", "HLMS"),
    ("MeshLodGenerator", "OgreMeshLoadGenerator", "MeshLoadGenerator"),
    ("Overlay", "OgreOverlay", "Overlay"),
    ("Paging", "OgrePaging", "Paging"),
    ("Property", "OgreProperty", "Property"),
    ("Python", "OgrePython", "Python"),
    ("RTShaderSystem", "OgreRTShaderSystem", "RTShaderSystem"),
    ("Terrain", "OgreTerrain", "Terrain"),
    ("Volume", "OgreVolume", "Volume"),
];

const MAIN_REQUIRES: &[&str] = &[
    "boost::boost",
    "cppunit::cppunit",
    "freeimage::freeimage",
    "openexr::openexr",
    "freetype::freetype",
    "tbb::tbb",
    "xorg::xorg",
    "zlib::zlib",
    "zziplib::zziplib",
    "poco::poco",
];

pub struct Ogre;

fn component(name: &str, lib: &str, include_sub: Option<&str>) -> Component {
    let mut include_dirs = vec![INCLUDE_ROOT.to_string()];
    if let Some(sub) = include_sub {
        include_dirs.push(format!("{}/{}", INCLUDE_ROOT, sub));
    }

    Component::new(name)
        .target(format!("OGRE::{}", name))
        .lib(lib)
        .include_dirs(include_dirs)
        .build_dir(MODULE_FILE)
}

impl Recipe for Ogre {
    fn info(&self) -> &RecipeInfo {
        &INFO
    }

    fn supported_versions(&self) -> VersionReq {
        VersionReq::parse(">=1, <2").unwrap_or(VersionReq::STAR)
    }

    fn options(&self) -> Vec<OptionDecl> {
        vec![
            OptionDecl::boolean(SHARED, false, "Build shared libraries"),
            OptionDecl::boolean(FPIC, true, "Build position-independent code"),
            OptionDecl::boolean(SET_DOUBLE, false, "Use doubles instead of floats for Real"),
            OptionDecl::boolean(USE_EGL, true, "Use EGL instead of GLX for GL support"),
        ]
    }

    fn compiler_constraints(&self) -> Vec<CompilerConstraint> {
        vec![
            CompilerConstraint::new(">=1, <2", CompilerFamily::Gcc, "<9"),
            CompilerConstraint::new(">=1, <2", CompilerFamily::Clang, "<9"),
        ]
    }

    fn requirements(&self, config: &Configuration) -> Result<RequirementSet, RecipeError> {
        let mut reqs = RequirementSet::new();
        reqs.require("cppunit/1.15.1")?;
        reqs.require("freeimage/3.18.0")?;
        reqs.require("boost/1.75.0")?;
        reqs.require("freetype/2.11.1")?;
        reqs.require("openexr/2.5.7")?;
        reqs.require("poco/1.11.2")?;
        reqs.require("tbb/2020.3")?;
        reqs.require("zlib/1.2.12")?;
        reqs.require("zziplib/0.13.71")?;
        reqs.require_override("openssl/1.1.1o")?;
        reqs.require("xorg/system")?;
        if config.flag(USE_EGL) {
            reqs.require("egl/system")?;
        } else {
            reqs.require("libglvnd/1.4.0")?;
        }
        Ok(reqs)
    }

    fn components(&self, _config: &Configuration) -> Vec<Component> {
        let mut components = vec![
            component("OgreMain", "OgreMain", None).requires(MAIN_REQUIRES.iter().copied()),
            component("Bites", "OgreBites", Some("Bites")).requires(["OgreMain", "Overlay"]),
        ];
        components.extend(
            PLUGIN_COMPONENTS
                .iter()
                .map(|(name, lib, sub)| component(name, lib, Some(sub)).requires(["OgreMain"])),
        );
        components
    }

    fn package_names(&self, _config: &Configuration) -> PackageNames {
        PackageNames::find_package("OGRE")
            .with_generator(Generator::CmakePaths)
            .with_cmake_file_name("OGRE")
    }

    fn system_libs(&self) -> Vec<SystemLibRule> {
        vec![SystemLibRule::new(Os::Linux, &["pthread"])]
    }

    fn shim(&self, config: &Configuration) -> Option<ShimSpec> {
        Some(
            ShimSpec::new(MODULE_FILE, "OGRE_PREFIX_DIR", format!("OGRE{}", config.major()))
                .path_var("OGRE_MEDIA_DIR", "share/OGRE/Media")
                .path_var("OGRE_PLUGIN_DIR", "lib/OGRE")
                .path_var("OGRE_CONFIG_DIR", "share/OGRE"),
        )
    }

    fn cmake_definitions(&self, config: &Configuration) -> CMakeDefinitions {
        let mut defs = CMakeDefinitions::new();
        defs.define("OGRE_STATIC", !config.flag(SHARED))
            .define("OGRE_CONFIG_DOUBLE", config.flag(SET_DOUBLE))
            .define("OGRE_CONFIG_NODE_INHERIT_TRANSFORM", false)
            .define("OGRE_GLSUPPORT_USE_EGL", config.flag(USE_EGL));
        // OpenEXR headers need C++11
        if !config.host().cppstd_at_least(CppStandard::Cpp11) {
            defs.define("CMAKE_CXX_STANDARD", "11");
        }
        defs
    }

    fn prune_patterns(&self, _config: &Configuration) -> Vec<String> {
        vec![
            "lib/pkgconfig".to_string(),
            "lib/share".to_string(),
            "lib/OGRE/cmake".to_string(),
        ]
    }
}
