//! Binary package ids.
//!
//! Two configurations with the same id produce interchangeable binaries.

use crate::core::{Configuration, Recipe};
use crate::resolver::version::triple;
use crate::util::hash::Fingerprint;

/// Compute the package id for a resolved configuration.
///
/// Header-only recipes hash only the name and version, so every host
/// profile shares one binary.
pub fn package_id(recipe: &dyn Recipe, config: &Configuration) -> String {
    let mut fp = Fingerprint::new();
    fp.update_field("name", recipe.name())
        .update_field("version", &triple(config.version()));

    if recipe.info().header_only {
        return fp.finish();
    }

    for (name, value) in config.options().iter() {
        fp.update_field(&format!("options.{}", name), &value.to_string());
    }

    let host = config.host();
    fp.update_field("os", host.os.as_str())
        .update_field("arch", host.arch.as_str())
        .update_field("compiler", host.compiler.family.as_str())
        .update_field("compiler.version", &host.compiler.version.to_string())
        .update_field("build_type", host.build_type.as_str())
        .update_opt("cppstd", host.cppstd.as_ref().map(|s| s.as_number()));

    fp.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::CppStandard;
    use crate::core::OptionMap;
    use crate::recipes::{IgnitionCmake, Ogre};
    use crate::resolver::{ResolveRequest, Resolver};
    use crate::test_support::{linux_gcc, profile};

    fn id_for(recipe: &dyn Recipe, request: ResolveRequest) -> String {
        let config = Resolver::new(recipe).resolve(&request).unwrap();
        package_id(recipe, &config)
    }

    #[test]
    fn test_package_id_is_deterministic() {
        let a = id_for(&Ogre, ResolveRequest::new("1.10.2", linux_gcc("8")));
        let b = id_for(&Ogre, ResolveRequest::new("1.10.2", linux_gcc("8")));
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_options_and_host_change_the_id() {
        let base = id_for(&Ogre, ResolveRequest::new("1.10.2", linux_gcc("8")));

        let shared = id_for(
            &Ogre,
            ResolveRequest::new("1.10.2", linux_gcc("8"))
                .with_options(OptionMap::new().with("shared", true)),
        );
        let cpp17 = id_for(
            &Ogre,
            ResolveRequest::new("1.10.2", linux_gcc("8").with_cppstd(Some(CppStandard::Cpp17))),
        );

        assert_ne!(base, shared);
        assert_ne!(base, cpp17);
    }

    #[test]
    fn test_header_only_ignores_host() {
        let linux = id_for(&IgnitionCmake, ResolveRequest::new("2.10.0", linux_gcc("11")));
        let windows = id_for(
            &IgnitionCmake,
            ResolveRequest::new("2.10.0", profile("windows", "msvc", "193")),
        );
        let other_version = id_for(&IgnitionCmake, ResolveRequest::new("2.9.0", linux_gcc("11")));

        assert_eq!(linux, windows);
        assert_ne!(linux, other_version);
    }
}
