//! Install-tree pruning.
//!
//! Upstream installs ship pkg-config files and CMake config packages that
//! would shadow the generated metadata. Recipes list them as glob
//! patterns relative to the install prefix.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::fs::{glob_paths, remove_path_if_exists};

/// Remove every path under `root` matching one of `patterns`.
///
/// Paths in `keep`, and directories containing them, survive even when a
/// pattern matches. Returns the removed paths. Patterns matching nothing
/// are not an error.
pub fn prune_install_tree(
    root: &Path,
    patterns: &[String],
    keep: &[PathBuf],
) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    for path in glob_paths(root, patterns)? {
        if keep.iter().any(|k| k.starts_with(&path)) {
            tracing::debug!("keeping {}", path.display());
            continue;
        }
        // A directory may already be gone with its parent
        if remove_path_if_exists(&path)? {
            tracing::debug!("pruned {}", path.display());
            removed.push(path);
        }
    }

    if !removed.is_empty() {
        tracing::info!("pruned {} paths from {}", removed.len(), root.display());
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{install_tree, list_files};

    #[test]
    fn test_prune_ignition_config_files() {
        let tree = install_tree(&[
            "lib/pkgconfig/ignition-cmake2.pc",
            "lib/cmake/ignition-cmake2/ignition-cmake2-config.cmake",
            "lib/cmake/ignition-cmake2/ignition-cmake2-config-version.cmake",
            "lib/cmake/ignition-cmake2/cmake2/IgnCMake.cmake",
        ]);
        let patterns = vec![
            "lib/pkgconfig".to_string(),
            "lib/cmake/ignition-cmake2/*.cmake".to_string(),
        ];

        let removed = prune_install_tree(tree.path(), &patterns, &[]).unwrap();

        assert_eq!(removed.len(), 3);
        assert_eq!(
            list_files(tree.path()),
            vec!["lib/cmake/ignition-cmake2/cmake2/IgnCMake.cmake"]
        );
    }

    #[test]
    fn test_prune_missing_paths() {
        let tree = install_tree(&["include/foo.h"]);
        let removed =
            prune_install_tree(tree.path(), &["lib/pkgconfig".to_string()], &[]).unwrap();
        assert!(removed.is_empty());
        assert_eq!(list_files(tree.path()), vec!["include/foo.h"]);
    }

    #[test]
    fn test_prune_spares_kept_paths() {
        let tree = install_tree(&[
            "lib/cmake/ignition-cmake2/ignition-cmake2-config.cmake",
            "lib/cmake/ignition-cmake2/slipway-ignition-cmake-variables.cmake",
            "lib/pkgconfig/keep/generated.pc",
        ]);
        let patterns = vec![
            "lib/pkgconfig".to_string(),
            "lib/cmake/ignition-cmake2/*.cmake".to_string(),
        ];
        let keep = vec![
            tree.path()
                .join("lib/cmake/ignition-cmake2/slipway-ignition-cmake-variables.cmake"),
            tree.path().join("lib/pkgconfig/keep/generated.pc"),
        ];

        let removed = prune_install_tree(tree.path(), &patterns, &keep).unwrap();

        assert_eq!(removed.len(), 1);
        assert_eq!(
            list_files(tree.path()),
            vec![
                "lib/cmake/ignition-cmake2/slipway-ignition-cmake-variables.cmake",
                "lib/pkgconfig/keep/generated.pc",
            ]
        );
    }
}
