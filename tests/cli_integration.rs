//! CLI integration tests for slipway.
//!
//! These run the binary end to end: flags and config files in, reports and
//! metadata files out.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the slipway binary command, isolated from the user's global config.
fn slipway(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("slipway").unwrap();
    cmd.env("HOME", home).env("USERPROFILE", home);
    cmd
}

const GCC8: [&str; 6] = [
    "--os",
    "linux",
    "--compiler",
    "gcc",
    "--compiler-version",
    "8",
];

// ============================================================================
// slipway list
// ============================================================================

#[test]
fn test_list_shows_all_recipes() {
    let tmp = TempDir::new().unwrap();

    slipway(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ignition-cmake"))
        .stdout(predicate::str::contains("ogre"))
        .stdout(predicate::str::contains("simbody"))
        .stdout(predicate::str::contains("topics:   graphics, rendering, engine, c++"))
        .stdout(predicate::str::contains("ogre_glsupport_use_egl = True"))
        .stdout(predicate::str::contains("openblas:build_lapack=True"));
}

// ============================================================================
// slipway resolve
// ============================================================================

#[test]
fn test_resolve_simbody_shared_drops_fpic() {
    let tmp = TempDir::new().unwrap();

    slipway(tmp.path())
        .args(["resolve", "simbody", "--version", "3.7"])
        .args(GCC8)
        .args(["-o", "shared=True", "--upstream", "openblas:build_lapack=True"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("simbody 3.7.0"))
        .stdout(predicate::str::contains("shared = True"))
        .stdout(predicate::str::contains("fPIC").not());
}

#[test]
fn test_resolve_ogre_gcc_11_fails() {
    let tmp = TempDir::new().unwrap();

    slipway(tmp.path())
        .args(["resolve", "ogre", "--version", "1.10.2"])
        .args(["--os", "linux", "--compiler", "gcc", "--compiler-version", "11"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("`ogre` cannot be built"))
        .stderr(predicate::str::contains("gcc 11"));
}

#[test]
fn test_resolve_simbody_without_lapack_fails() {
    let tmp = TempDir::new().unwrap();

    slipway(tmp.path())
        .args(["resolve", "simbody", "--version", "3.7"])
        .args(GCC8)
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("build_lapack"))
        .stderr(predicate::str::contains("--upstream openblas:build_lapack=True"));
}

#[test]
fn test_resolve_unknown_recipe_fails() {
    let tmp = TempDir::new().unwrap();

    slipway(tmp.path())
        .args(["resolve", "qt", "--version", "6.5"])
        .args(GCC8)
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no recipe named `qt`"));
}

#[test]
fn test_resolve_without_compiler_fails() {
    let tmp = TempDir::new().unwrap();

    slipway(tmp.path())
        .args(["resolve", "ogre", "--version", "1.10.2"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no compiler configured"));
}

#[test]
fn test_project_config_supplies_profile_and_upstream() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".slipway")).unwrap();
    fs::write(
        tmp.path().join(".slipway/config.toml"),
        r#"
[profile]
os = "linux"
compiler = "gcc"
compiler_version = "8"

[upstream.openblas]
build_lapack = true
"#,
    )
    .unwrap();

    slipway(tmp.path())
        .args(["resolve", "simbody", "--version", "3.7"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("fPIC = True"));
}

// ============================================================================
// slipway requirements / graph / definitions / package-id
// ============================================================================

#[test]
fn test_requirements_follow_egl_option() {
    let tmp = TempDir::new().unwrap();

    slipway(tmp.path())
        .args(["requirements", "ogre", "--version", "1.10.2"])
        .args(GCC8)
        .args(["-o", "ogre_glsupport_use_egl=False"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("libglvnd/1.4.0"))
        .stdout(predicate::str::contains("openssl/1.1.1o (override)"))
        .stdout(predicate::str::contains("egl/system").not());
}

#[test]
fn test_graph_lists_components() {
    let tmp = TempDir::new().unwrap();

    slipway(tmp.path())
        .args(["graph", "ogre", "--version", "1.10.2"])
        .args(GCC8)
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("OgreMain (OGRE::OgreMain)"))
        .stdout(predicate::str::contains("Bites (OGRE::Bites)"))
        .stdout(predicate::str::contains("└── Overlay"))
        .stdout(predicate::str::contains("\nroots: Bites, HLMS, MeshLodGenerator, Paging,"));
}

#[test]
fn test_definitions_for_ignition() {
    let tmp = TempDir::new().unwrap();

    slipway(tmp.path())
        .args(["definitions", "ignition-cmake", "--version", "2.10.0"])
        .args(GCC8)
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout("-DCMAKE_INSTALL_DATAROOTDIR=lib\n-DSKIP_component_name=OFF\n");
}

#[test]
fn test_package_id_is_stable() {
    let tmp = TempDir::new().unwrap();

    let run = || {
        let output = slipway(tmp.path())
            .args(["package-id", "ogre", "--version", "1.10.2"])
            .args(GCC8)
            .current_dir(tmp.path())
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap()
    };

    let first = run();
    assert_eq!(first.trim().len(), 64);
    assert_eq!(first, run());
}

// ============================================================================
// slipway package
// ============================================================================

#[test]
fn test_package_writes_shim_and_metadata() {
    let tmp = TempDir::new().unwrap();
    let prefix = tmp.path().join("install");

    slipway(tmp.path())
        .args(["package", "ogre", "--version", "1.10.2"])
        .args(GCC8)
        .arg("--prefix")
        .arg(&prefix)
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Generated lib/cmake/conan-official-ogre-variables.cmake",
        ));

    let shim = fs::read_to_string(prefix.join("lib/cmake/conan-official-ogre-variables.cmake"))
        .unwrap();
    assert!(shim.starts_with("set(OGRE_PREFIX_DIR ${CMAKE_CURRENT_LIST_DIR}/../..)\n"));
    assert!(shim.contains("set(OGRE1_VERSION_STRING \"1.10.2\")"));

    let record: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(prefix.join("slipway-metadata.json")).unwrap())
            .unwrap();
    assert_eq!(record["name"], "ogre");
    assert_eq!(record["components"]["OgreMain"]["system_libs"][0], "pthread");
}

#[test]
fn test_package_twice_gives_identical_shims() {
    let tmp = TempDir::new().unwrap();
    let prefix = tmp.path().join("install");
    let shim_path = prefix.join("lib/cmake/simbody3/slipway-simbody-variables.cmake");

    let run = || {
        slipway(tmp.path())
            .args(["package", "simbody", "--version", "3.7.0"])
            .args(GCC8)
            .args(["--upstream", "openblas:build_lapack=True"])
            .arg("--prefix")
            .arg(&prefix)
            .current_dir(tmp.path())
            .assert()
            .success();
        fs::read(&shim_path).unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_failed_package_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let prefix = tmp.path().join("install");

    slipway(tmp.path())
        .args(["package", "ogre", "--version", "1.10.2"])
        .args(["--os", "linux", "--compiler", "clang", "--compiler-version", "13"])
        .arg("--prefix")
        .arg(&prefix)
        .current_dir(tmp.path())
        .assert()
        .failure();

    assert!(!prefix.exists());
}

#[test]
fn test_package_prune_removes_upstream_config() {
    let tmp = TempDir::new().unwrap();
    let prefix = tmp.path().join("install");
    let config_dir = prefix.join("lib/cmake/ignition-cmake2");
    fs::create_dir_all(config_dir.join("cmake2")).unwrap();
    fs::write(config_dir.join("ignition-cmake2-config.cmake"), "").unwrap();
    fs::write(config_dir.join("cmake2/IgnUtils.cmake"), "").unwrap();

    slipway(tmp.path())
        .args(["package", "ignition-cmake", "--version", "2.10.0", "--prune"])
        .args(GCC8)
        .arg("--prefix")
        .arg(&prefix)
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Pruned 1 paths"));

    assert!(!config_dir.join("ignition-cmake2-config.cmake").exists());
    assert!(config_dir.join("cmake2/IgnUtils.cmake").exists());
    assert!(config_dir
        .join("slipway-ignition-cmake-variables.cmake")
        .exists());
}

// ============================================================================
// slipway completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();

    slipway(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("slipway"));
}
