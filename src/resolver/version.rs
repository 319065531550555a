//! Version string handling.

use semver::Version;

/// Parse a version string, allowing for incomplete versions.
///
/// Upstream projects and compilers rarely publish full semver triples:
/// `11`, `1.10` and `1.10.2` are all accepted, missing components default
/// to zero.
pub fn parse_version_lenient(s: &str) -> Option<Version> {
    let s = s.trim().trim_start_matches('v');

    // Try exact parse first
    if let Ok(v) = s.parse() {
        return Some(v);
    }

    // Try adding missing components
    let parts: Vec<&str> = s.split('.').collect();
    match parts.len() {
        1 => {
            let major: u64 = parts[0].parse().ok()?;
            Some(Version::new(major, 0, 0))
        }
        2 => {
            let major: u64 = parts[0].parse().ok()?;
            let minor: u64 = parts[1].parse().ok()?;
            Some(Version::new(major, minor, 0))
        }
        _ => None,
    }
}

/// The release a pre-release leads up to (`1.12.0-rc1` → `1.12.0`).
///
/// `VersionReq::matches` never admits a pre-release unless the requirement
/// names one, so ranges are checked against this instead.
pub fn release(version: &Version) -> Version {
    Version::new(version.major, version.minor, version.patch)
}

/// Render the `major.minor.patch` triple without pre-release or build data.
pub fn triple(version: &Version) -> String {
    format!("{}.{}.{}", version.major, version.minor, version.patch)
}
