//! Installed npm package metadata.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::generator::GenerateError;

#[derive(Debug, Deserialize)]
struct PackageManifest {
    version: String,
}

/// Path of an installed package's manifest under `root/node_modules`.
///
/// Scoped names such as `@sip-protocol/sdk` map to nested directories.
pub fn manifest_path(root: &Path, package: &str) -> PathBuf {
    package
        .split('/')
        .fold(root.join("node_modules"), |path, segment| path.join(segment))
        .join("package.json")
}

/// Locate the manifest of `package`, searching `root` and then each parent
/// directory's `node_modules`, the way Node resolves packages.
pub fn find_manifest(root: &Path, package: &str) -> Option<PathBuf> {
    let root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());

    root.ancestors()
        .map(|dir| manifest_path(dir, package))
        .find(|path| path.is_file())
}

/// Read the version of `package` as installed for the project at `root`.
pub fn installed_version(root: &Path, package: &str) -> Result<String, GenerateError> {
    let Some(path) = find_manifest(root, package) else {
        return Err(GenerateError::PackageVersion {
            package: package.to_string(),
            message: format!(
                "not installed in any node_modules from {} upwards",
                root.display()
            ),
        });
    };

    let content = fs::read_to_string(&path).map_err(|e| GenerateError::PackageVersion {
        package: package.to_string(),
        message: format!("{}: {}", path.display(), e),
    })?;

    let manifest: PackageManifest =
        serde_json::from_str(&content).map_err(|e| GenerateError::PackageVersion {
            package: package.to_string(),
            message: format!("{}: {}", path.display(), e),
        })?;

    Ok(manifest.version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn resolves_scoped_manifest_path() {
        assert_eq!(
            manifest_path(Path::new("/site"), "@sip-protocol/sdk"),
            PathBuf::from("/site/node_modules/@sip-protocol/sdk/package.json")
        );
    }

    #[test]
    fn reads_installed_version() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("node_modules/@sip-protocol/sdk");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("package.json"),
            r#"{ "name": "@sip-protocol/sdk", "version": "0.2.4", "main": "dist/index.js" }"#,
        )
        .unwrap();

        let version = installed_version(temp.path(), "@sip-protocol/sdk").unwrap();

        assert_eq!(version, "0.2.4");
    }

    #[test]
    fn reads_version_hoisted_to_parent() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("node_modules/@sip-protocol/sdk");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("package.json"), r#"{ "version": "0.5.1" }"#).unwrap();
        let root = temp.path().join("packages/docs");
        fs::create_dir_all(&root).unwrap();

        let version = installed_version(&root, "@sip-protocol/sdk").unwrap();

        assert_eq!(version, "0.5.1");
    }

    #[test]
    fn nearest_install_wins() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("packages/docs");
        for (dir, version) in [(temp.path(), "0.1.0"), (root.as_path(), "0.2.0")] {
            let pkg = dir.join("node_modules/@sip-protocol/sdk");
            fs::create_dir_all(&pkg).unwrap();
            fs::write(
                pkg.join("package.json"),
                format!(r#"{{ "version": "{version}" }}"#),
            )
            .unwrap();
        }

        let version = installed_version(&root, "@sip-protocol/sdk").unwrap();

        assert_eq!(version, "0.2.0");
    }

    #[test]
    fn missing_package_is_an_error() {
        let temp = tempdir().unwrap();

        let result = installed_version(temp.path(), "@sip-protocol/sdk");

        assert!(matches!(result, Err(GenerateError::PackageVersion { .. })));
    }

    #[test]
    fn manifest_without_version_is_an_error() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("node_modules/left-pad");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("package.json"), r#"{ "name": "left-pad" }"#).unwrap();

        let result = installed_version(temp.path(), "left-pad");

        assert!(matches!(result, Err(GenerateError::PackageVersion { .. })));
    }
}
