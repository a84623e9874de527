use crate::config::{BundleManifest, Platform};
use crate::error::BundleError;
use crate::process::CommandLine;
use itertools::Itertools;
use std::ffi::OsStr;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// One `pip download` invocation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DownloadRequest {
    /// Exact-version source distribution, no binaries allowed.
    Source { name: String, version: String },
    /// Exact-version wheel for one platform tag and interpreter version.
    Binary {
        name: String,
        version: String,
        platform_tag: String,
        python_version: String,
        abi: Option<String>,
    },
}

impl DownloadRequest {
    pub fn name(&self) -> &str {
        match self {
            DownloadRequest::Source { name, .. } | DownloadRequest::Binary { name, .. } => name,
        }
    }

    /// Builds the full command line: `<python> -m pip download ... --dest <dest>`.
    pub fn to_command(&self, python: &OsStr, dest: &Path) -> CommandLine {
        let cmd = CommandLine::new(python).args(["-m", "pip", "download"]);
        let cmd = match self {
            DownloadRequest::Source { name, version } => cmd
                .arg(format!("{name}=={version}"))
                .args(["--no-binary", ":all:", "--no-deps"]),
            DownloadRequest::Binary {
                name,
                version,
                platform_tag,
                python_version,
                abi,
            } => {
                let cmd = cmd
                    .arg(format!("{name}=={version}"))
                    .args(["--only-binary", ":all:", "--platform"])
                    .arg(platform_tag)
                    .arg("--python-version")
                    .arg(python_version)
                    .arg("--no-deps");
                match abi {
                    Some(abi) => cmd.arg("--abi").arg(abi),
                    None => cmd,
                }
            }
        };
        cmd.arg("--dest").arg(dest)
    }
}

impl Display for DownloadRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DownloadRequest::Source { name, version } => write!(f, "{name}=={version} (sdist)"),
            DownloadRequest::Binary {
                name,
                version,
                platform_tag,
                python_version,
                abi,
            } => {
                write!(f, "{name}=={version} ({platform_tag}, py{python_version}")?;
                if let Some(abi) = abi {
                    write!(f, ", {abi}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Expands the manifest into the ordered list of downloads for `platform`.
///
/// The tool package comes first as a source distribution. Dependencies follow
/// in manifest order; binary ones expand over platform tags (outer) and Python
/// versions (inner).
pub fn plan_downloads(
    manifest: &BundleManifest,
    tool_version: &str,
    platform: Platform,
) -> Result<Vec<DownloadRequest>, BundleError> {
    let platform_tags =
        manifest
            .tags_for(platform)
            .ok_or_else(|| BundleError::ManifestValidation {
                details: format!("platform '{platform}' has no platform tags in the manifest"),
            })?;

    let mut plan = vec![DownloadRequest::Source {
        name: manifest.tool_package.clone(),
        version: tool_version.to_string(),
    }];

    for dep in &manifest.dependencies {
        if !dep.binary {
            plan.push(DownloadRequest::Source {
                name: dep.name.clone(),
                version: dep.version.clone(),
            });
            continue;
        }

        for (platform_tag, python_version) in platform_tags
            .iter()
            .cartesian_product(manifest.python_versions.iter())
        {
            let binary = |abi: Option<&str>| DownloadRequest::Binary {
                name: dep.name.clone(),
                version: dep.version.clone(),
                platform_tag: platform_tag.clone(),
                python_version: python_version.clone(),
                abi: abi.map(str::to_string),
            };

            let abis = platform.legacy_abis(python_version);
            if abis.is_empty() {
                plan.push(binary(None));
            } else {
                plan.extend(abis.iter().copied().map(|abi| binary(Some(abi))));
            }
        }
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DependencyEntry;
    use std::ffi::OsString;

    fn manifest_with(dependencies: Vec<DependencyEntry>) -> BundleManifest {
        BundleManifest {
            dependencies,
            ..BundleManifest::default()
        }
    }

    fn count_for(plan: &[DownloadRequest], name: &str) -> usize {
        plan.iter().filter(|req| req.name() == name).count()
    }

    #[test]
    fn test_tool_package_is_first_and_source_only() {
        let plan = plan_downloads(&BundleManifest::default(), "2.9.10", Platform::LinuxX86_64)
            .expect("plan");

        assert_eq!(
            plan.first(),
            Some(&DownloadRequest::Source {
                name: "ansible".to_string(),
                version: "2.9.10".to_string(),
            })
        );
        assert_eq!(count_for(&plan, "ansible"), 1);
    }

    #[test]
    fn test_source_entries_download_once_on_every_platform() {
        let manifest = manifest_with(vec![DependencyEntry::new("six", "1.15.0", false)]);

        for platform in Platform::all() {
            let plan = plan_downloads(&manifest, "2.9.10", platform).expect("plan");
            assert_eq!(count_for(&plan, "six"), 1);
        }
    }

    #[test]
    fn test_binary_entry_count_on_linux_includes_legacy_abi() {
        let manifest = manifest_with(vec![DependencyEntry::new("cffi", "1.14.0", true)]);

        let plan = plan_downloads(&manifest, "2.9.10", Platform::LinuxX86_64).expect("plan");

        // 2 tags x 5 versions, plus one extra per tag for the 2.7 ABI split.
        assert_eq!(count_for(&plan, "cffi"), 2 * 5 + 2);
        let py27: Vec<_> = plan
            .iter()
            .filter_map(|req| match req {
                DownloadRequest::Binary {
                    platform_tag,
                    python_version,
                    abi,
                    ..
                } if python_version == "2.7" => Some((platform_tag.as_str(), abi.as_deref())),
                _ => None,
            })
            .collect();
        assert_eq!(
            py27,
            vec![
                ("manylinux1_x86_64", Some("cp27m")),
                ("manylinux1_x86_64", Some("cp27mu")),
                ("manylinux2010_x86_64", Some("cp27m")),
                ("manylinux2010_x86_64", Some("cp27mu")),
            ]
        );
    }

    #[test]
    fn test_binary_entry_count_on_macos() {
        let manifest = manifest_with(vec![DependencyEntry::new("cryptography", "2.9.2", true)]);

        let plan = plan_downloads(&manifest, "2.9.10", Platform::MacosxX86_64).expect("plan");

        assert_eq!(count_for(&plan, "cryptography"), 5);
        assert!(plan.iter().all(|req| !matches!(
            req,
            DownloadRequest::Binary { abi: Some(_), .. }
        )));
    }

    #[test]
    fn test_default_plan_sizes() {
        let manifest = BundleManifest::default();

        let linux = plan_downloads(&manifest, "2.9.10", Platform::LinuxX86_64).expect("plan");
        let macos = plan_downloads(&manifest, "2.9.10", Platform::MacosxX86_64).expect("plan");

        // ansible + 12 source deps + 2 binary deps.
        assert_eq!(linux.len(), 1 + 12 + 2 * 12);
        assert_eq!(macos.len(), 1 + 12 + 2 * 5);
    }

    #[test]
    fn test_plan_preserves_table_order_and_is_deterministic() {
        let manifest = BundleManifest::default();

        let first = plan_downloads(&manifest, "2.9.10", Platform::LinuxX86_64).expect("plan");
        let second = plan_downloads(&manifest, "2.9.10", Platform::LinuxX86_64).expect("plan");
        assert_eq!(first, second);

        let names: Vec<&str> = first.iter().map(DownloadRequest::name).dedup().collect();
        let mut expected = vec!["ansible"];
        expected.extend(manifest.dependencies.iter().map(|dep| dep.name.as_str()));
        assert_eq!(names, expected);
    }

    #[test]
    fn test_missing_platform_tags_fail_planning() {
        let mut manifest = BundleManifest::default();
        manifest.platform_tags.remove("macosx_x86_64");

        assert!(matches!(
            plan_downloads(&manifest, "2.9.10", Platform::MacosxX86_64),
            Err(BundleError::ManifestValidation { .. })
        ));
    }

    #[test]
    fn test_source_request_command() {
        let req = DownloadRequest::Source {
            name: "Jinja2".to_string(),
            version: "2.11.2".to_string(),
        };

        let cmd = req.to_command(OsStr::new("python3"), Path::new("/tmp/pkgs"));

        assert_eq!(cmd.program, OsString::from("python3"));
        assert_eq!(
            cmd.to_string(),
            "python3 -m pip download Jinja2==2.11.2 --no-binary :all: --no-deps --dest /tmp/pkgs"
        );
    }

    #[test]
    fn test_binary_request_command_with_abi() {
        let req = DownloadRequest::Binary {
            name: "cffi".to_string(),
            version: "1.14.0".to_string(),
            platform_tag: "manylinux1_x86_64".to_string(),
            python_version: "2.7".to_string(),
            abi: Some("cp27mu".to_string()),
        };

        let cmd = req.to_command(OsStr::new("python3"), Path::new("/tmp/pkgs"));

        assert_eq!(
            cmd.to_string(),
            "python3 -m pip download cffi==1.14.0 --only-binary :all: \
             --platform manylinux1_x86_64 --python-version 2.7 --no-deps \
             --abi cp27mu --dest /tmp/pkgs"
        );
    }
}
