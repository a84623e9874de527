use super::Platform;
use super::defaults;
use crate::error::BundleError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DependencyEntry {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub binary: bool,
}

impl DependencyEntry {
    pub fn new(name: impl Into<String>, version: impl Into<String>, binary: bool) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            binary,
        }
    }
}

/// Everything the bundle is assembled from, apart from the tool version.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct BundleManifest {
    pub tool_package: String,
    pub dependencies: Vec<DependencyEntry>,
    /// Platform key (`linux_x86_64`, ...) to wheel platform tags.
    pub platform_tags: BTreeMap<String, Vec<String>>,
    pub python_versions: Vec<String>,
}

impl Default for BundleManifest {
    fn default() -> Self {
        Self {
            tool_package: defaults::TOOL_PACKAGE.to_string(),
            dependencies: defaults::PACKAGE_DEPS
                .iter()
                .map(|(name, version, binary)| DependencyEntry::new(*name, *version, *binary))
                .collect(),
            platform_tags: Platform::all()
                .into_iter()
                .map(|platform| {
                    let tags = defaults::platform_tags(platform)
                        .iter()
                        .map(|tag| tag.to_string())
                        .collect();
                    (platform.key().to_string(), tags)
                })
                .collect(),
            python_versions: defaults::PYTHON_VERSIONS
                .iter()
                .map(|version| version.to_string())
                .collect(),
        }
    }
}

impl BundleManifest {
    pub fn tags_for(&self, platform: Platform) -> Option<&[String]> {
        self.platform_tags.get(platform.key()).map(Vec::as_slice)
    }

    pub fn validate(&self) -> Result<(), BundleError> {
        if self.tool_package.trim().is_empty() {
            return Err(BundleError::ManifestValidation {
                details: "tool_package must not be empty".to_string(),
            });
        }

        for (i, dep) in self.dependencies.iter().enumerate() {
            if dep.name.trim().is_empty() || dep.version.trim().is_empty() {
                return Err(BundleError::ManifestValidation {
                    details: format!("dependency #{i} needs both a name and a version"),
                });
            }
        }

        if self.python_versions.is_empty() {
            return Err(BundleError::ManifestValidation {
                details: "python_versions must not be empty".to_string(),
            });
        }

        for (key, tags) in &self.platform_tags {
            if Platform::from_key(key).is_none() {
                return Err(BundleError::ManifestValidation {
                    details: format!("unknown platform key '{key}'"),
                });
            }
            if tags.is_empty() {
                return Err(BundleError::ManifestValidation {
                    details: format!("platform '{key}' has no platform tags"),
                });
            }
        }

        Ok(())
    }
}
