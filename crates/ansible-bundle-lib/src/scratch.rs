use crate::error::BundleError;
use std::path::{Path, PathBuf};

pub const SCRATCH_DIRNAME: &str = "scratch";
pub const PACKAGES_DIRNAME: &str = "packages";

/// Staging tree for a single bundle build. All paths are absolute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScratchDir {
    pub build_dir: PathBuf,
    pub root: PathBuf,
    pub packages: PathBuf,
}

/// Creates `<build_dir>/scratch/packages`, removing any scratch tree left
/// behind by an earlier run first.
pub async fn create_scratch_dir(build_dir: &Path) -> Result<ScratchDir, BundleError> {
    tokio::fs::create_dir_all(build_dir)
        .await
        .map_err(|e| BundleError::ScratchDirectory {
            path: build_dir.to_path_buf(),
            reason: e.to_string(),
        })?;
    let build_dir = tokio::fs::canonicalize(build_dir).await?;

    let root = build_dir.join(SCRATCH_DIRNAME);
    if tokio::fs::try_exists(&root).await? {
        tracing::debug!("Removing stale scratch directory {}", root.display());
        tokio::fs::remove_dir_all(&root)
            .await
            .map_err(|e| BundleError::ScratchDirectory {
                path: root.clone(),
                reason: format!("Couldn't remove stale directory: {}", e),
            })?;
    }

    let packages = root.join(PACKAGES_DIRNAME);
    tokio::fs::create_dir_all(&packages)
        .await
        .map_err(|e| BundleError::ScratchDirectory {
            path: packages.clone(),
            reason: e.to_string(),
        })?;

    Ok(ScratchDir {
        build_dir,
        root,
        packages,
    })
}
