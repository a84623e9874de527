use crate::error::BundleError;
use std::path::{Path, PathBuf};

pub const INSTALL_SCRIPT: &str = "install";

/// Copies `<source_dir>/install` into the scratch root unchanged.
pub async fn copy_bootstrap_script(
    source_dir: &Path,
    scratch_root: &Path,
) -> Result<PathBuf, BundleError> {
    let source = source_dir.join(INSTALL_SCRIPT);
    let destination = scratch_root.join(INSTALL_SCRIPT);

    tracing::info!(
        "Copying bootstrap script {} to {}",
        source.display(),
        destination.display()
    );
    tokio::fs::copy(&source, &destination)
        .await
        .map_err(|e| BundleError::BootstrapScript {
            path: source.clone(),
            reason: e.to_string(),
        })?;

    Ok(destination)
}
