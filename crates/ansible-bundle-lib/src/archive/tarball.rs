use super::{Archiver, BUNDLE_DIRNAME, archive_error, staging_parent};
use crate::error::BundleError;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Writes a gzip tarball with the scratch tree under `ansible-bundle/`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TarballArchiver;

impl Archiver for TarballArchiver {
    fn create(
        &self,
        scratch_dir: &Path,
        output_filename: &str,
        cleanup: bool,
    ) -> Result<PathBuf, BundleError> {
        let archive_path = staging_parent(scratch_dir)?.join(output_filename);
        tracing::info!("Creating tarball {}", archive_path.display());

        let file = File::create(&archive_path).map_err(|e| archive_error(&archive_path, e))?;
        let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
        // Keep symlinks as links rather than copying their targets.
        builder.follow_symlinks(false);
        builder
            .append_dir_all(BUNDLE_DIRNAME, scratch_dir)
            .map_err(|e| archive_error(&archive_path, e))?;
        builder
            .into_inner()
            .and_then(GzEncoder::finish)
            .map_err(|e| archive_error(&archive_path, e))?;

        if cleanup {
            tracing::debug!("Removing staging directory {}", scratch_dir.display());
            std::fs::remove_dir_all(scratch_dir)?;
        }

        Ok(archive_path)
    }
}
