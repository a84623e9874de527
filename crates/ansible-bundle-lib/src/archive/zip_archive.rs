use super::{Archiver, BUNDLE_DIRNAME, archive_error, staging_parent};
use crate::error::BundleError;
use itertools::Itertools;
use std::fs::{File, Metadata};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Moves the scratch tree to `ansible-bundle/` and zips it from its parent.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZipArchiver;

impl Archiver for ZipArchiver {
    fn create(
        &self,
        scratch_dir: &Path,
        output_filename: &str,
        cleanup: bool,
    ) -> Result<PathBuf, BundleError> {
        let parent = staging_parent(scratch_dir)?;
        let bundle_dir = parent.join(BUNDLE_DIRNAME);
        if bundle_dir.try_exists()? {
            tracing::debug!("Removing stale bundle directory {}", bundle_dir.display());
            std::fs::remove_dir_all(&bundle_dir)?;
        }
        std::fs::rename(scratch_dir, &bundle_dir)?;

        let archive_path = parent.join(output_filename);
        tracing::info!("Creating zip archive {}", archive_path.display());

        let file = File::create(&archive_path).map_err(|e| archive_error(&archive_path, e))?;
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in WalkDir::new(&bundle_dir).sort_by_file_name() {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(parent)
                .map_err(|e| archive_error(&archive_path, e))?;
            let name = entry_name(relative);
            let entry_options = options.unix_permissions(unix_mode(&entry.metadata()?));
            let file_type = entry.file_type();

            tracing::debug!("Adding {}", name);
            if file_type.is_dir() {
                writer.add_directory(name, entry_options)?;
            } else if file_type.is_symlink() {
                let target = std::fs::read_link(entry.path())?;
                writer.add_symlink(name, target.to_string_lossy().into_owned(), entry_options)?;
            } else {
                writer.start_file(name, entry_options)?;
                let mut source = File::open(entry.path())?;
                std::io::copy(&mut source, &mut writer)?;
            }
        }
        writer.finish()?;

        if cleanup {
            tracing::debug!("Removing staging directory {}", bundle_dir.display());
            std::fs::remove_dir_all(&bundle_dir)?;
        }

        Ok(archive_path)
    }
}

/// Zip entry names always use `/`, whatever the host separator.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .join("/")
}

#[cfg(unix)]
fn unix_mode(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode()
}

#[cfg(not(unix))]
fn unix_mode(metadata: &Metadata) -> u32 {
    if metadata.is_dir() { 0o755 } else { 0o644 }
}
