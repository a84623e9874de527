//! Packaging of the staged scratch directory into the final artifact.
//!
//! Both formats place the staged tree under a single top-level
//! `ansible-bundle` directory and write the artifact next to the scratch
//! directory.

mod tarball;
mod zip_archive;

pub use tarball::TarballArchiver;
pub use zip_archive::ZipArchiver;

use crate::config::Platform;
use crate::error::BundleError;
use clap::ValueEnum;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const BUNDLE_DIRNAME: &str = "ansible-bundle";

pub trait Archiver {
    /// Packages `scratch_dir` into `<parent of scratch_dir>/<output_filename>`
    /// and returns the artifact path. Staging content is removed afterwards
    /// when `cleanup` is set.
    fn create(
        &self,
        scratch_dir: &Path,
        output_filename: &str,
        cleanup: bool,
    ) -> Result<PathBuf, BundleError>;
}

#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, ValueEnum)]
pub enum ArchiveFormat {
    /// gzip-compressed tarball
    #[default]
    Tgz,
    /// deflate-compressed zip
    Zip,
}

impl ArchiveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::Tgz => "tgz",
            ArchiveFormat::Zip => "zip",
        }
    }

    pub fn artifact_name(self, tool_version: &str, platform: Platform) -> String {
        format!(
            "{BUNDLE_DIRNAME}-{tool_version}-{platform}.{}",
            self.extension()
        )
    }

    pub fn archiver(self) -> Box<dyn Archiver + Send> {
        match self {
            ArchiveFormat::Tgz => Box::new(TarballArchiver),
            ArchiveFormat::Zip => Box::new(ZipArchiver),
        }
    }
}

impl Display for ArchiveFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

fn staging_parent(scratch_dir: &Path) -> Result<&Path, BundleError> {
    scratch_dir.parent().ok_or_else(|| BundleError::Archive {
        path: scratch_dir.to_path_buf(),
        reason: "staging directory has no parent directory".to_string(),
    })
}

fn archive_error(path: &Path, e: impl Display) -> BundleError {
    BundleError::Archive {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::{Path, PathBuf};

    pub const FILES: &[(&str, &str)] = &[
        ("install", "#!/usr/bin/env python\nprint('install')\n"),
        ("packages/ansible-2.9.10.tar.gz", "sdist bytes"),
        (
            "packages/cffi-1.14.0-cp38-cp38-manylinux1_x86_64.whl",
            "PK\x03\x04wheel",
        ),
    ];

    /// Builds `<root>/build/scratch` populated with [`FILES`].
    pub fn populated_scratch(root: &Path) -> PathBuf {
        let scratch = root.join("build").join("scratch");
        for (relative, content) in FILES {
            let path = scratch.join(relative);
            std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
            std::fs::write(path, content).expect("write file");
        }
        scratch
    }

    pub fn assert_extracted(root: &Path) {
        for (relative, content) in FILES {
            let path = root.join("ansible-bundle").join(relative);
            assert_eq!(
                std::fs::read(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display())),
                content.as_bytes()
            );
        }
    }
}
