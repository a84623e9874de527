use crate::archive::ArchiveFormat;
use crate::config::{BundleManifest, Platform};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct BuildParams {
    pub tool_version: String,
    pub platform: Platform,
    pub manifest: BundleManifest,
    pub format: ArchiveFormat,
    pub cleanup: bool,
    pub python: OsString,
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
}
