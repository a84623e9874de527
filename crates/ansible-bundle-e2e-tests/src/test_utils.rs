use ansible_bundle_lib::archive::ArchiveFormat;
use ansible_bundle_lib::cli::{BuildParams, Command, ResolvedCommand, resolve_command};
use ansible_bundle_lib::config::{BundleManifest, DependencyEntry, Platform};
use ansible_bundle_lib::error::BundleError;
use ansible_bundle_lib::process::{CommandLine, CommandRunner};
use eyre::Result;
use std::cell::RefCell;
use std::ffi::OsString;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tempfile::TempDir;

pub const INSTALL_SCRIPT: &[u8] = b"#!/usr/bin/env python\nprint('offline ansible install')\n";

/// Stands in for `pip download`: writes one fake distribution per command
/// into the `--dest` directory and records the command.
#[derive(Debug, Default)]
pub struct FakePipRunner {
    commands: RefCell<Vec<String>>,
    fail_on: Option<String>,
}

impl FakePipRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the first download whose requirement starts with `package==`.
    pub fn failing_on(package: &str) -> Self {
        Self {
            commands: RefCell::new(Vec::new()),
            fail_on: Some(format!("{package}==")),
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

impl CommandRunner for FakePipRunner {
    async fn run(&self, cmd: &CommandLine) -> Result<String, BundleError> {
        self.commands.borrow_mut().push(cmd.to_string());

        let args: Vec<String> = cmd
            .args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        let requirement = args
            .iter()
            .find(|arg| arg.contains("=="))
            .cloned()
            .unwrap_or_default();

        if let Some(prefix) = &self.fail_on
            && requirement.starts_with(prefix.as_str())
        {
            return Err(BundleError::CommandFailed {
                status: ExitStatus::from_raw(1 << 8),
                command: cmd.to_string(),
                output: format!("ERROR: No matching distribution found for {requirement}"),
            });
        }

        let dest = PathBuf::from(value_after(&args, "--dest").unwrap_or("."));
        let (name, version) = requirement.split_once("==").unwrap_or((requirement.as_str(), ""));
        let filename = match value_after(&args, "--platform") {
            Some(platform) => {
                let python = value_after(&args, "--python-version")
                    .unwrap_or_default()
                    .replace('.', "");
                let abi = value_after(&args, "--abi").unwrap_or("none");
                format!("{name}-{version}-cp{python}-{abi}-{platform}.whl")
            }
            None => format!("{name}-{version}.tar.gz"),
        };
        tracing::debug!(command = %cmd, "Faking download of {}", filename);
        std::fs::write(dest.join(&filename), format!("contents of {filename}"))?;

        Ok(format!("Saved {}\n", dest.join(filename).display()))
    }
}

/// Temporary source directory holding an `install` script.
pub fn setup_test_environment() -> Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    std::fs::write(temp_dir.path().join("install"), INSTALL_SCRIPT)?;
    Ok(temp_dir)
}

pub fn build_command(
    source_dir: &Path,
    platform: Platform,
    format: ArchiveFormat,
    cleanup: bool,
    config_path: Option<&Path>,
) -> Command {
    Command::Build {
        tool_version: "2.9.10".to_string(),
        platform,
        format,
        cleanup,
        python: OsString::from("python3"),
        source_dir: source_dir.to_string_lossy().into_owned(),
        build_dir: None,
        config_path: config_path.map(|path| path.to_string_lossy().into_owned()),
    }
}

pub fn build_params(
    source_dir: &Path,
    platform: Platform,
    format: ArchiveFormat,
    cleanup: bool,
) -> BuildParams {
    let command = build_command(source_dir, platform, format, cleanup, None);
    match resolve_command(command).expect("Failed to resolve build command") {
        ResolvedCommand::Build(params) => params,
    }
}

/// A small manifest with one source and one binary dependency.
pub fn create_test_manifest() -> BundleManifest {
    BundleManifest {
        dependencies: vec![
            DependencyEntry::new("six", "1.15.0", false),
            DependencyEntry::new("cffi", "1.14.0", true),
        ],
        python_versions: vec!["2.7".to_string(), "3.8".to_string()],
        ..BundleManifest::default()
    }
}

/// Writes [`create_test_manifest`] as JSON next to the source directory.
pub fn write_test_manifest(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("manifest.json");
    std::fs::write(&path, serde_json::to_string_pretty(&create_test_manifest())?)?;
    Ok(path)
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("ansible_bundle_lib=debug,ansible_bundle_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
