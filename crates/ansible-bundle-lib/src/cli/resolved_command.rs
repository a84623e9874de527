use crate::cli::args::Command;
use crate::cli::params::BuildParams;
use crate::config::load_manifest;
use crate::error::BundleError;
use std::path::PathBuf;

pub const BUILD_DIRNAME: &str = "build";

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    Build(BuildParams),
}

/// Validates arguments and loads the manifest. Performs no filesystem writes
/// and starts no subprocesses.
pub fn resolve_command(command: Command) -> Result<ResolvedCommand, BundleError> {
    match command {
        Command::Build {
            tool_version,
            platform,
            format,
            cleanup,
            python,
            source_dir,
            build_dir,
            config_path,
        } => {
            let tool_version = tool_version.trim().to_string();
            if tool_version.is_empty() {
                return Err(BundleError::CliArgumentValidation {
                    details: "Ansible version must not be empty.".to_string(),
                });
            }
            if tool_version.contains(std::path::is_separator) || tool_version.contains("..") {
                return Err(BundleError::CliArgumentValidation {
                    details: format!(
                        "Ansible version '{tool_version}' must not contain path separators or '..'."
                    ),
                });
            }
            if python.is_empty() {
                return Err(BundleError::CliArgumentValidation {
                    details: "--python must name an interpreter.".to_string(),
                });
            }

            let manifest = load_manifest(config_path.as_deref())?;
            if manifest.tags_for(platform).is_none() {
                return Err(BundleError::CliArgumentValidation {
                    details: format!(
                        "Platform '{platform}' is not defined in the manifest's platform_tags."
                    ),
                });
            }

            let source_dir = PathBuf::from(source_dir);
            let build_dir = build_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| source_dir.join(BUILD_DIRNAME));

            Ok(ResolvedCommand::Build(BuildParams {
                tool_version,
                platform,
                manifest,
                format,
                cleanup,
                python,
                source_dir,
                build_dir,
            }))
        }
    }
}
