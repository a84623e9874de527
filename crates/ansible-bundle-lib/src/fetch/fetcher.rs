use super::DownloadRequest;
use crate::error::BundleError;
use crate::process::CommandRunner;
use std::ffi::OsStr;
use std::path::Path;

/// Runs every download in `plan` one after another. The first failing
/// download aborts the phase; nothing after it is attempted.
pub async fn download_packages<R: CommandRunner>(
    runner: &R,
    python: &OsStr,
    packages_dir: &Path,
    plan: &[DownloadRequest],
) -> Result<(), BundleError> {
    tracing::info!(
        "Downloading {} packages into {}",
        plan.len(),
        packages_dir.display()
    );

    for (i, request) in plan.iter().enumerate() {
        tracing::debug!(
            package = request.name(),
            "[{}/{}] {}",
            i + 1,
            plan.len(),
            request
        );
        runner
            .run(&request.to_command(python, packages_dir))
            .await?;
    }

    Ok(())
}
