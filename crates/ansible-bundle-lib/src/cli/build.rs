use crate::bootstrap::copy_bootstrap_script;
use crate::cli::BuildParams;
use crate::error::BundleError;
use crate::fetch::{download_packages, plan_downloads};
use crate::process::CommandRunner;
use crate::scratch::create_scratch_dir;
use std::path::PathBuf;

/// Builds the installer bundle and returns the path of the archive.
///
/// Phases run strictly in order: scratch directory, downloads, bootstrap
/// script, archive. Any error aborts the build and leaves the scratch
/// directory as it was at the point of failure.
pub async fn run_build<R: CommandRunner>(
    params: BuildParams,
    runner: &R,
) -> Result<PathBuf, BundleError> {
    let BuildParams {
        tool_version,
        platform,
        manifest,
        format,
        cleanup,
        python,
        source_dir,
        build_dir,
    } = params;

    let plan = plan_downloads(&manifest, &tool_version, platform)?;

    let scratch = create_scratch_dir(&build_dir).await?;
    tracing::info!("Bundle dir at: {}", scratch.root.display());

    download_packages(runner, &python, &scratch.packages, &plan).await?;

    copy_bootstrap_script(&source_dir, &scratch.root).await?;

    let artifact_name = format.artifact_name(&tool_version, platform);
    tracing::info!("Packaging bundle as {}", artifact_name);
    let archiver = format.archiver();
    let artifact = tokio::task::spawn_blocking(move || {
        archiver.create(&scratch.root, &artifact_name, cleanup)
    })
    .await??;

    Ok(artifact)
}
