use ansible_bundle_lib::cli::{ResolvedCommand, parse_args, resolve_command, run_build};
use ansible_bundle_lib::error::BundleError;
use ansible_bundle_lib::process::SystemCommandRunner;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), BundleError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.command)?;

    match command {
        ResolvedCommand::Build(params) => {
            let artifact = run_build(params, &SystemCommandRunner).await?;
            println!("Bundled Ansible installer is at: {}", artifact.display());
        }
    }

    Ok(())
}
