use super::CommandLine;
use crate::error::BundleError;
use std::future::Future;

/// Executes external commands on behalf of the bundle pipeline.
///
/// Implementations must run the command to completion before returning and
/// treat a non-zero exit as [`BundleError::CommandFailed`].
pub trait CommandRunner {
    /// Runs `cmd` and returns its combined output (stderr, then stdout).
    fn run(&self, cmd: &CommandLine) -> impl Future<Output = Result<String, BundleError>>;
}

/// Runs commands as real child processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    async fn run(&self, cmd: &CommandLine) -> Result<String, BundleError> {
        let command = cmd.to_string();
        tracing::info!("Running command: {}", command);

        let output = tokio::process::Command::new(&cmd.program)
            .args(&cmd.args)
            .output()
            .await
            .map_err(|source| BundleError::CommandSpawn {
                command: command.clone(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stderr).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stdout));

        if !output.status.success() {
            return Err(BundleError::CommandFailed {
                status: output.status,
                command,
                output: combined,
            });
        }

        tracing::debug!(command = %command, "Command output:\n{}", combined);
        Ok(combined)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_command_returns_combined_output() {
        let cmd = CommandLine::new("sh").args(["-c", "echo out; echo err 1>&2"]);

        let output = SystemCommandRunner.run(&cmd).await.expect("command should succeed");

        assert_eq!(output, "err\nout\n");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_fatal() {
        let cmd = CommandLine::new("sh").args(["-c", "echo broken 1>&2; exit 3"]);

        let err = SystemCommandRunner.run(&cmd).await.expect_err("command should fail");

        match err {
            BundleError::CommandFailed {
                status,
                command,
                output,
            } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(command, "sh -c echo broken 1>&2; exit 3");
                assert_eq!(output, "broken\n");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_command_is_logged_before_it_runs() {
        let (logs, _guard) = crate::test_support::capture_logs();
        let cmd = CommandLine::new("sh").args(["-c", "exit 4"]);

        SystemCommandRunner.run(&cmd).await.expect_err("command should fail");

        assert!(logs.contents().contains("Running command: sh -c exit 4"));
    }

    #[tokio::test]
    async fn test_unspawnable_command_is_still_logged() {
        let (logs, _guard) = crate::test_support::capture_logs();
        let cmd = CommandLine::new("ansible-bundle-no-such-program").arg("--version");

        SystemCommandRunner.run(&cmd).await.expect_err("spawn should fail");

        assert!(
            logs.contents()
                .contains("Running command: ansible-bundle-no-such-program --version")
        );
    }

    #[tokio::test]
    async fn test_missing_program_reports_spawn_failure() {
        let cmd = CommandLine::new("ansible-bundle-no-such-program");

        let err = SystemCommandRunner.run(&cmd).await.expect_err("spawn should fail");

        assert!(matches!(err, BundleError::CommandSpawn { .. }));
    }
}
