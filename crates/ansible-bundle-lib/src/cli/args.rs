use crate::archive::ArchiveFormat;
use crate::config::Platform;
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use tracing::Level;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Build {
        tool_version: String,
        platform: Platform,
        format: ArchiveFormat,
        cleanup: bool,
        python: OsString,
        source_dir: String,
        build_dir: Option<String>,
        config_path: Option<String>,
    },
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "ansible-bundle",
    version,
    about = "Build a self-contained Ansible installer that needs no network access to install"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count
    )]
    verbose: u8,

    #[arg(value_name = "ANSIBLE_VERSION", help = "Ansible version to bundle")]
    tool_version: String,

    #[arg(
        long = "platform",
        value_name = "PLATFORM",
        help = "Platform for binary packages",
        value_enum,
        default_value_t = Platform::LinuxX86_64
    )]
    platform: Platform,

    #[arg(
        long = "format",
        value_name = "FORMAT",
        help = "Archive format of the bundle",
        value_enum,
        default_value_t = ArchiveFormat::Tgz
    )]
    format: ArchiveFormat,

    #[arg(
        long = "no-cleanup",
        help = "Keep the staging directory after the archive is written"
    )]
    no_cleanup: bool,

    #[arg(
        long = "python",
        value_name = "PROGRAM",
        help = "Python interpreter used to run pip",
        default_value = "python3"
    )]
    python: OsString,

    #[arg(
        long = "source-dir",
        value_name = "DIR",
        help = "Directory containing the bootstrap install script",
        default_value = "."
    )]
    source_dir: String,

    #[arg(
        long = "build-dir",
        value_name = "DIR",
        help = "Build directory (default: <source-dir>/build)"
    )]
    build_dir: Option<String>,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Optional manifest file overriding the built-in package set"
    )]
    config: Option<String>,
}

impl From<Cli> for Command {
    fn from(cli: Cli) -> Self {
        Command::Build {
            tool_version: cli.tool_version,
            platform: cli.platform,
            format: cli.format,
            cleanup: !cli.no_cleanup,
            python: cli.python,
            source_dir: cli.source_dir,
            build_dir: cli.build_dir,
            config_path: cli.config,
        }
    }
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Parses `argv` without touching global state. Useful for embedding and tests.
pub fn try_parse_args_from<I, T>(argv: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(argv)?;
    Ok(Args {
        log_level: log_level(cli.verbose),
        command: cli.into(),
    })
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();
    let log_level = log_level(cli.verbose);

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    Args {
        command: cli.into(),
        log_level,
    }
}
