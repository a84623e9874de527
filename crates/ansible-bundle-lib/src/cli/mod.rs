mod args;
mod build;
mod params;
mod resolved_command;

pub use args::{Args, Command, parse_args, try_parse_args_from};
pub use build::run_build;
pub use params::BuildParams;
pub use resolved_command::{BUILD_DIRNAME, ResolvedCommand, resolve_command};
