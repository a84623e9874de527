mod command_line;
mod runner;

pub use command_line::CommandLine;
pub use runner::{CommandRunner, SystemCommandRunner};
