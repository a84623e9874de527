use itertools::Itertools;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};

/// A program and its discrete arguments. Never passed through a shell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommandLine {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl CommandLine {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl Display for CommandLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            std::iter::once(&self.program)
                .chain(self.args.iter())
                .map(|part| part.to_string_lossy())
                .join(" ")
        )
    }
}
