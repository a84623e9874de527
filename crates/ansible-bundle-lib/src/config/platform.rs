use clap::ValueEnum;
use std::fmt::{Display, Formatter};

/// Logical target platform selected on the command line.
#[derive(Clone, Copy, Debug, Default, Hash, Ord, PartialOrd, Eq, PartialEq, ValueEnum)]
pub enum Platform {
    #[default]
    #[value(name = "linux_x86_64")]
    LinuxX86_64,
    #[value(name = "macosx_x86_64")]
    MacosxX86_64,
}

/// Python line whose Linux wheels are split across two ABI tags.
const LEGACY_PYTHON_VERSION: &str = "2.7";
const LEGACY_LINUX_ABIS: &[&str] = &["cp27m", "cp27mu"];

impl Platform {
    pub fn key(self) -> &'static str {
        match self {
            Platform::LinuxX86_64 => "linux_x86_64",
            Platform::MacosxX86_64 => "macosx_x86_64",
        }
    }

    pub fn all() -> [Platform; 2] {
        [Platform::LinuxX86_64, Platform::MacosxX86_64]
    }

    pub fn from_key(key: &str) -> Option<Platform> {
        Platform::all().into_iter().find(|platform| platform.key() == key)
    }

    /// ABI tags that each need their own binary download for `python_version`.
    ///
    /// A single `--platform/--python-version` request cannot tell the narrow
    /// and wide unicode builds of CPython 2.7 apart on Linux, so that one
    /// combination is fetched once per ABI. Every other combination returns an
    /// empty slice and is fetched with a single request.
    pub fn legacy_abis(self, python_version: &str) -> &'static [&'static str] {
        if self == Platform::LinuxX86_64 && python_version == LEGACY_PYTHON_VERSION {
            LEGACY_LINUX_ABIS
        } else {
            &[]
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
