//! Built-in package set for the offline installer.

use super::Platform;

pub const TOOL_PACKAGE: &str = "ansible";

/// `(name, version, binary)` in download order.
pub const PACKAGE_DEPS: &[(&str, &str, bool)] = &[
    ("appdirs", "1.4.4", false),
    ("cffi", "1.14.0", true),
    ("cryptography", "2.9.2", true),
    ("distlib", "0.3.1", false),
    ("filelock", "3.0.12", false),
    ("Jinja2", "2.11.2", false),
    ("MarkupSafe", "1.1.1", false),
    ("pycparser", "2.20", false),
    ("PyYAML", "5.3.1", false),
    ("six", "1.15.0", false),
    ("virtualenv", "16.7.10", false),
    ("enum34", "1.1.10", false),
    ("ipaddress", "1.0.23", false),
    ("wheel", "0.34.2", false),
];

pub const PYTHON_VERSIONS: &[&str] = &["2.7", "3.5", "3.6", "3.7", "3.8"];

pub fn platform_tags(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::LinuxX86_64 => &["manylinux1_x86_64", "manylinux2010_x86_64"],
        Platform::MacosxX86_64 => &["macosx_10_10_x86_64"],
    }
}
