#[cfg(unix)]
mod test_utils;

#[cfg(unix)]
pub use test_utils::*;
