pub mod archive;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod process;
pub mod scratch;

#[cfg(test)]
mod test_support;

pub use config::BundleManifest;
pub use error::BundleError;
