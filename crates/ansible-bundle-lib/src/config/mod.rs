pub mod defaults;
mod loader;
mod model;
mod platform;

pub use loader::load_manifest;
pub use model::{BundleManifest, DependencyEntry};
pub use platform::Platform;
