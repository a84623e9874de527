use super::BundleManifest;
use crate::error::BundleError;
use config::Config as ConfigBuilder;

pub fn load_manifest(config_path: Option<&str>) -> Result<BundleManifest, BundleError> {
    let manifest = match config_path {
        Some(config_path) => {
            tracing::info!("Loading manifest overrides from {}", config_path);
            let config_builder = ConfigBuilder::builder()
                .add_source(config::File::with_name(config_path))
                .build()?;
            config_builder.try_deserialize::<BundleManifest>()?
        }
        None => BundleManifest::default(),
    };

    manifest.validate()?;
    Ok(manifest)
}
