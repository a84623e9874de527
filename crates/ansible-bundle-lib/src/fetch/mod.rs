mod fetcher;
mod plan;

pub use fetcher::download_packages;
pub use plan::{DownloadRequest, plan_downloads};
