pub mod dir;
pub mod http;
pub mod source;

use std::sync::Arc;

pub use dir::DirSource;
pub use http::HttpSource;
pub use source::{FetchError, FragmentSource, fragment_path};

use crate::core::config::{ResolvedConfig, SiteLocation};

/// Build the fragment source named by the resolved config.
pub fn build_source(config: &ResolvedConfig) -> Arc<dyn FragmentSource> {
    match &config.site {
        SiteLocation::Remote(url) => Arc::new(HttpSource::new(url.clone(), &config.fragment_ext)),
        SiteLocation::Local(root) => Arc::new(DirSource::new(root.clone(), &config.fragment_ext)),
    }
}
