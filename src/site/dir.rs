//! Fragments read from a local directory tree (`<root>/fr/home.md`, …).

use std::path::PathBuf;

use async_trait::async_trait;
use log::{debug, warn};

use crate::core::lang::Lang;
use crate::core::page::Page;
use crate::site::source::{FetchError, FragmentSource, fragment_path};

pub struct DirSource {
    root: PathBuf,
    ext: String,
}

impl DirSource {
    pub fn new(root: PathBuf, ext: &str) -> Self {
        Self {
            root,
            ext: ext.to_string(),
        }
    }

    pub fn path_for(&self, lang: Lang, page: Page) -> PathBuf {
        self.root.join(fragment_path(lang, page, &self.ext))
    }
}

#[async_trait]
impl FragmentSource for DirSource {
    fn name(&self) -> &str {
        "dir"
    }

    async fn fetch(&self, lang: Lang, page: Page) -> Result<String, FetchError> {
        let path = self.path_for(lang, page);
        debug!("Reading {}", path.display());
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            warn!("Failed to read {}: {}", path.display(), e);
            FetchError::Io(format!("{}: {e}", path.display()))
        })
    }
}
