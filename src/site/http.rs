//! Fragments served over HTTP(S), e.g. the deployed site itself.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::core::lang::Lang;
use crate::core::page::Page;
use crate::site::source::{FetchError, FragmentSource, fragment_path};

pub struct HttpSource {
    base_url: String,
    ext: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: String, ext: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ext: ext.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url_for(&self, lang: Lang, page: Page) -> String {
        format!("{}/{}", self.base_url, fragment_path(lang, page, &self.ext))
    }
}

#[async_trait]
impl FragmentSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, lang: Lang, page: Page) -> Result<String, FetchError> {
        let url = self.url_for(lang, page);
        info!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("Fragment response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("Fragment request failed: {} - {}", status, url);
            return Err(FetchError::Status { status, url });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_fragment_path() {
        let source = HttpSource::new("https://me.dev/pages/".to_string(), "md");
        assert_eq!(
            source.url_for(Lang::En, Page::Skills),
            "https://me.dev/pages/en/skills.md"
        );
    }
}
