use std::fmt;

use async_trait::async_trait;

use crate::core::lang::Lang;
use crate::core::page::Page;

/// Why a fragment could not be produced. Every variant means the same thing
/// to the navigator ("unavailable"); they only differ in what gets logged.
#[derive(Debug)]
pub enum FetchError {
    /// Transport failure (DNS, connection refused, reset).
    Network(String),
    /// Server answered with a non-success status.
    Status { status: u16, url: String },
    /// Local read failed (missing file, permissions, invalid UTF-8).
    Io(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Status { status, url } => write!(f, "HTTP {status} for {url}"),
            FetchError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Relative location of a fragment: `<lang-folder>/<page>.<ext>`.
pub fn fragment_path(lang: Lang, page: Page, ext: &str) -> String {
    format!("{}/{}.{}", lang.folder(), page.slug(), ext)
}

#[async_trait]
pub trait FragmentSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Fetch the raw text of `page` in `lang`.
    async fn fetch(&self, lang: Lang, page: Page) -> Result<String, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_combines_folder_page_and_extension() {
        assert_eq!(fragment_path(Lang::En, Page::Resume, "md"), "en/resume.md");
        assert_eq!(fragment_path(Lang::Fr, Page::Home, "html"), "fr/home.html");
    }

    #[test]
    fn errors_describe_themselves() {
        let err = FetchError::Status {
            status: 404,
            url: "http://x/fr/home.md".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404 for http://x/fr/home.md");
        assert_eq!(
            FetchError::Network("refused".to_string()).to_string(),
            "network error: refused"
        );
    }
}
