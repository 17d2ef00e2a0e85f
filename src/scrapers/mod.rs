//! Blog scraping: HTTP access, listing discovery and post extraction.
//!
//! Scraping follows a two-phase pattern:
//!
//! 1. **Indexing**: Discover post URLs from the listing page ([`listing`])
//! 2. **Fetching**: Download each post and extract its content ([`article`])
//!
//! Both phases talk to the network only through [`client::FetchPage`], so the
//! production [`client::RetryFetch`]`<`[`client::HttpFetcher`]`>` can be
//! swapped for an in-memory page map in tests.

pub mod article;
pub mod client;
pub mod listing;

#[cfg(test)]
pub(crate) mod testing {
    use super::client::{FetchError, FetchPage};
    use reqwest::StatusCode;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves fixed bodies by URL; unknown URLs answer 404. Records every request.
    #[derive(Debug, Default)]
    pub struct StaticPages {
        pages: HashMap<String, String>,
        pub requests: RefCell<Vec<String>>,
    }

    impl StaticPages {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }
    }

    impl FetchPage for StaticPages {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requests.borrow_mut().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::from_status(StatusCode::NOT_FOUND))
        }
    }
}
