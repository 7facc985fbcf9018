pub mod error;
pub mod types;

pub use error::{ChirpError, Result};
pub use types::{ChirpPost, ChirpUser, SearchPage, SearchParams};

const BASE_URL: &str = "https://api.chirp.social/v1";

pub struct ChirpClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl ChirpClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (test servers).
    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url,
        }
    }

    /// Fetch one page of post search results. Follow `next_cursor` from the
    /// returned page to paginate; a missing cursor means the result set is
    /// exhausted.
    pub async fn search_posts(&self, params: &SearchParams) -> Result<SearchPage> {
        let url = format!("{}/posts/search", self.base_url);
        tracing::debug!(query = %params.query, cursor = ?params.cursor, "Searching posts");

        let mut req = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[
                ("query", params.query.as_str()),
                ("lang", params.lang.as_str()),
            ])
            .query(&[("count", params.count)])
            .query(&[("excludeReposts", params.exclude_reposts)]);
        if let Some(cursor) = &params.cursor {
            req = req.query(&[("cursor", cursor.as_str())]);
        }

        let resp = req.send().await?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(ChirpError::RateLimited);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChirpError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let page: SearchPage = resp.json().await?;
        tracing::debug!(
            count = page.posts.len(),
            has_next = page.next_cursor.is_some(),
            "Fetched search page"
        );
        Ok(page)
    }
}
