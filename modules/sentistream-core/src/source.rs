//! Adapts the page-at-a-time provider client into the strictly sequential
//! per-item cursor the pipeline consumes.

use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::Local;

use chirp_client::{ChirpClient, ChirpError, ChirpPost, SearchParams};
use sentistream_common::{FetchedPost, SentiStreamError};

use crate::traits::PostSource;

/// How a session's search request is shaped into provider queries.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub search_key: String,
    /// Result-count cap for the whole session.
    pub count: u32,
    pub page_size: u32,
    pub lang: String,
    pub exclude_reposts: bool,
}

pub struct CursorSource {
    client: ChirpClient,
    query: SearchQuery,
    buffer: VecDeque<FetchedPost>,
    cursor: Option<String>,
    yielded: u32,
    no_more_pages: bool,
}

impl CursorSource {
    pub fn new(client: ChirpClient, query: SearchQuery) -> Self {
        Self {
            client,
            query,
            buffer: VecDeque::new(),
            cursor: None,
            yielded: 0,
            no_more_pages: false,
        }
    }

    async fn refill(&mut self) -> Result<(), SentiStreamError> {
        let params = SearchParams {
            query: hashtag_query(&self.query.search_key),
            lang: self.query.lang.clone(),
            count: self.query.page_size,
            exclude_reposts: self.query.exclude_reposts,
            cursor: self.cursor.take(),
        };

        let page = self.client.search_posts(&params).await.map_err(map_err)?;
        if page.posts.is_empty() || page.next_cursor.is_none() {
            self.no_more_pages = true;
        }
        self.cursor = page.next_cursor;
        self.buffer.extend(page.posts.into_iter().filter_map(into_fetched));
        Ok(())
    }
}

#[async_trait]
impl PostSource for CursorSource {
    async fn next(&mut self) -> Result<Option<FetchedPost>, SentiStreamError> {
        if self.yielded >= self.query.count {
            return Ok(None);
        }
        while self.buffer.is_empty() && !self.no_more_pages {
            self.refill().await?;
        }
        match self.buffer.pop_front() {
            Some(post) => {
                self.yielded += 1;
                Ok(Some(post))
            }
            None => Ok(None),
        }
    }
}

/// Search terms are hashtag searches; prefix `#` unless the client already
/// sent one.
fn hashtag_query(search_key: &str) -> String {
    if search_key.starts_with('#') {
        search_key.to_string()
    } else {
        format!("#{search_key}")
    }
}

fn map_err(err: ChirpError) -> SentiStreamError {
    match err {
        ChirpError::RateLimited => SentiStreamError::RateLimited,
        other => SentiStreamError::Provider(other.to_string()),
    }
}

/// Normalize one provider post. Records missing an id, body, author handle
/// or timestamp are skipped.
fn into_fetched(post: ChirpPost) -> Option<FetchedPost> {
    let text = post.content()?.to_string();
    let id = post.id?;
    let posted_at = post.created_at?.with_timezone(&Local);
    let author = post.author?;
    let handle = author.user_name?;

    Some(FetchedPost {
        permalink: format!("https://chirp.social/{handle}/status/{id}"),
        source_id: id,
        author_handle: handle,
        author_name: author.name.unwrap_or_default(),
        posted_at,
        location: author.location.unwrap_or_default(),
        like_count: post.like_count.unwrap_or(0),
        repost_count: post.repost_count.unwrap_or(0),
        followers_count: author.followers_count.unwrap_or(0),
        following_count: author.following_count.unwrap_or(0),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_client::ChirpUser;
    use chrono::{TimeZone, Utc};

    fn provider_post() -> ChirpPost {
        ChirpPost {
            id: Some("42".to_string()),
            text: None,
            full_text: Some("launch day #rustlang".to_string()),
            created_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap()),
            author: Some(ChirpUser {
                user_name: Some("jdoe".to_string()),
                name: Some("Jane Doe".to_string()),
                location: Some("Minneapolis, MN".to_string()),
                followers_count: Some(320),
                following_count: Some(185),
            }),
            like_count: Some(14),
            repost_count: Some(3),
            reply_count: Some(1),
        }
    }

    #[test]
    fn converts_complete_post() {
        let fetched = into_fetched(provider_post()).unwrap();
        assert_eq!(fetched.source_id, "42");
        assert_eq!(fetched.author_handle, "jdoe");
        assert_eq!(fetched.permalink, "https://chirp.social/jdoe/status/42");
        assert_eq!(fetched.like_count, 14);
        assert_eq!(fetched.text, "launch day #rustlang");
    }

    #[test]
    fn skips_post_without_author() {
        let mut post = provider_post();
        post.author = None;
        assert!(into_fetched(post).is_none());
    }

    #[test]
    fn skips_post_without_timestamp() {
        let mut post = provider_post();
        post.created_at = None;
        assert!(into_fetched(post).is_none());
    }

    #[test]
    fn missing_counts_default_to_zero() {
        let mut post = provider_post();
        post.like_count = None;
        post.repost_count = None;
        let fetched = into_fetched(post).unwrap();
        assert_eq!(fetched.like_count, 0);
        assert_eq!(fetched.repost_count, 0);
    }

    #[test]
    fn hashtag_prefix_added_once() {
        assert_eq!(hashtag_query("test"), "#test");
        assert_eq!(hashtag_query("#test"), "#test");
    }
}
