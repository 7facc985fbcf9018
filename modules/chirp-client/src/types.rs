use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query parameters for the post search endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SearchParams {
    pub query: String,
    pub lang: String,
    pub count: u32,
    #[serde(rename = "excludeReposts")]
    pub exclude_reposts: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// One page of search results. `next_cursor` is absent on the last page.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    pub posts: Vec<ChirpPost>,
    #[serde(rename = "nextCursor")]
    pub next_cursor: Option<String>,
}

/// Author info nested inside a post.
#[derive(Debug, Clone, Deserialize)]
pub struct ChirpUser {
    #[serde(rename = "userName")]
    pub user_name: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "followersCount")]
    pub followers_count: Option<i64>,
    #[serde(rename = "followingCount")]
    pub following_count: Option<i64>,
}

/// A single post from the search dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct ChirpPost {
    pub id: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "fullText")]
    pub full_text: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    pub author: Option<ChirpUser>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<i64>,
    #[serde(rename = "repostCount")]
    pub repost_count: Option<i64>,
    #[serde(rename = "replyCount")]
    pub reply_count: Option<i64>,
}

impl ChirpPost {
    /// Returns whichever text field is populated, preferring `full_text`.
    pub fn content(&self) -> Option<&str> {
        self.full_text.as_deref().or(self.text.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_page_deserializes_provider_json() {
        let json = r#"{
            "posts": [{
                "id": "9001",
                "fullText": "big announcement today",
                "createdAt": "2024-05-01T12:00:00Z",
                "author": {
                    "userName": "jdoe",
                    "name": "Jane Doe",
                    "location": "Minneapolis, MN",
                    "followersCount": 320,
                    "followingCount": 185
                },
                "likeCount": 14,
                "repostCount": 3,
                "replyCount": 1
            }],
            "nextCursor": "abc123"
        }"#;

        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.next_cursor.as_deref(), Some("abc123"));

        let post = &page.posts[0];
        assert_eq!(post.content(), Some("big announcement today"));
        assert_eq!(post.like_count, Some(14));
        assert_eq!(
            post.author.as_ref().unwrap().user_name.as_deref(),
            Some("jdoe")
        );
    }

    #[test]
    fn last_page_has_no_cursor() {
        let json = r#"{ "posts": [] }"#;
        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert!(page.posts.is_empty());
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn content_falls_back_to_text() {
        let json = r#"{ "posts": [{ "id": "1", "text": "short body" }] }"#;
        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.posts[0].content(), Some("short body"));
    }
}
