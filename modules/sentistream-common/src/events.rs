//! Wire protocol for the duplex client channel.
//!
//! Every frame is an envelope: `{ "header": { "type": ... }, "body": { ... } }`.
//! Inbound the only request type is `GET`; outbound the core emits
//! `GET_SESSION` once on connect and one `GET_POSTS` per scored item.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::types::{PolarityTotals, ScoredPost};

/// Inbound request frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRequest {
    pub header: RequestHeader,
    pub body: SearchRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestHeader {
    #[serde(rename = "type")]
    pub kind: RequestKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    #[serde(rename = "GET")]
    Get,
}

/// Body of a `GET` request: start streaming scored posts for a search term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub search_key: String,
    pub post_count: u32,
}

/// Outbound event, addressed to one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerEvent {
    /// Sent once, immediately after the connection is established.
    SessionEstablished { session_id: String },
    /// One scored item plus the totals snapshot taken after aggregation.
    PostUpdate {
        post: ScoredPost,
        total_polarity: PolarityTotals,
    },
}

impl ServerEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::SessionEstablished { .. } => "GET_SESSION",
            ServerEvent::PostUpdate { .. } => "GET_POSTS",
        }
    }

    /// Render the envelope frame sent on the wire.
    pub fn to_frame(&self) -> serde_json::Value {
        let body = match self {
            ServerEvent::SessionEstablished { session_id } => json!({
                "session_id": session_id,
            }),
            ServerEvent::PostUpdate {
                post,
                total_polarity,
            } => json!({
                "post": post,
                "total_polarity": total_polarity,
            }),
        };
        json!({
            "header": { "type": self.kind() },
            "body": body,
        })
    }
}
