//! WebSocket transport: one connection is one session.
//!
//! On upgrade the server mints a session id and greets the client with a
//! `GET_SESSION` frame. A `GET` request starts the session's pipeline as its
//! own task; incremental `GET_POSTS` frames flow back through the delivery
//! registry. Teardown on disconnect aborts the in-flight pipeline (it is
//! abandoned, not awaited) and purges the session's report artifacts.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use chirp_client::ChirpClient;
use sentistream_common::{ClientRequest, SearchRequest, ServerEvent};
use sentistream_core::{CursorSource, ReportBuilder, SearchQuery, SessionPipeline, UpdateSink};

use crate::AppState;

pub async fn ws_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

async fn handle_socket(state: Arc<AppState>, socket: WebSocket) {
    let session_id = Uuid::new_v4().to_string();
    info!(session = %session_id, "Client connected");

    let (mut ws_tx, mut ws_rx) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerEvent>(64);
    state.delivery.register(&session_id, tx);

    // outbound pump: registry events become text frames
    let writer: JoinHandle<()> = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let frame = event.to_frame().to_string();
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    if let Err(err) = state
        .delivery
        .emit(
            &session_id,
            ServerEvent::SessionEstablished {
                session_id: session_id.clone(),
            },
        )
        .await
    {
        warn!(session = %session_id, error = %err, "Failed to greet client");
    }

    let mut pipeline_task: Option<JoinHandle<()>> = None;

    while let Some(msg) = ws_rx.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientRequest>(&text) {
                Ok(request) => {
                    // latest request wins the session
                    if let Some(task) = pipeline_task.take() {
                        task.abort();
                    }
                    pipeline_task =
                        Some(spawn_session(state.clone(), session_id.clone(), request.body));
                }
                Err(err) => {
                    warn!(session = %session_id, error = %err, "Ignoring malformed request");
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(err) => {
                warn!(session = %session_id, error = %err, "Socket error");
                break;
            }
        }
    }

    if let Some(task) = pipeline_task.take() {
        task.abort();
    }
    state.delivery.unregister(&session_id);
    writer.abort();

    if let Err(err) = state.reports.purge(&session_id).await {
        warn!(session = %session_id, error = %err, "Report purge failed");
    }
    info!(session = %session_id, "Client disconnected");
}

fn spawn_session(
    state: Arc<AppState>,
    session_id: String,
    request: SearchRequest,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let client = ChirpClient::new(state.config.chirp_api_token.clone());
        let query = SearchQuery {
            search_key: request.search_key.clone(),
            count: request.post_count,
            page_size: state.config.search_page_size,
            lang: state.config.search_lang.clone(),
            exclude_reposts: true,
        };
        let mut source = CursorSource::new(client, query);
        let pipeline = SessionPipeline::new(&session_id, &request.search_key, request.post_count);

        match pipeline
            .run(&mut source, state.classifier.as_ref(), state.delivery.as_ref())
            .await
        {
            Ok(outcome) => {
                if let Err(err) = state
                    .reports
                    .build(&session_id, &request.search_key, &outcome.posts)
                    .await
                {
                    warn!(session = %session_id, error = %err, "Report build failed");
                }
            }
            Err(err) => {
                error!(session = %session_id, error = %err, "Session failed");
            }
        }
    })
}
