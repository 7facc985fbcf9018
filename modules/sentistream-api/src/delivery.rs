//! Session-addressed delivery: one outbound channel per live connection.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use sentistream_common::{SentiStreamError, ServerEvent};
use sentistream_core::UpdateSink;

/// Registry of live sessions and their outbound channels. Channels are
/// registered on connect and dropped on disconnect; an emit to a gone
/// session is a delivery error, which stops its pipeline.
#[derive(Default)]
pub struct Delivery {
    channels: Mutex<HashMap<String, mpsc::Sender<ServerEvent>>>,
}

impl Delivery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, session_id: &str, tx: mpsc::Sender<ServerEvent>) {
        self.channels
            .lock()
            .unwrap()
            .insert(session_id.to_string(), tx);
    }

    pub fn unregister(&self, session_id: &str) {
        self.channels.lock().unwrap().remove(session_id);
    }
}

#[async_trait]
impl UpdateSink for Delivery {
    async fn emit(&self, session_id: &str, event: ServerEvent) -> Result<(), SentiStreamError> {
        let tx = self
            .channels
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .ok_or_else(|| SentiStreamError::Delivery(format!("unknown session {session_id}")))?;

        tx.send(event)
            .await
            .map_err(|_| SentiStreamError::Delivery("connection closed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emit_reaches_the_registered_session() {
        let delivery = Delivery::new();
        let (tx, mut rx) = mpsc::channel(4);
        delivery.register("s1", tx);

        delivery
            .emit(
                "s1",
                ServerEvent::SessionEstablished {
                    session_id: "s1".to_string(),
                },
            )
            .await
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind(), "GET_SESSION");
    }

    #[tokio::test]
    async fn emit_to_unknown_session_fails() {
        let delivery = Delivery::new();
        let result = delivery
            .emit(
                "ghost",
                ServerEvent::SessionEstablished {
                    session_id: "ghost".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(SentiStreamError::Delivery(_))));
    }

    #[tokio::test]
    async fn emit_after_unregister_fails() {
        let delivery = Delivery::new();
        let (tx, _rx) = mpsc::channel(4);
        delivery.register("s1", tx);
        delivery.unregister("s1");

        let result = delivery
            .emit(
                "s1",
                ServerEvent::SessionEstablished {
                    session_id: "s1".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(SentiStreamError::Delivery(_))));
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let delivery = Delivery::new();
        let (tx1, mut rx1) = mpsc::channel(4);
        let (tx2, mut rx2) = mpsc::channel(4);
        delivery.register("s1", tx1);
        delivery.register("s2", tx2);

        delivery
            .emit(
                "s2",
                ServerEvent::SessionEstablished {
                    session_id: "s2".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(rx1.try_recv().is_err());
        assert!(rx2.try_recv().is_ok());
    }
}
