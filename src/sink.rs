//! Queues between the host (producer) and the relay server (consumer).
//!
//! - Events travel over an unbounded FIFO channel. Producers never block; the
//!   relay drains it greedily on every tick.
//! - The config snapshot lives in a single-slot overwrite queue: publishing a new
//!   snapshot discards the previous one, and readers always see the newest.
//!
//! Both carry pre-serialized JSON so the relay never touches plot state.

use std::sync::Arc;

use tokio::sync::{mpsc, watch, Mutex};

use crate::data::snapshot::ConfigSnapshot;
use crate::events::PlotEvent;

/// Producer half, owned by the aggregator.
pub struct Outbox {
    events: mpsc::UnboundedSender<String>,
    config: watch::Sender<String>,
}

/// Consumer half, shared by every relay connection.
///
/// Cloning shares the same event queue: concurrent clients compete for events
/// and each event is delivered to whichever client drains it first.
#[derive(Clone)]
pub struct Inbox {
    events: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
    config: watch::Receiver<String>,
}

/// Create a connected `(Outbox, Inbox)` pair. The config slot starts empty.
pub fn channel() -> (Outbox, Inbox) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (config_tx, config_rx) = watch::channel(String::new());
    (
        Outbox {
            events: event_tx,
            config: config_tx,
        },
        Inbox {
            events: Arc::new(Mutex::new(event_rx)),
            config: config_rx,
        },
    )
}

impl Outbox {
    /// Queue an event. Delivery is best effort: a stopped relay is not an error.
    pub fn send_event(&self, event: &PlotEvent) {
        let json = match event.to_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("Failed to serialize {event} event: {err}");
                return;
            }
        };
        if self.events.send(json).is_err() {
            log::debug!("Relay is not running; dropped {event} event");
        }
    }

    /// Replace the config slot with a new snapshot.
    pub fn publish_config(&self, snapshot: &ConfigSnapshot) {
        match serde_json::to_string(snapshot) {
            Ok(json) => {
                self.config.send_replace(json);
            }
            Err(err) => log::error!("Failed to serialize config snapshot: {err}"),
        }
    }
}

impl Inbox {
    /// Take every pending event in arrival order. An empty queue yields an empty vec.
    pub async fn drain_events(&self) -> Vec<String> {
        let mut rx = self.events.lock().await;
        let mut drained = Vec::new();
        while let Ok(event) = rx.try_recv() {
            drained.push(event);
        }
        drained
    }

    /// The newest published snapshot (empty string before the first publish).
    pub fn latest_config(&self) -> String {
        self.config.borrow().clone()
    }
}
