//! Relay server: serves the plot page, the config snapshot and the event stream.
//!
//! Runs on its own thread with a private tokio runtime so the host API stays
//! synchronous. Routes:
//!
//! - `GET /`        → bundled index page
//! - `GET /main.js` → bundled page script
//! - `GET /config`  → latest config snapshot as JSON text
//! - `GET /event`   → server-sent events; see [`crate::events`]
//! - anything else  → `static_dir` if configured

use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use axum::extract::State;
use axum::http::header;
use axum::response::sse::{Event, Sse};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use futures_core::Stream;
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;
use tower_http::services::ServeDir;

use crate::config::PencilConfig;
use crate::error::PencilError;
use crate::events::HEARTBEAT;
use crate::sink::Inbox;

const INDEX_HTML: &str = include_str!("../static/index.html");
const MAIN_JS: &str = include_str!("../static/main.js");

#[derive(Clone)]
struct RelayState {
    inbox: Inbox,
    tick: Duration,
}

/// Handle to a running relay. Dropping it stops the server.
#[must_use = "Dropping this means stopping the server"]
pub struct RelayServer {
    local_addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    thread_handle: Option<std::thread::JoinHandle<()>>,
}

impl RelayServer {
    /// Bind the listener and start serving on a background thread.
    ///
    /// Bind failures are reported here rather than on the background thread.
    pub fn start(config: &PencilConfig, inbox: Inbox) -> Result<Self, PencilError> {
        config.validate()?;
        let tick = config.tick_period()?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("pncl-relay-worker")
            .enable_all()
            .build()
            .map_err(PencilError::Runtime)?;

        let addr = config.bind_addr();
        let bind_err = |source| PencilError::Bind {
            addr: addr.clone(),
            source,
        };
        let listener = runtime
            .block_on(tokio::net::TcpListener::bind(&addr))
            .map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;

        let app = router(
            RelayState {
                inbox,
                tick,
            },
            config.static_dir.as_deref(),
        );
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let thread_handle = std::thread::Builder::new()
            .name("pncl-relay".to_owned())
            .spawn(move || {
                runtime.block_on(async move {
                    let server = async move { axum::serve(listener, app).await };
                    tokio::select! {
                        res = server => {
                            if let Err(err) = res {
                                log::error!("Relay server failed: {err}");
                            }
                        }
                        _ = shutdown_rx => {}
                    }
                });
                // Aborts open event streams.
                runtime.shutdown_background();
            })
            .map_err(PencilError::Runtime)?;

        log::info!("pncl relay listening on http://{local_addr}");
        Ok(Self {
            local_addr,
            shutdown: Some(shutdown_tx),
            thread_handle: Some(thread_handle),
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop serving and wait for the relay thread to exit.
    pub fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            log::info!("Shutting down pncl relay");
            shutdown.send(()).ok();
        }
        if let Some(thread_handle) = self.thread_handle.take() {
            thread_handle.join().ok();
        }
    }

    /// Block the calling thread for as long as the relay is serving.
    pub fn block(&mut self) {
        if let Some(thread_handle) = self.thread_handle.take() {
            thread_handle.join().ok();
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for RelayServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn router(state: RelayState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/", get(index))
        .route("/main.js", get(main_js))
        .route("/config", get(config))
        .route("/event", get(event_stream))
        .with_state(state);
    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn main_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript")], MAIN_JS)
}

async fn config(State(state): State<RelayState>) -> String {
    state.inbox.latest_config()
}

/// Logs when a client's stream is dropped.
struct ClientGuard;

impl Drop for ClientGuard {
    fn drop(&mut self) {
        log::debug!("Event stream client disconnected");
    }
}

async fn event_stream(
    State(state): State<RelayState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    log::debug!("Event stream client connected");
    let RelayState { inbox, tick } = state;

    let stream = async_stream::stream! {
        let _guard = ClientGuard;
        let mut ticker = tokio::time::interval(tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            for message in inbox.drain_events().await {
                yield Ok(Event::default().data(message));
            }
            yield Ok(Event::default().data(HEARTBEAT));
        }
    };
    Sse::new(stream)
}
