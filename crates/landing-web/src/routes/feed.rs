//! Live feed routes.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use exchange_core::FeedEvent;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, warn};

use crate::state::AppState;

/// Current feed, newest first.
pub async fn feed_api(State(state): State<AppState>) -> Json<Vec<FeedEvent>> {
    Json(state.feed.snapshot().await)
}

/// Stream new feed events as server-sent events named `feed`.
///
/// The stream ends when the client disconnects, which drops its subscription.
pub async fn feed_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Feed stream subscriber connected");
    sse_response(feed_updates(state.feed.subscribe()))
}

/// Events from a hub subscription. A subscriber that falls behind skips
/// what it missed and keeps receiving.
pub fn feed_updates(rx: broadcast::Receiver<FeedEvent>) -> impl Stream<Item = FeedEvent> {
    BroadcastStream::new(rx).filter_map(|message| match message {
        Ok(event) => Some(event),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            warn!(skipped, "Feed stream subscriber lagged");
            None
        }
    })
}

/// Wrap feed events as an SSE response with keep-alive comments.
pub fn sse_response<S>(updates: S) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    S: Stream<Item = FeedEvent> + Send + 'static,
{
    let events = updates.filter_map(|event| to_sse(&event).map(Ok));
    Sse::new(events).keep_alive(KeepAlive::default())
}

fn to_sse(event: &FeedEvent) -> Option<Event> {
    match Event::default().event("feed").json_data(event) {
        Ok(sse) => Some(sse),
        Err(err) => {
            warn!(error = %err, "Failed to encode feed event");
            None
        }
    }
}
