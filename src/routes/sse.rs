use std::convert::Infallible;

use axum::{
    Router,
    extract::{Query, State},
    response::sse::Sse,
    routing::get,
};
use futures::Stream;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{services::sse_service, state::SharedState};

#[derive(Debug, Default, Deserialize)]
/// Optional filter narrowing the stream to one room's events.
pub struct StreamQuery {
    room_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/sse/events",
    tag = "sse",
    params(("room_id" = Option<Uuid>, Query, description = "Restrict the stream to one room")),
    responses((status = 200, description = "Room event stream", content_type = "text/event-stream", body = String))
)]
/// Stream realtime room events to connected clients.
pub async fn event_stream(
    State(state): State<SharedState>,
    Query(query): Query<StreamQuery>,
) -> Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>> {
    let receiver = sse_service::subscribe(&state);
    info!(room_id = ?query.room_id, "new SSE connection");
    sse_service::to_sse_stream(receiver, query.room_id)
}

/// Configure the SSE endpoint.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/sse/events", get(event_stream))
}
