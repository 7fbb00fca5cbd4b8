use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Gomoku Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::rooms::create_room,
        crate::routes::rooms::list_rooms,
        crate::routes::rooms::get_room,
        crate::routes::rooms::join_room,
        crate::routes::rooms::mark_ready,
        crate::routes::rooms::leave_room,
        crate::routes::play::submit_move,
        crate::routes::play::surrender,
        crate::routes::rematch::request_rematch,
        crate::routes::rematch::accept_rematch,
        crate::routes::sse::event_stream,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::rooms::CreateRoomRequest,
            crate::dto::rooms::CreatedRoom,
            crate::dto::rooms::JoinRoomRequest,
            crate::dto::rooms::MoveRequest,
            crate::dto::rooms::MoveApplied,
            crate::dto::rooms::RoomSummary,
            crate::dto::rooms::SeatSummary,
            crate::dao::models::RoomVisibility,
            crate::dao::models::RoomStatus,
            crate::dao::models::RoomPhase,
            crate::dao::models::RematchState,
            crate::dao::models::ReadyState,
            crate::dao::models::SeatResult,
            crate::dao::models::MatchResult,
            crate::dao::models::EndReason,
            crate::engine::Stone,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rooms", description = "Room lifecycle operations"),
        (name = "play", description = "Move submission and surrender"),
        (name = "rematch", description = "Rematch handshake"),
        (name = "sse", description = "Server-sent events stream"),
    )
)]
pub struct ApiDoc;
