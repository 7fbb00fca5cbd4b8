/// OpenAPI documentation assembly.
pub mod documentation;
/// Match conclusion and forfeit handling shared by moves, surrender, and leave.
pub mod endgame;
/// Fire-and-forget broadcast helpers for room events.
pub mod events;
/// Health check logic.
pub mod health_service;
/// Join code generation for private rooms.
pub mod join_code;
/// Move validation and stone placement.
pub mod match_service;
/// Rematch handshake and successor room creation.
pub mod rematch_service;
/// Room lifecycle: creation, joining, readiness, leaving.
pub mod room_service;
/// SSE subscription plumbing.
pub mod sse_service;
