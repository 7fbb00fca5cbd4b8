use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Broadcast event envelope and payloads.
pub mod events;
/// Health check payloads.
pub mod health;
/// Room, seat, and move payloads.
pub mod rooms;

fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
