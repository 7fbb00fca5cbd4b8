use tokio::sync::broadcast;

use crate::dto::events::RoomEvent;

/// Broadcast hub fanning out room events to every subscribed observer.
///
/// Delivery is best-effort: events sent while no subscriber is listening are
/// dropped, and a slow subscriber that lags simply misses messages. Nothing
/// in the core waits on delivery.
pub struct EventHub {
    sender: broadcast::Sender<RoomEvent>,
}

impl EventHub {
    /// Construct a new hub backed by a Tokio broadcast channel with the
    /// given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a new subscriber that will receive subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<RoomEvent> {
        self.sender.subscribe()
    }

    /// Send an event to all current subscribers, ignoring delivery errors.
    pub fn broadcast(&self, event: RoomEvent) {
        let _ = self.sender.send(event);
    }
}
