//! Shared application state: the store handle, the event hub, and the
//! per-room serialization gates.

mod hub;
/// Pure transition rules for the room lifecycle.
pub mod lifecycle;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::dao::store::RoomStore;

pub use self::hub::EventHub;

/// Cheaply clonable handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state shared by every request handler.
///
/// Each room is an independent unit of serialization: every mutating
/// operation on a room locks that room's gate for its whole duration, while
/// operations on different rooms proceed concurrently. Board and turn
/// authority are re-derived from the store inside the gate, never cached
/// across requests.
pub struct AppState {
    config: AppConfig,
    store: Arc<dyn RoomStore>,
    events: EventHub,
    room_gates: DashMap<Uuid, Arc<Mutex<()>>>,
    player_gates: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl AppState {
    /// Construct the state wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig, store: Arc<dyn RoomStore>) -> SharedState {
        let events = EventHub::new(config.event_capacity());
        Arc::new(Self {
            config,
            store,
            events,
            room_gates: DashMap::new(),
            player_gates: DashMap::new(),
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handle to the persistence collaborator.
    pub fn store(&self) -> Arc<dyn RoomStore> {
        Arc::clone(&self.store)
    }

    /// Broadcast hub used to notify the room's observers.
    pub fn events(&self) -> &EventHub {
        &self.events
    }

    /// Serialization gate for a room. Callers lock the returned mutex for
    /// the duration of any mutating operation targeting that room.
    pub fn room_gate(&self, room_id: Uuid) -> Arc<Mutex<()>> {
        self.room_gates
            .entry(room_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the gate of a deleted room. Harmless if a racing request still
    /// holds a clone; it simply finishes on the orphaned mutex.
    pub fn discard_room_gate(&self, room_id: Uuid) {
        self.room_gates.remove(&room_id);
    }

    /// Serialization gate for a player. Seat-taking paths hold it across the
    /// one-active-seat check and the seat insert. When a room gate is held
    /// too, the player gate is always acquired second.
    pub fn player_gate(&self, player_id: Uuid) -> Arc<Mutex<()>> {
        self.player_gates
            .entry(player_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
