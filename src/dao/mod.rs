/// In-memory store implementation backing the binary and the test-suite.
pub mod memory;
/// Persistence model definitions shared across layers.
pub mod models;
/// Storage abstraction layer for persistence operations.
pub mod storage;
/// Store trait covering rooms, seats, matches, moves, and history.
pub mod store;
