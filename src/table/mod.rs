//! The shared game-state model: zones, the mutation store, the bounded
//! activity log, and the snapshot/hydrate codec that carries a seat's
//! state to peers and storage.

pub mod endpoints;
pub mod game_log;
pub mod game_state;
pub mod snapshot;
pub mod types;
pub mod zones;

pub use game_state::GameState;
