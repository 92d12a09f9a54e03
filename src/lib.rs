//! # cardtable
//!
//! An online multiplayer tabletop for a trading-card game: zones, decks,
//! life and poison counters, and near-real-time visibility of every other
//! seat at the table.
//!
//! ## Overview
//!
//! The heart of the crate is the in-memory game-state store (`table`): a
//! single mutable document per seat with atomic, infallible mutation
//! operations. Convergence between seats is achieved by periodically
//! broadcasting full snapshots through a room-keyed relay (`relay`) and
//! persisting them to a durable per-room store (`store`); the `sync`
//! module debounces both. There is no central authority and no per-field
//! merging: each seat is the only writer of its own zones, and the last
//! snapshot received for a seat wins.
//!
//! ## Architecture
//!
//! The API is built using the Rocket web framework with OpenAPI
//! documentation support. Shared state is managed through thread-safe
//! `Arc<Mutex<T>>` wrappers to allow concurrent access from multiple HTTP
//! requests.

// Rocket makes this a bit tricky to support
#![allow(clippy::module_name_repetitions)]
#[macro_use]
extern crate rocket;

use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};

pub mod cards;
pub mod relay;
pub mod status_messages;
pub mod store;
pub mod sync;
pub mod table;


type SharedGameState = std::sync::Arc<rocket::futures::lock::Mutex<table::GameState>>;

/// Initializes and configures the Rocket web server with all routes and OpenAPI documentation.
///
/// # Returns
///
/// A configured Rocket instance ready to be launched.
///
/// # Example
///
/// ```no_run
/// use cardtable::rocket_initialize;
///
/// #[rocket::main]
/// async fn main() {
///     rocket_initialize().launch().await.expect("Failed to launch rocket");
/// }
/// ```
pub fn rocket_initialize() -> rocket::Rocket<rocket::Build> {
    use crate::cards::card_lookup;
    use crate::cards::okapi_add_operation_for_card_lookup_;
    use crate::relay::endpoints::okapi_add_operation_for_join_room_;
    use crate::relay::endpoints::okapi_add_operation_for_leave_room_;
    use crate::relay::endpoints::okapi_add_operation_for_post_dice_;
    use crate::relay::endpoints::okapi_add_operation_for_post_state_;
    use crate::relay::endpoints::{join_room, leave_room, post_dice, post_state};
    use crate::store::endpoints::okapi_add_operation_for_get_room_state_;
    use crate::store::endpoints::okapi_add_operation_for_put_room_state_;
    use crate::store::endpoints::{get_room_state, put_room_state};
    use crate::table::endpoints::okapi_add_operation_for_load_deck_;
    use crate::table::endpoints::okapi_add_operation_for_table_action_;
    use crate::table::endpoints::okapi_add_operation_for_table_hydrate_;
    use crate::table::endpoints::okapi_add_operation_for_table_log_;
    use crate::table::endpoints::okapi_add_operation_for_table_state_;
    use crate::table::endpoints::{load_deck, table_action, table_hydrate, table_log, table_state};

    #[allow(clippy::no_effect_underscore_binding)]
    let _ = env_logger::try_init();

    use rocket::fairing::AdHoc;
    use std::sync::Arc;

    let gs: SharedGameState = Arc::new(rocket::futures::lock::Mutex::new(table::GameState::new()));
    let registry = Arc::new(relay::RoomRegistry::new());
    let snapshots = Arc::new(match std::env::var("SNAPSHOT_LOG_FILE") {
        Ok(path) => store::SnapshotStore::with_file(std::path::PathBuf::from(path)),
        Err(_) => store::SnapshotStore::new(),
    });
    let card_index = Arc::new(cards::CardIndex::new());

    rocket::build()
        .mount(
            "/",
            openapi_get_routes![
                table_action,
                table_state,
                table_hydrate,
                table_log,
                load_deck,
                get_room_state,
                put_room_state,
                join_room,
                leave_room,
                post_state,
                post_dice,
                card_lookup
            ],
        )
        .mount("/swagger", make_swagger_ui(&get_docs()))
        .mount("/", rocket::routes![relay::endpoints::room_events])
        .manage(gs)
        .manage(registry)
        .manage(snapshots)
        .manage(card_index)
        .attach(AdHoc::on_liftoff("table-sync", |rocket| {
            Box::pin(async move {
                // If a room is configured, hydrate from its durable snapshot
                // and attach this seat's sync session. Either way, flush the
                // snapshot writer when the process receives SIGINT/SIGTERM.
                let gs = rocket.state::<SharedGameState>().cloned();
                let registry = rocket
                    .state::<std::sync::Arc<relay::RoomRegistry>>()
                    .cloned();
                let snapshots = rocket
                    .state::<std::sync::Arc<store::SnapshotStore>>()
                    .cloned();
                let (Some(gs), Some(registry), Some(snapshots)) = (gs, registry, snapshots) else {
                    return;
                };
                rocket::tokio::spawn(async move {
                    let session = match std::env::var("TABLE_ROOM") {
                        Ok(room) if !room.trim().is_empty() => {
                            let doc = snapshots.load(&room);
                            {
                                let mut g = gs.lock().await;
                                table::snapshot::hydrate(&mut g, &doc);
                            }
                            Some(
                                sync::SyncSession::start(
                                    gs,
                                    registry,
                                    std::sync::Arc::clone(&snapshots),
                                    &room,
                                    sync::SyncConfig::default(),
                                )
                                .await,
                            )
                        }
                        _ => None,
                    };

                    #[cfg(unix)]
                    {
                        use rocket::tokio::signal::unix::{signal, SignalKind};
                        let mut sigterm =
                            signal(SignalKind::terminate()).expect("failed to set SIGTERM handler");
                        let mut sigint =
                            signal(SignalKind::interrupt()).expect("failed to set SIGINT handler");
                        rocket::tokio::select! {
                            _ = sigterm.recv() => {},
                            _ = sigint.recv() => {},
                        }
                    }
                    #[cfg(not(unix))]
                    {
                        let _ = rocket::tokio::signal::ctrl_c().await;
                    }

                    if let Some(session) = session {
                        session.close();
                    }
                    snapshots.shutdown();
                });
            })
        }))
}

fn get_docs() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: "/openapi.json".to_string(),
        ..Default::default()
    }
}
