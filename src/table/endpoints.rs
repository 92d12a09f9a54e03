use super::game_state::GameState;
use super::snapshot;
use super::types::{DeckEntry, LogEntry, TableAction, TableSnapshot};
use crate::status_messages::{new_status, Status};
use rocket::response::status::BadRequest;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::{openapi, JsonSchema};

type SharedGameState = std::sync::Arc<rocket::futures::lock::Mutex<GameState>>;

/// Compact view of the store returned by mutation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct TableSummary {
    pub revision: u64,
    pub library: usize,
    pub hand: usize,
    pub battlefield: usize,
    pub lands: usize,
    pub graveyard: usize,
    pub exile: usize,
    pub command: usize,
    pub life: i64,
    pub current_turn: usize,
}

impl TableSummary {
    fn of(gs: &GameState) -> Self {
        TableSummary {
            revision: gs.revision,
            library: gs.zones.library.len(),
            hand: gs.zones.hand.len(),
            battlefield: gs.zones.battlefield.len(),
            lands: gs.zones.lands.len(),
            graveyard: gs.zones.graveyard.len(),
            exile: gs.zones.exile.len(),
            command: gs.zones.command.len(),
            life: gs.life,
            current_turn: gs.current_turn,
        }
    }
}

/// Apply one table action. Actions are total over the current document:
/// stale or unknown ids are silent no-ops, so this endpoint always returns
/// the post-action summary.
#[openapi]
#[post("/table/action", format = "json", data = "<action>")]
pub async fn table_action(
    game_state: &rocket::State<SharedGameState>,
    action: Json<TableAction>,
) -> Json<TableSummary> {
    let mut gs = game_state.lock().await;
    gs.apply(action.0);
    Json(TableSummary::of(&gs))
}

/// The full current snapshot document for this seat.
#[openapi]
#[get("/table/state")]
pub async fn table_state(game_state: &rocket::State<SharedGameState>) -> Json<TableSnapshot> {
    let gs = game_state.lock().await;
    Json(snapshot::snapshot(&gs))
}

/// Feed an inbound document to the codec. Malformed documents apply
/// nothing; the endpoint reports the (possibly unchanged) summary.
#[openapi]
#[post("/table/hydrate", format = "json", data = "<doc>")]
pub async fn table_hydrate(
    game_state: &rocket::State<SharedGameState>,
    doc: Json<serde_json::Value>,
) -> Json<TableSummary> {
    let mut gs = game_state.lock().await;
    snapshot::hydrate(&mut gs, &doc.0);
    Json(TableSummary::of(&gs))
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct GameLogResponse {
    pub entries: Vec<LogEntry>,
    pub next_seq: Option<u64>,
    pub limit: usize,
}

/// Bounded listing of the activity log, oldest first.
#[openapi]
#[get("/table/log?<from_seq>&<limit>")]
pub async fn table_log(
    from_seq: Option<u64>,
    limit: Option<usize>,
    game_state: &rocket::State<SharedGameState>,
) -> Json<GameLogResponse> {
    let gs = game_state.lock().await;
    let mut entries: Vec<LogEntry> = gs
        .log
        .entries()
        .into_iter()
        .filter(|e| from_seq.map_or(true, |f| e.seq >= f))
        .collect();
    let max = limit.unwrap_or(LOG_PAGE_LIMIT);
    let has_more = entries.len() > max;
    entries.truncate(max);
    let next_seq = if has_more {
        entries.last().map(|e| e.seq + 1)
    } else {
        None
    };
    Json(GameLogResponse {
        entries,
        next_seq,
        limit: max,
    })
}

const LOG_PAGE_LIMIT: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct DeckImport {
    pub cards: Vec<DeckEntry>,
    #[serde(default)]
    pub commanders: Vec<String>,
}

/// Replace the session deck from a named card list.
#[openapi]
#[post("/table/deck", format = "json", data = "<deck>")]
pub async fn load_deck(
    game_state: &rocket::State<SharedGameState>,
    deck: Json<DeckImport>,
) -> Result<Json<TableSummary>, BadRequest<Json<Status>>> {
    let import = deck.0;
    if import.cards.is_empty() && import.commanders.is_empty() {
        return Err(BadRequest(new_status(
            "Deck import needs at least one card or commander".to_string(),
        )));
    }
    let mut gs = game_state.lock().await;
    gs.load_deck_from_names(&import.cards, &import.commanders);
    Ok(Json(TableSummary::of(&gs)))
}
