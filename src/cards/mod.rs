//! Card-metadata/image lookup boundary. Misses and upstream failures are
//! "no image available", never an error and never a blocker for a mutation.

use crate::status_messages::{new_status, Status};
use rocket::response::status::NotFound;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::{openapi, JsonSchema};
use std::collections::HashMap;
use std::sync::Mutex;

/// Resolved artwork and basic metadata for a card name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct CardInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
}

/// Name-keyed registry of known card artwork. Lookups are
/// case-insensitive; unknown names resolve to `None`.
#[derive(Debug, Default)]
pub struct CardIndex {
    entries: Mutex<HashMap<String, CardInfo>>,
}

impl CardIndex {
    /// A registry seeded with the starter-deck artwork.
    pub fn new() -> Self {
        let index = CardIndex::default();
        for (name, image, type_line) in [
            ("Island", "/img/cards/island.jpg", "Basic Land — Island"),
            ("Plains", "/img/cards/plains.jpg", "Basic Land — Plains"),
            ("Swamp", "/img/cards/swamp.jpg", "Basic Land — Swamp"),
            ("Mountain", "/img/cards/mountain.jpg", "Basic Land — Mountain"),
            ("Forest", "/img/cards/forest.jpg", "Basic Land — Forest"),
            ("Grizzly Bears", "/img/cards/grizzly-bears.jpg", "Creature — Bear"),
            ("Serra Angel", "/img/cards/serra-angel.jpg", "Creature — Angel"),
            ("Counterspell", "/img/cards/counterspell.jpg", "Instant"),
        ] {
            index.register(CardInfo {
                name: name.to_string(),
                image: Some(image.to_string()),
                type_line: Some(type_line.to_string()),
            });
        }
        index
    }

    pub fn register(&self, info: CardInfo) {
        let key = info.name.trim().to_lowercase();
        if key.is_empty() {
            return;
        }
        match self.entries.lock() {
            Ok(mut g) => {
                g.insert(key, info);
            }
            Err(e) => {
                e.into_inner().insert(key, info);
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<CardInfo> {
        let key = name.trim().to_lowercase();
        match self.entries.lock() {
            Ok(g) => g.get(&key).cloned(),
            Err(e) => e.into_inner().get(&key).cloned(),
        }
    }
}

/// Resolve artwork/metadata for a card name.
#[openapi]
#[get("/cards/<name>")]
pub async fn card_lookup(
    name: String,
    index: &rocket::State<std::sync::Arc<CardIndex>>,
) -> Result<Json<CardInfo>, NotFound<Json<Status>>> {
    match index.lookup(&name) {
        Some(info) => Ok(Json(info)),
        None => Err(NotFound(new_status(format!(
            "No card data for {:?}",
            name
        )))),
    }
}
