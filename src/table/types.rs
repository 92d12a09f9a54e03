use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique opaque card identity. Stable for the card's lifetime;
/// a fresh id is minted only when cloning or synthesizing a card.
pub type CardId = u64;

static NEXT_CARD_ID: AtomicU64 = AtomicU64::new(1);

/// Mint a fresh card id.
pub fn next_card_id() -> CardId {
    NEXT_CARD_ID.fetch_add(1, Ordering::SeqCst)
}

/// Milliseconds since the Unix epoch, `0` if the clock is unavailable.
pub fn now_millis() -> u64 {
    match std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
        Ok(dur) => dur.as_millis() as u64,
        Err(_) => 0,
    }
}

/// A single physical card on the table.
///
/// `x`/`y` are free-form battlefield coordinates and only meaningful while
/// the card sits on the battlefield. `counters` is omitted from the wire
/// entirely when zero to keep documents compact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase", default)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub tapped: bool,
    pub token: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counters: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_of: Option<CardId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl Default for Card {
    fn default() -> Self {
        Card {
            id: next_card_id(),
            name: String::new(),
            tapped: false,
            token: false,
            image: None,
            x: None,
            y: None,
            counters: None,
            custom_text: None,
            clone_of: None,
            labels: Vec::new(),
        }
    }
}

impl Card {
    pub fn named(name: impl Into<String>) -> Self {
        Card {
            name: name.into(),
            ..Card::default()
        }
    }

    /// Clear the battlefield-only transient fields (position and tap state).
    pub fn reset_transient(&mut self) {
        self.tapped = false;
        self.x = None;
        self.y = None;
    }
}

/// The zones a card can occupy. The variant order here is the canonical
/// normalization order: the first zone listing a card id wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ZoneKind {
    Library,
    Hand,
    Battlefield,
    Lands,
    Graveyard,
    Exile,
    Command,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 7] = [
        ZoneKind::Library,
        ZoneKind::Hand,
        ZoneKind::Battlefield,
        ZoneKind::Lands,
        ZoneKind::Graveyard,
        ZoneKind::Exile,
        ZoneKind::Command,
    ];
}

/// The full zone collection for one seat. Order within each zone matters
/// for the library (top = index 0); elsewhere it is visual order only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", default)]
pub struct Zones {
    pub library: Vec<Card>,
    pub hand: Vec<Card>,
    pub battlefield: Vec<Card>,
    pub lands: Vec<Card>,
    pub graveyard: Vec<Card>,
    pub exile: Vec<Card>,
    pub command: Vec<Card>,
}

impl Zones {
    pub fn get(&self, kind: ZoneKind) -> &Vec<Card> {
        match kind {
            ZoneKind::Library => &self.library,
            ZoneKind::Hand => &self.hand,
            ZoneKind::Battlefield => &self.battlefield,
            ZoneKind::Lands => &self.lands,
            ZoneKind::Graveyard => &self.graveyard,
            ZoneKind::Exile => &self.exile,
            ZoneKind::Command => &self.command,
        }
    }

    pub fn get_mut(&mut self, kind: ZoneKind) -> &mut Vec<Card> {
        match kind {
            ZoneKind::Library => &mut self.library,
            ZoneKind::Hand => &mut self.hand,
            ZoneKind::Battlefield => &mut self.battlefield,
            ZoneKind::Lands => &mut self.lands,
            ZoneKind::Graveyard => &mut self.graveyard,
            ZoneKind::Exile => &mut self.exile,
            ZoneKind::Command => &mut self.command,
        }
    }

    /// Zones in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ZoneKind, &Vec<Card>)> {
        ZoneKind::ALL.iter().map(move |&k| (k, self.get(k)))
    }

    /// Locate a card id: which zone holds it and at what position.
    pub fn find(&self, id: CardId) -> Option<(ZoneKind, usize)> {
        for (kind, cards) in self.iter() {
            if let Some(pos) = cards.iter().position(|c| c.id == id) {
                return Some((kind, pos));
            }
        }
        None
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        let (kind, pos) = self.find(id)?;
        self.get(kind).get(pos)
    }

    pub fn total_cards(&self) -> usize {
        self.iter().map(|(_, cards)| cards.len()).sum()
    }
}

/// A local seat record. The seat mirroring the legacy zone view is derived
/// by the store after every mutation, never edited independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase", default)]
pub struct Player {
    pub id: u64,
    pub name: String,
    pub battlefield: Vec<Card>,
    pub lands: Vec<Card>,
    pub command: Vec<Card>,
    pub graveyard: Vec<Card>,
    pub exile: Vec<Card>,
    /// Private: stripped from broadcast documents unless the hand is revealed.
    pub hand: Vec<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playmat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_theme: Option<String>,
}

/// Read-only shadow of one other participant's publicly-visible state.
/// Overwritten wholesale from that peer's broadcasts; removed on departure;
/// never mutated by local actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase", default)]
pub struct RemoteSeat {
    /// Transport/connection id, also the map key.
    pub id: String,
    pub name: String,
    /// Seat index claimed by the peer, `-1` when unknown.
    pub seat: i32,
    /// Stable identity across reconnects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_key: Option<String>,
    /// Transient per-session socket id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socket_id: Option<String>,
    pub battlefield: Vec<Card>,
    pub lands: Vec<Card>,
    pub command: Vec<Card>,
    pub graveyard: Vec<Card>,
    pub exile: Vec<Card>,
    /// Revealed hand contents, empty unless the peer broadcasts them.
    pub hand: Vec<Card>,
    pub hand_count: u32,
    pub life: i64,
    pub poison: u32,
    pub commander_tax: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playmat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_theme: Option<String>,
    pub updated_at: u64,
}

impl RemoteSeat {
    pub fn with_id(id: impl Into<String>) -> Self {
        RemoteSeat {
            id: id.into(),
            seat: -1,
            life: super::game_state::STARTING_LIFE,
            ..RemoteSeat::default()
        }
    }
}

/// One entry in the bounded activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct LogEntry {
    pub seq: u64,
    /// Millis since epoch, formatted as a string for wire stability.
    pub timestamp: String,
    pub message: String,
}

/// One named entry of a deck import. `count` below 1 still yields one copy.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct DeckEntry {
    pub name: String,
    #[serde(default)]
    pub count: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The fully self-contained wire document: everything a peer or the durable
/// store needs to reconstruct this seat's view of the game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase", default)]
pub struct TableSnapshot {
    pub zones: Zones,
    pub players: Vec<Player>,
    pub remote_seats: HashMap<String, RemoteSeat>,
    pub name: String,
    pub player_key: String,
    /// Seat index owned by this client, `-1` when unset.
    pub my_seat: i32,
    pub life: i64,
    pub poison: u32,
    pub commander_tax: u32,
    pub commander_damage: HashMap<String, u32>,
    pub turn_order: Vec<String>,
    pub current_turn: usize,
    pub reveal_hand: bool,
    pub hand_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playmat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_theme: Option<String>,
    pub log: Vec<LogEntry>,
}

/// Change notifications emitted by the store after each effective mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// A local mutation; schedules both a broadcast and a durable save.
    Mutated,
    /// The rotating turn pointer advanced; consumers may play a cue.
    TurnPassed,
    /// A peer's shadow record changed. Saved, but never re-broadcast;
    /// re-broadcasting remote updates would ping-pong between seats.
    Remote,
}

/// Player actions accepted by the table action endpoint. Every variant maps
/// onto one store mutation; unknown targets are silent no-ops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", tag = "action_type")]
pub enum TableAction {
    Draw { count: usize },
    MoveCard { card_id: CardId, to: ZoneKind, index: Option<usize> },
    SetBattlefieldPos { card_id: CardId, x: f64, y: f64 },
    ToggleTap { card_id: CardId },
    IncCounter { card_id: CardId, delta: i64 },
    ToggleLabel { card_id: CardId, label: String },
    SetCustomText { card_id: CardId, text: String },
    MoveToLibraryTop { card_id: CardId },
    MoveToLibraryBottom { card_id: CardId },
    MoveTopLibraryToBottom,
    CloneCard { card_id: CardId },
    AddToken { name: String, zone: ZoneKind, image: Option<String> },
    DrawSeven,
    MulliganSevenForSeven,
    MulliganLondon { bottom_count: usize },
    ShuffleLibrary,
    UntapAll,
    IncLife { amount: i64 },
    IncPoison { amount: i64 },
    IncCommanderTax { amount: i64 },
    IncCommanderDamage { opponent: String, amount: i64 },
    SetTurnOrder { order: Vec<String> },
    PassTurn,
    SetMySeat { index: i32 },
    SetSeatName { index: usize, name: String },
    SetName { name: String },
    RevealHand { reveal: bool },
    SetPlaymat { key: Option<String> },
    SetLifeTheme { image: Option<String> },
    Log { message: String },
    ClearLog,
}
