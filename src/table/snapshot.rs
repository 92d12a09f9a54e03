//! Snapshot/hydrate codec: the single boundary between the store and the
//! wire. Encoding is total; decoding is tolerant: default on missing,
//! skip on invalid, and a document that cannot be read at all applies
//! nothing. `hydrate` never fails and never partially applies a zone set.

use super::game_state::GameState;
use super::types::{Card, Player, RemoteSeat, TableSnapshot, Zones};
use serde_json::Value;
use std::collections::HashMap;

/// Produce the fully self-contained wire document for this seat.
pub fn snapshot(gs: &GameState) -> TableSnapshot {
    TableSnapshot {
        zones: gs.zones.clone(),
        players: gs.players.clone(),
        remote_seats: gs.remote_seats.clone(),
        name: gs.name.clone(),
        player_key: gs.player_key.clone(),
        my_seat: gs.my_seat,
        life: gs.life,
        poison: gs.poison,
        commander_tax: gs.commander_tax,
        commander_damage: gs.commander_damage.clone(),
        turn_order: gs.turn_order.clone(),
        current_turn: gs.current_turn,
        reveal_hand: gs.reveal_hand,
        hand_count: gs.zones.hand.len() as u32,
        playmat: gs.playmat.clone(),
        life_theme: gs.life_theme.clone(),
        log: gs.log.entries(),
    }
}

/// The broadcast variant: hand contents are private and stripped unless
/// the seat has revealed them. The hand count always travels.
pub fn public_snapshot(gs: &GameState) -> TableSnapshot {
    let mut snap = snapshot(gs);
    if !gs.reveal_hand {
        snap.zones.hand.clear();
        for player in snap.players.iter_mut() {
            player.hand.clear();
        }
    }
    snap
}

pub fn snapshot_value(gs: &GameState) -> Value {
    serde_json::to_value(snapshot(gs)).unwrap_or(Value::Null)
}

pub fn public_snapshot_value(gs: &GameState) -> Value {
    serde_json::to_value(public_snapshot(gs)).unwrap_or(Value::Null)
}

/// Apply a received document to the store.
///
/// The document is expected to describe the sender's own state: its seat-0
/// zones are authoritative for the legacy zone view, and its remote-seat
/// map replaces the local one entry by entry (invalid entries are skipped
/// without aborting the rest). A non-object document, or one with no
/// readable fields, leaves the store unchanged.
pub fn hydrate(gs: &mut GameState, doc: &Value) {
    let Some(obj) = doc.as_object() else {
        return;
    };
    if let Some(z) = obj.get("zones") {
        if let Ok(zones) = serde_json::from_value::<Zones>(z.clone()) {
            gs.zones = zones;
        }
    }
    if let Some(p) = obj.get("players") {
        if let Ok(players) = serde_json::from_value::<Vec<Player>>(p.clone()) {
            // The sender's player 0 is authoritative for what was broadcast:
            // its public zones override whatever the zones field carried.
            if let Some(p0) = players.first() {
                gs.zones.battlefield = p0.battlefield.clone();
                gs.zones.lands = p0.lands.clone();
                gs.zones.command = p0.command.clone();
                gs.zones.graveyard = p0.graveyard.clone();
                gs.zones.exile = p0.exile.clone();
            }
            gs.players = players;
        }
    }
    if let Some(v) = obj.get("name").and_then(Value::as_str) {
        gs.name = v.to_string();
    }
    if let Some(v) = obj.get("playerKey").and_then(Value::as_str) {
        if !v.is_empty() {
            gs.player_key = v.to_string();
        }
    }
    if let Some(v) = obj.get("mySeat").and_then(Value::as_i64) {
        gs.my_seat = v as i32;
    }
    if let Some(v) = obj.get("life").and_then(Value::as_i64) {
        gs.life = v;
    }
    if let Some(v) = obj.get("poison").and_then(Value::as_u64) {
        gs.poison = v.min(u64::from(u32::MAX)) as u32;
    }
    if let Some(v) = obj.get("commanderTax").and_then(Value::as_u64) {
        gs.commander_tax = v.min(u64::from(u32::MAX)) as u32;
    }
    if let Some(v) = obj.get("commanderDamage") {
        if let Ok(damage) = serde_json::from_value::<HashMap<String, u32>>(v.clone()) {
            gs.commander_damage = damage;
        }
    }
    if let Some(v) = obj.get("turnOrder") {
        if let Ok(order) = serde_json::from_value::<Vec<String>>(v.clone()) {
            gs.turn_order = order;
        }
    }
    if let Some(v) = obj.get("currentTurn").and_then(Value::as_u64) {
        gs.current_turn = v as usize;
    }
    gs.current_turn = gs.current_turn.min(gs.turn_order.len().saturating_sub(1));
    if let Some(v) = obj.get("revealHand").and_then(Value::as_bool) {
        gs.reveal_hand = v;
    }
    if let Some(v) = obj.get("playmat") {
        gs.playmat = v.as_str().map(str::to_string);
    }
    if let Some(v) = obj.get("lifeTheme") {
        gs.life_theme = v.as_str().map(str::to_string);
    }
    if let Some(v) = obj.get("log") {
        if let Ok(entries) = serde_json::from_value(v.clone()) {
            gs.log.restore(entries);
        }
    }
    if let Some(map) = obj.get("remoteSeats").and_then(Value::as_object) {
        let mut seats = HashMap::new();
        for (key, value) in map {
            match serde_json::from_value::<RemoteSeat>(value.clone()) {
                Ok(mut seat) => {
                    seat.id = key.clone();
                    seats.insert(key.clone(), seat);
                }
                Err(_) => continue,
            }
        }
        gs.remote_seats = seats;
    }
    gs.commit_zones();
}

/// Merge one peer payload into an existing shadow record: fields absent
/// from the payload keep their previous value, explicit nulls clear, and
/// values of the wrong shape are skipped rather than failing the merge.
pub fn merge_remote_seat(seat: &mut RemoteSeat, obj: &serde_json::Map<String, Value>) {
    if let Some(v) = obj.get("name").and_then(Value::as_str) {
        seat.name = v.to_string();
    }
    if let Some(v) = obj.get("seat").and_then(Value::as_i64) {
        seat.seat = v as i32;
    }
    merge_opt_string(&mut seat.player_key, obj.get("playerKey"));
    merge_opt_string(&mut seat.socket_id, obj.get("socketId"));
    merge_cards(&mut seat.battlefield, obj.get("battlefield"));
    merge_cards(&mut seat.lands, obj.get("lands"));
    merge_cards(&mut seat.command, obj.get("command"));
    merge_cards(&mut seat.graveyard, obj.get("graveyard"));
    merge_cards(&mut seat.exile, obj.get("exile"));
    merge_cards(&mut seat.hand, obj.get("hand"));
    if let Some(v) = obj.get("handCount").and_then(Value::as_u64) {
        seat.hand_count = v.min(u64::from(u32::MAX)) as u32;
    }
    if let Some(v) = obj.get("life").and_then(Value::as_i64) {
        seat.life = v;
    }
    if let Some(v) = obj.get("poison").and_then(Value::as_u64) {
        seat.poison = v.min(u64::from(u32::MAX)) as u32;
    }
    if let Some(v) = obj.get("commanderTax").and_then(Value::as_u64) {
        seat.commander_tax = v.min(u64::from(u32::MAX)) as u32;
    }
    merge_opt_string(&mut seat.playmat, obj.get("playmat"));
    merge_opt_string(&mut seat.life_theme, obj.get("lifeTheme"));
}

fn merge_opt_string(target: &mut Option<String>, value: Option<&Value>) {
    match value {
        None => {}
        Some(Value::Null) => *target = None,
        Some(v) => {
            if let Some(s) = v.as_str() {
                *target = Some(s.to_string());
            }
        }
    }
}

fn merge_cards(target: &mut Vec<Card>, value: Option<&Value>) {
    match value {
        None => {}
        Some(Value::Null) => target.clear(),
        Some(v) => {
            if let Ok(cards) = serde_json::from_value::<Vec<Card>>(v.clone()) {
                *target = cards;
            }
        }
    }
}

/// Derive a `set_remote_seat` payload from a peer's broadcast document:
/// the peer's own seat record (or its zone view) becomes the shadow.
pub fn remote_seat_payload(snap: &Value) -> Value {
    let Ok(doc) = serde_json::from_value::<TableSnapshot>(snap.clone()) else {
        return Value::Null;
    };
    let seat = if doc.my_seat >= 0 { doc.my_seat } else { 0 };
    let source = doc.players.get(seat as usize).or_else(|| doc.players.first());
    let (battlefield, lands, command, graveyard, exile, hand) = match source {
        Some(p) => (
            p.battlefield.clone(),
            p.lands.clone(),
            p.command.clone(),
            p.graveyard.clone(),
            p.exile.clone(),
            p.hand.clone(),
        ),
        None => (
            doc.zones.battlefield.clone(),
            doc.zones.lands.clone(),
            doc.zones.command.clone(),
            doc.zones.graveyard.clone(),
            doc.zones.exile.clone(),
            doc.zones.hand.clone(),
        ),
    };
    let hand_count = if doc.hand_count > 0 {
        doc.hand_count
    } else {
        hand.len() as u32
    };
    let revealed: Vec<Card> = if doc.reveal_hand { hand } else { Vec::new() };

    let mut out = serde_json::Map::new();
    out.insert("name".into(), Value::String(doc.name));
    out.insert("seat".into(), Value::from(seat));
    if !doc.player_key.is_empty() {
        out.insert("playerKey".into(), Value::String(doc.player_key));
    }
    out.insert("handCount".into(), Value::from(hand_count));
    out.insert("life".into(), Value::from(doc.life));
    out.insert("poison".into(), Value::from(doc.poison));
    out.insert("commanderTax".into(), Value::from(doc.commander_tax));
    for (key, cards) in [
        ("battlefield", battlefield),
        ("lands", lands),
        ("command", command),
        ("graveyard", graveyard),
        ("exile", exile),
        ("hand", revealed),
    ] {
        out.insert(
            key.into(),
            serde_json::to_value(cards).unwrap_or(Value::Array(Vec::new())),
        );
    }
    match doc.playmat {
        Some(p) => out.insert("playmat".into(), Value::String(p)),
        None => out.insert("playmat".into(), Value::Null),
    };
    match doc.life_theme {
        Some(t) => out.insert("lifeTheme".into(), Value::String(t)),
        None => out.insert("lifeTheme".into(), Value::Null),
    };
    Value::Object(out)
}
