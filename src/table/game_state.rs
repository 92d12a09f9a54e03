use super::game_log::GameLog;
use super::types::{
    next_card_id, now_millis, Card, CardId, DeckEntry, Player, RemoteSeat, StateChange,
    TableAction, ZoneKind, Zones,
};
use super::zones::{normalize, shuffle_cards};
use rand::{RngCore, SeedableRng};
use rand_pcg::Lcg64Xsh32;
use std::collections::HashMap;
use std::sync::mpsc;

pub const STARTING_LIFE: i64 = 40;

/// Visual offset applied to a battlefield clone so it doesn't cover its source.
const CLONE_OFFSET: f64 = 24.0;

/// The canned deck every fresh session starts with.
fn starter_deck() -> Vec<DeckEntry> {
    let entry = |name: &str, count: i32| DeckEntry {
        name: name.to_string(),
        count,
        image: None,
    };
    vec![
        entry("Island", 12),
        entry("Plains", 12),
        entry("Grizzly Bears", 8),
        entry("Serra Angel", 4),
        entry("Counterspell", 4),
    ]
}

/// The authoritative in-memory document for one seat of the table.
///
/// Every public mutation is total: absent card ids and out-of-range targets
/// are silent no-ops, never errors, so the store can be driven with stale or
/// racy ids arriving from the network without ever failing a caller. Each
/// mutation commits as a single atomic replacement and re-derives the
/// players array so the mirrored seat never diverges from the zone view.
#[derive(Debug)]
pub struct GameState {
    /// Legacy single-seat zone view; the mirrored seat is derived from it.
    pub zones: Zones,
    /// Card id -> zone, maintained on every commit for O(1) locates.
    index: HashMap<CardId, ZoneKind>,
    pub players: Vec<Player>,
    /// Seat index owned by this client, `-1` when unset (seat 0 applies).
    pub my_seat: i32,
    /// Shadows of other participants, keyed by transport id.
    pub remote_seats: HashMap<String, RemoteSeat>,
    pub name: String,
    /// Stable identity across reconnects, minted once per session.
    pub player_key: String,
    pub life: i64,
    pub poison: u32,
    pub commander_tax: u32,
    pub commander_damage: HashMap<String, u32>,
    pub turn_order: Vec<String>,
    pub current_turn: usize,
    pub reveal_hand: bool,
    pub playmat: Option<String>,
    pub life_theme: Option<String>,
    pub log: GameLog,
    /// Bumped on every effective mutation; the sync layer coalesces on it.
    pub revision: u64,
    rng: Lcg64Xsh32,
    watchers: Vec<mpsc::Sender<StateChange>>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::with_seed(now_millis())
    }

    /// Deterministic constructor for replays and tests.
    pub fn with_seed(seed: u64) -> Self {
        let mut seed_bytes = [0u8; 16];
        seed_bytes[0..8].copy_from_slice(&seed.to_le_bytes());
        seed_bytes[8..16].copy_from_slice(&seed.to_le_bytes());
        let mut rng = Lcg64Xsh32::from_seed(seed_bytes);
        let player_key = format!("pk-{:08x}{:08x}", rng.next_u32(), rng.next_u32());
        let mut gs = GameState {
            zones: Zones::default(),
            index: HashMap::new(),
            players: Vec::new(),
            my_seat: -1,
            remote_seats: HashMap::new(),
            name: String::new(),
            player_key,
            life: STARTING_LIFE,
            poison: 0,
            commander_tax: 0,
            commander_damage: HashMap::new(),
            turn_order: Vec::new(),
            current_turn: 0,
            reveal_hand: false,
            playmat: None,
            life_theme: None,
            log: GameLog::new(),
            revision: 0,
            rng,
            watchers: Vec::new(),
        };
        gs.load_deck_from_names(&starter_deck(), &[]);
        gs.log.clear();
        gs
    }

    /// Register a change watcher. Disconnected receivers are dropped on the
    /// next notification; sends are best-effort.
    pub fn subscribe(&mut self) -> mpsc::Receiver<StateChange> {
        let (tx, rx) = mpsc::channel();
        self.watchers.push(tx);
        rx
    }

    fn bump(&mut self, change: StateChange) {
        self.revision += 1;
        self.watchers.retain(|w| w.send(change).is_ok());
    }

    /// Display name used in log entries.
    fn actor(&self) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            "A player".to_string()
        } else {
            trimmed.to_string()
        }
    }

    fn local_seat(&self) -> usize {
        if self.my_seat >= 0 {
            self.my_seat as usize
        } else {
            0
        }
    }

    fn ensure_seat(&mut self, index: usize) {
        while self.players.len() <= index {
            let id = self.players.len() as u64;
            self.players.push(Player {
                id,
                ..Player::default()
            });
        }
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (kind, cards) in self.zones.iter() {
            for card in cards {
                self.index.insert(card.id, kind);
            }
        }
    }

    /// Mirror the legacy zone view into seat 0 and, when set, `my_seat`.
    /// Runs after every mutation so the two views never diverge.
    fn sync_seat(&mut self) {
        let local = self.local_seat();
        self.ensure_seat(local);
        for seat in [0, local] {
            let name = if seat == local {
                Some(self.name.clone())
            } else {
                None
            };
            let playmat = self.playmat.clone();
            let life_theme = self.life_theme.clone();
            let p = &mut self.players[seat];
            p.battlefield = self.zones.battlefield.clone();
            p.lands = self.zones.lands.clone();
            p.command = self.zones.command.clone();
            p.graveyard = self.zones.graveyard.clone();
            p.exile = self.zones.exile.clone();
            p.hand = self.zones.hand.clone();
            p.playmat = playmat;
            p.life_theme = life_theme;
            if let Some(name) = name {
                p.name = name;
            }
        }
    }

    /// Normalize, re-index, re-mirror and publish the current zones as the
    /// next committed document.
    pub(crate) fn commit_zones(&mut self) {
        self.zones = normalize(&self.zones);
        self.rebuild_index();
        self.sync_seat();
        self.bump(StateChange::Mutated);
    }

    /// Remove a card from whatever zone holds it. `None` if the id is unknown.
    fn take(&mut self, id: CardId) -> Option<(ZoneKind, usize, Card)> {
        let kind = *self.index.get(&id)?;
        let pos = self.zones.get(kind).iter().position(|c| c.id == id)?;
        let card = self.zones.get_mut(kind).remove(pos);
        self.index.remove(&id);
        Some((kind, pos, card))
    }

    /// Locate-and-mutate across all zones; false if the id is unknown.
    fn with_card_mut(&mut self, id: CardId, f: impl FnOnce(&mut Card)) -> bool {
        let Some(&kind) = self.index.get(&id) else {
            return false;
        };
        match self.zones.get_mut(kind).iter_mut().find(|c| c.id == id) {
            Some(card) => {
                f(card);
                true
            }
            None => false,
        }
    }

    fn touch(&mut self) {
        self.sync_seat();
        self.bump(StateChange::Mutated);
    }

    // ====== zone operations ======

    /// Move up to `n` cards from the top of the library to the hand. A
    /// partial draw on an exhausted library is valid, not an error.
    pub fn draw(&mut self, n: usize) {
        let take = n.min(self.zones.library.len());
        if take == 0 {
            return;
        }
        let drawn: Vec<Card> = self.zones.library.drain(0..take).collect();
        let summary = if take <= 3 {
            drawn
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            format!("{} cards", take)
        };
        self.log.append(format!("{} drew {}.", self.actor(), summary));
        self.zones.hand.extend(drawn);
        self.commit_zones();
    }

    /// Relocate a card to `to`, optionally at a position within the zone.
    /// Leaving the battlefield clears the transient position; any zone
    /// change resets tap state; a token leaving the battlefield is deleted
    /// rather than relocated.
    pub fn move_card(&mut self, id: CardId, to: ZoneKind, index: Option<usize>) {
        let Some((from, _, mut card)) = self.take(id) else {
            return;
        };
        if card.token && from == ZoneKind::Battlefield && to != ZoneKind::Battlefield {
            self.log.append(format!(
                "{}'s {} token left the battlefield and was removed.",
                self.actor(),
                card.name
            ));
            self.commit_zones();
            return;
        }
        if from == ZoneKind::Battlefield && to != ZoneKind::Battlefield {
            card.x = None;
            card.y = None;
        }
        if from != to {
            card.tapped = false;
        }
        let name = card.name.clone();
        let dest = self.zones.get_mut(to);
        let at = index.unwrap_or(dest.len()).min(dest.len());
        dest.insert(at, card);
        if from != to {
            self.log.append(format!(
                "{} moved {} to the {}.",
                self.actor(),
                name,
                zone_label(to)
            ));
        }
        self.commit_zones();
    }

    /// Update only the position of a battlefield card; a no-op elsewhere.
    pub fn set_battlefield_pos(&mut self, id: CardId, x: f64, y: f64) {
        let moved = match self.zones.battlefield.iter_mut().find(|c| c.id == id) {
            Some(card) => {
                card.x = Some(x);
                card.y = Some(y);
                true
            }
            None => false,
        };
        if moved {
            self.touch();
        }
    }

    pub fn toggle_tap(&mut self, id: CardId) {
        if self.with_card_mut(id, |c| c.tapped = !c.tapped) {
            self.touch();
        }
    }

    /// Adjust the generic marker count, clamped at zero; the field is
    /// dropped entirely when it reaches zero.
    pub fn inc_counter(&mut self, id: CardId, delta: i64) {
        if self.with_card_mut(id, |c| {
            let next = (i64::from(c.counters.unwrap_or(0)) + delta).max(0);
            c.counters = if next == 0 { None } else { Some(next as u32) };
        }) {
            self.touch();
        }
    }

    pub fn toggle_label(&mut self, id: CardId, label: &str) {
        if label.trim().is_empty() {
            return;
        }
        if self.with_card_mut(id, |c| {
            if let Some(pos) = c.labels.iter().position(|l| l == label) {
                c.labels.remove(pos);
            } else {
                c.labels.push(label.to_string());
            }
        }) {
            self.touch();
        }
    }

    /// Whitespace-only text clears the annotation instead of storing "".
    pub fn set_card_custom_text(&mut self, id: CardId, text: &str) {
        let trimmed = text.trim();
        let value = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        if self.with_card_mut(id, |c| c.custom_text = value) {
            self.touch();
        }
    }

    pub fn move_any_to_library_top(&mut self, id: CardId) {
        self.move_to_library_end(id, true);
    }

    pub fn move_any_to_library_bottom(&mut self, id: CardId) {
        self.move_to_library_end(id, false);
    }

    fn move_to_library_end(&mut self, id: CardId, top: bool) {
        let Some((from, _, mut card)) = self.take(id) else {
            return;
        };
        if card.token && from == ZoneKind::Battlefield {
            self.log.append(format!(
                "{}'s {} token left the battlefield and was removed.",
                self.actor(),
                card.name
            ));
            self.commit_zones();
            return;
        }
        card.reset_transient();
        let name = card.name.clone();
        if top {
            self.zones.library.insert(0, card);
        } else {
            self.zones.library.push(card);
        }
        self.log.append(format!(
            "{} put {} on the {} of the library.",
            self.actor(),
            name,
            if top { "top" } else { "bottom" }
        ));
        self.commit_zones();
    }

    /// Rotate the library by one: top card goes to the bottom.
    pub fn move_top_library_to_bottom(&mut self) {
        if self.zones.library.is_empty() {
            return;
        }
        let card = self.zones.library.remove(0);
        self.zones.library.push(card);
        self.log.append(format!(
            "{} moved the top card of the library to the bottom.",
            self.actor()
        ));
        self.commit_zones();
    }

    /// Insert a copy of the card right after its source, with a fresh id.
    /// Clones never chain: a clone of a clone references the original.
    pub fn clone_card(&mut self, id: CardId) {
        let Some(&kind) = self.index.get(&id) else {
            return;
        };
        let Some(pos) = self.zones.get(kind).iter().position(|c| c.id == id) else {
            return;
        };
        let source = self.zones.get(kind)[pos].clone();
        let mut copy = source.clone();
        copy.id = next_card_id();
        copy.clone_of = source.clone_of.or(Some(source.id));
        if kind == ZoneKind::Battlefield {
            copy.x = Some(source.x.unwrap_or(0.0) + CLONE_OFFSET);
            copy.y = Some(source.y.unwrap_or(0.0) + CLONE_OFFSET);
        }
        let name = copy.name.clone();
        self.zones.get_mut(kind).insert(pos + 1, copy);
        self.log.append(format!("{} cloned {}.", self.actor(), name));
        self.commit_zones();
    }

    /// Synthesize an impermanent card directly into a zone.
    pub fn add_token(&mut self, name: &str, zone: ZoneKind, image: Option<String>) {
        let card = Card {
            name: name.to_string(),
            token: true,
            image,
            ..Card::default()
        };
        self.zones.get_mut(zone).push(card);
        self.log.append(format!("{} created a {} token.", self.actor(), name));
        self.commit_zones();
    }

    /// Replace the hand with up to seven fresh cards; the old hand is
    /// discarded outright, not returned to the library.
    pub fn draw_seven(&mut self) {
        self.zones.hand.clear();
        let take = 7.min(self.zones.library.len());
        let drawn: Vec<Card> = self.zones.library.drain(0..take).collect();
        self.zones.hand = drawn;
        self.log.append(format!(
            "{} drew a new hand of {}.",
            self.actor(),
            take
        ));
        self.commit_zones();
    }

    pub fn mulligan_seven_for_seven(&mut self) {
        self.rebuild_hand(0);
        self.log.append(format!("{} took a mulligan.", self.actor()));
        self.commit_zones();
    }

    /// London variant: after the fresh seven, `bottom_count` cards go from
    /// the new hand to the bottom of the library.
    pub fn mulligan_london(&mut self, bottom_count: usize) {
        self.rebuild_hand(bottom_count);
        self.log.append(format!(
            "{} took a London mulligan, putting {} on the bottom.",
            self.actor(),
            bottom_count.min(7)
        ));
        self.commit_zones();
    }

    /// Reconstitute the library as (library ∪ hand), shuffle, draw seven,
    /// then bottom `bottom_count` of the new hand.
    fn rebuild_hand(&mut self, bottom_count: usize) {
        let mut hand = std::mem::take(&mut self.zones.hand);
        for card in hand.iter_mut() {
            card.x = None;
            card.y = None;
        }
        self.zones.library.extend(hand);
        shuffle_cards(&mut self.zones.library, &mut self.rng);
        let take = 7.min(self.zones.library.len());
        self.zones.hand = self.zones.library.drain(0..take).collect();
        let back = bottom_count.min(self.zones.hand.len());
        for _ in 0..back {
            if let Some(mut card) = self.zones.hand.pop() {
                card.reset_transient();
                self.zones.library.push(card);
            }
        }
    }

    pub fn shuffle_library(&mut self) {
        shuffle_cards(&mut self.zones.library, &mut self.rng);
        self.log.append(format!("{} shuffled the library.", self.actor()));
        self.commit_zones();
    }

    pub fn untap_all(&mut self) {
        for &kind in ZoneKind::ALL.iter() {
            for card in self.zones.get_mut(kind).iter_mut() {
                card.tapped = false;
            }
        }
        self.touch();
    }

    // ====== counters and turn order ======

    pub fn inc_life(&mut self, amount: i64) {
        self.life += amount;
        self.bump(StateChange::Mutated);
    }

    pub fn inc_poison(&mut self, amount: i64) {
        self.poison = (i64::from(self.poison) + amount).max(0) as u32;
        self.bump(StateChange::Mutated);
    }

    pub fn inc_commander_tax(&mut self, amount: i64) {
        self.commander_tax = (i64::from(self.commander_tax) + amount).max(0) as u32;
        self.bump(StateChange::Mutated);
    }

    pub fn inc_commander_damage(&mut self, opponent: &str, amount: i64) {
        let current = self.commander_damage.get(opponent).copied().unwrap_or(0);
        let next = (i64::from(current) + amount).max(0) as u32;
        if next == 0 {
            self.commander_damage.remove(opponent);
        } else {
            self.commander_damage.insert(opponent.to_string(), next);
        }
        self.bump(StateChange::Mutated);
    }

    /// Replace the turn order with the trimmed, non-empty names. An empty
    /// resulting list rejects the whole update.
    pub fn set_turn_order(&mut self, order: &[String]) {
        let cleaned: Vec<String> = order
            .iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        if cleaned.is_empty() {
            return;
        }
        self.current_turn = self.current_turn.min(cleaned.len() - 1);
        self.turn_order = cleaned;
        self.bump(StateChange::Mutated);
    }

    /// Advance the rotating turn pointer, wrapping at the end of the order.
    pub fn pass_turn(&mut self) {
        if self.turn_order.is_empty() {
            return;
        }
        self.current_turn = (self.current_turn + 1) % self.turn_order.len();
        let up_next = self.turn_order[self.current_turn].clone();
        self.log.append(format!("It is now {}'s turn.", up_next));
        self.bump(StateChange::TurnPassed);
    }

    /// Reset the session to a fresh deck: each non-commander entry explodes
    /// into `count` library copies (minimum one copy even for a zero or
    /// negative count), commanders go to the command zone inheriting an
    /// image from a case-insensitive name match, and every other zone is
    /// cleared.
    pub fn load_deck_from_names(&mut self, cards: &[DeckEntry], commanders: &[String]) {
        let commander_names: Vec<String> = commanders
            .iter()
            .map(|n| n.trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        let mut library = Vec::new();
        for entry in cards {
            if commander_names.contains(&entry.name.trim().to_lowercase()) {
                continue;
            }
            let copies = entry.count.max(1);
            for _ in 0..copies {
                library.push(Card {
                    name: entry.name.clone(),
                    image: entry.image.clone(),
                    ..Card::default()
                });
            }
        }
        let mut command = Vec::new();
        for name in commanders {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                continue;
            }
            let image = cards
                .iter()
                .find(|e| e.name.eq_ignore_ascii_case(trimmed))
                .and_then(|e| e.image.clone());
            command.push(Card {
                name: trimmed.to_string(),
                image,
                ..Card::default()
            });
        }
        let total = library.len() + command.len();
        self.zones = Zones {
            library,
            command,
            ..Zones::default()
        };
        self.log.append(format!(
            "{} loaded a new deck of {} cards.",
            self.actor(),
            total
        ));
        self.commit_zones();
    }

    // ====== seats and remote shadows ======

    /// Upsert the shadow record for a peer. Any *other* entry colliding on
    /// seat index, player key, or socket id is purged first so a reconnect
    /// under a new transport id cannot leave a ghost seat behind. Fields
    /// absent from `payload` retain their previous value; fields sent as
    /// explicit nulls are cleared.
    pub fn set_remote_seat(&mut self, id: &str, payload: &serde_json::Value) {
        let Some(obj) = payload.as_object() else {
            return;
        };
        let seat = obj.get("seat").and_then(serde_json::Value::as_i64);
        let player_key = obj
            .get("playerKey")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        let socket_id = obj
            .get("socketId")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        self.remote_seats.retain(|key, existing| {
            if key == id {
                return true;
            }
            let seat_clash = seat.is_some_and(|s| s >= 0 && i64::from(existing.seat) == s);
            let key_clash = player_key
                .as_deref()
                .is_some_and(|k| existing.player_key.as_deref() == Some(k));
            let socket_clash = socket_id
                .as_deref()
                .is_some_and(|s| existing.socket_id.as_deref() == Some(s));
            !(seat_clash || key_clash || socket_clash)
        });
        let mut entry = self
            .remote_seats
            .remove(id)
            .unwrap_or_else(|| RemoteSeat::with_id(id));
        super::snapshot::merge_remote_seat(&mut entry, obj);
        entry.id = id.to_string();
        entry.updated_at = now_millis();
        self.remote_seats.insert(id.to_string(), entry);
        self.bump(StateChange::Remote);
    }

    pub fn clear_remote_seat(&mut self, id: &str) {
        if self.remote_seats.remove(id).is_some() {
            self.bump(StateChange::Remote);
        }
    }

    pub fn clear_all_remote_seats(&mut self) {
        if !self.remote_seats.is_empty() {
            self.remote_seats.clear();
            self.bump(StateChange::Remote);
        }
    }

    /// Declare which seat is "mine" for future mirroring. Existing data is
    /// not moved between seats.
    pub fn set_my_seat(&mut self, index: i32) {
        self.my_seat = index;
        self.bump(StateChange::Mutated);
    }

    pub fn set_seats(&mut self, names: &[String]) {
        for (index, name) in names.iter().enumerate() {
            self.set_seat_name(index, name);
        }
    }

    /// Rename a seat, extending the players array and turn order to cover
    /// the index while preserving existing zone contents.
    pub fn set_seat_name(&mut self, index: usize, name: &str) {
        self.ensure_seat(index);
        self.players[index].name = name.to_string();
        while self.turn_order.len() <= index {
            let placeholder = format!("Player {}", self.turn_order.len() + 1);
            self.turn_order.push(placeholder);
        }
        self.turn_order[index] = name.to_string();
        if index == self.local_seat() {
            self.name = name.to_string();
        }
        self.bump(StateChange::Mutated);
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
        self.sync_seat();
        self.bump(StateChange::Mutated);
    }

    /// Toggle whether broadcast documents include hand contents.
    pub fn set_reveal_hand(&mut self, reveal: bool) {
        self.reveal_hand = reveal;
        self.bump(StateChange::Mutated);
    }

    pub fn set_playmat(&mut self, key: Option<String>) {
        self.playmat = key;
        self.sync_seat();
        self.bump(StateChange::Mutated);
    }

    pub fn set_life_theme(&mut self, image: Option<String>) {
        self.life_theme = image;
        self.sync_seat();
        self.bump(StateChange::Mutated);
    }

    pub fn append_log(&mut self, message: &str) {
        self.log.append(message);
        self.bump(StateChange::Mutated);
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
        self.bump(StateChange::Mutated);
    }

    /// Dispatch one wire action onto the matching mutation.
    pub fn apply(&mut self, action: TableAction) {
        match action {
            TableAction::Draw { count } => self.draw(count),
            TableAction::MoveCard { card_id, to, index } => self.move_card(card_id, to, index),
            TableAction::SetBattlefieldPos { card_id, x, y } => {
                self.set_battlefield_pos(card_id, x, y)
            }
            TableAction::ToggleTap { card_id } => self.toggle_tap(card_id),
            TableAction::IncCounter { card_id, delta } => self.inc_counter(card_id, delta),
            TableAction::ToggleLabel { card_id, label } => self.toggle_label(card_id, &label),
            TableAction::SetCustomText { card_id, text } => {
                self.set_card_custom_text(card_id, &text)
            }
            TableAction::MoveToLibraryTop { card_id } => self.move_any_to_library_top(card_id),
            TableAction::MoveToLibraryBottom { card_id } => {
                self.move_any_to_library_bottom(card_id)
            }
            TableAction::MoveTopLibraryToBottom => self.move_top_library_to_bottom(),
            TableAction::CloneCard { card_id } => self.clone_card(card_id),
            TableAction::AddToken { name, zone, image } => self.add_token(&name, zone, image),
            TableAction::DrawSeven => self.draw_seven(),
            TableAction::MulliganSevenForSeven => self.mulligan_seven_for_seven(),
            TableAction::MulliganLondon { bottom_count } => self.mulligan_london(bottom_count),
            TableAction::ShuffleLibrary => self.shuffle_library(),
            TableAction::UntapAll => self.untap_all(),
            TableAction::IncLife { amount } => self.inc_life(amount),
            TableAction::IncPoison { amount } => self.inc_poison(amount),
            TableAction::IncCommanderTax { amount } => self.inc_commander_tax(amount),
            TableAction::IncCommanderDamage { opponent, amount } => {
                self.inc_commander_damage(&opponent, amount)
            }
            TableAction::SetTurnOrder { order } => self.set_turn_order(&order),
            TableAction::PassTurn => self.pass_turn(),
            TableAction::SetMySeat { index } => self.set_my_seat(index),
            TableAction::SetSeatName { index, name } => self.set_seat_name(index, &name),
            TableAction::SetName { name } => self.set_name(&name),
            TableAction::RevealHand { reveal } => self.set_reveal_hand(reveal),
            TableAction::SetPlaymat { key } => self.set_playmat(key),
            TableAction::SetLifeTheme { image } => self.set_life_theme(image),
            TableAction::Log { message } => self.append_log(&message),
            TableAction::ClearLog => self.clear_log(),
        }
    }
}

/// Human-readable zone name for log entries.
fn zone_label(kind: ZoneKind) -> &'static str {
    match kind {
        ZoneKind::Library => "library",
        ZoneKind::Hand => "hand",
        ZoneKind::Battlefield => "battlefield",
        ZoneKind::Lands => "lands",
        ZoneKind::Graveyard => "graveyard",
        ZoneKind::Exile => "exile",
        ZoneKind::Command => "command zone",
    }
}
