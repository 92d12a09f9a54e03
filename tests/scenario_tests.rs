use cardtable::table::types::{DeckEntry, ZoneKind};
use cardtable::table::GameState;
use serde_json::json;

fn deck(entries: &[(&str, i32)]) -> Vec<DeckEntry> {
    entries
        .iter()
        .map(|(name, count)| DeckEntry {
            name: name.to_string(),
            count: *count,
            image: None,
        })
        .collect()
}

#[test]
fn draw_exhaustion_yields_a_partial_hand_and_names_both_cards() {
    let mut gs = GameState::with_seed(21);
    gs.load_deck_from_names(&deck(&[("Island", 1), ("Forest", 1)]), &[]);
    assert_eq!(gs.zones.library.len(), 2);

    gs.draw(7);
    assert_eq!(gs.zones.hand.len(), 2);
    assert!(gs.zones.library.is_empty());
    let entries = gs.log.entries();
    let message = &entries.last().unwrap().message;
    assert!(message.contains("Island"), "log was: {}", message);
    assert!(message.contains("Forest"), "log was: {}", message);
}

#[test]
fn draw_from_empty_library_is_valid_and_silent() {
    let mut gs = GameState::with_seed(21);
    gs.load_deck_from_names(&deck(&[("Island", 1)]), &[]);
    gs.draw(1);
    let log_len = gs.log.len();
    gs.draw(5);
    assert!(gs.zones.library.is_empty());
    assert_eq!(gs.zones.hand.len(), 1);
    assert_eq!(gs.log.len(), log_len);
}

#[test]
fn big_draw_logs_a_count_instead_of_names() {
    let mut gs = GameState::with_seed(21);
    gs.draw(5);
    let entries = gs.log.entries();
    let message = &entries.last().unwrap().message;
    assert!(message.contains("5 cards"), "log was: {}", message);
}

#[test]
fn london_mulligan_conserves_forty_and_keeps_five() {
    let mut gs = GameState::with_seed(21);
    // starter deck is exactly 40 cards; draw the opening seven
    gs.draw(7);
    assert_eq!(gs.zones.library.len(), 33);
    assert_eq!(gs.zones.hand.len(), 7);

    gs.mulligan_london(2);
    assert_eq!(gs.zones.hand.len(), 5);
    assert_eq!(gs.zones.library.len(), 35);
    assert_eq!(gs.zones.library.len() + gs.zones.hand.len(), 40);
}

#[test]
fn seven_for_seven_mulligan_reshuffles_the_full_deck() {
    let mut gs = GameState::with_seed(21);
    gs.draw(7);
    gs.mulligan_seven_for_seven();
    assert_eq!(gs.zones.hand.len(), 7);
    assert_eq!(gs.zones.library.len(), 33);
}

#[test]
fn mulligan_clears_positions_carried_by_hand_cards() {
    let mut gs = GameState::with_seed(21);
    gs.draw(7);
    let id = gs.zones.hand[0].id;
    gs.move_card(id, ZoneKind::Battlefield, None);
    gs.set_battlefield_pos(id, 300.0, 200.0);
    gs.move_card(id, ZoneKind::Hand, None);
    gs.mulligan_seven_for_seven();
    for card in gs.zones.library.iter().chain(gs.zones.hand.iter()) {
        assert_eq!(card.x, None);
        assert_eq!(card.y, None);
    }
}

#[test]
fn draw_seven_discards_the_old_hand_outright() {
    let mut gs = GameState::with_seed(21);
    gs.draw(7);
    let old_hand: Vec<u64> = gs.zones.hand.iter().map(|c| c.id).collect();
    gs.draw_seven();
    assert_eq!(gs.zones.hand.len(), 7);
    // the replaced hand is gone, not returned to the library
    assert_eq!(gs.zones.library.len(), 26);
    for id in old_hand {
        assert!(gs.zones.card(id).is_none());
    }
}

#[test]
fn deck_load_with_zero_count_yields_one_copy() {
    // Per-entry counts clamp to a minimum of one: a named entry always
    // materializes at least one physical card.
    let mut gs = GameState::with_seed(21);
    gs.load_deck_from_names(&deck(&[("Island", 0)]), &[]);
    assert_eq!(gs.zones.library.len(), 1);
    assert_eq!(gs.zones.library[0].name, "Island");

    gs.load_deck_from_names(&deck(&[("Island", -3), ("Forest", 2)]), &[]);
    assert_eq!(gs.zones.library.len(), 3);
}

#[test]
fn deck_load_clears_the_table() {
    let mut gs = GameState::with_seed(21);
    gs.draw(5);
    let id = gs.zones.hand[0].id;
    gs.move_card(id, ZoneKind::Battlefield, None);
    gs.load_deck_from_names(&deck(&[("Swamp", 4)]), &["Swamp Queen".to_string()]);
    assert!(gs.zones.hand.is_empty());
    assert!(gs.zones.battlefield.is_empty());
    assert!(gs.zones.graveyard.is_empty());
    assert_eq!(gs.zones.library.len(), 4);
    assert_eq!(gs.zones.command.len(), 1);
    assert_eq!(gs.zones.command[0].name, "Swamp Queen");
}

#[test]
fn remote_seat_collision_keeps_only_the_newest_transport_id() {
    let mut gs = GameState::with_seed(21);
    let payload = json!({
        "name": "Alice",
        "seat": 1,
        "playerKey": "pk-alice",
        "life": 38
    });
    gs.set_remote_seat("conn-1", &payload);
    assert_eq!(gs.remote_seats.len(), 1);

    // same logical identity reconnecting under a new transport id
    gs.set_remote_seat("conn-2", &payload);
    assert_eq!(gs.remote_seats.len(), 1);
    assert!(gs.remote_seats.contains_key("conn-2"));
    assert_eq!(gs.remote_seats["conn-2"].life, 38);
}

#[test]
fn remote_seat_partial_update_retains_and_null_clears() {
    let mut gs = GameState::with_seed(21);
    gs.set_remote_seat(
        "conn-1",
        &json!({
            "name": "Bob",
            "seat": 2,
            "playmat": "/img/mats/forest.jpg",
            "life": 35
        }),
    );
    // a later payload without those fields keeps them
    gs.set_remote_seat("conn-1", &json!({ "poison": 2 }));
    let seat = &gs.remote_seats["conn-1"];
    assert_eq!(seat.name, "Bob");
    assert_eq!(seat.life, 35);
    assert_eq!(seat.poison, 2);
    assert_eq!(seat.playmat.as_deref(), Some("/img/mats/forest.jpg"));

    // an explicit null clears
    gs.set_remote_seat("conn-1", &json!({ "playmat": null }));
    assert_eq!(gs.remote_seats["conn-1"].playmat, None);
}

#[test]
fn remote_seat_removal_on_departure() {
    let mut gs = GameState::with_seed(21);
    gs.set_remote_seat("conn-1", &json!({ "name": "Alice", "seat": 1 }));
    gs.set_remote_seat("conn-2", &json!({ "name": "Bob", "seat": 2 }));
    gs.clear_remote_seat("conn-1");
    assert_eq!(gs.remote_seats.len(), 1);
    gs.clear_all_remote_seats();
    assert!(gs.remote_seats.is_empty());
}

#[test]
fn remote_seats_are_never_touched_by_local_mutations() {
    let mut gs = GameState::with_seed(21);
    gs.set_remote_seat(
        "conn-1",
        &json!({ "name": "Alice", "seat": 1, "battlefield": [{"id": 900_000, "name": "Dragon"}] }),
    );
    let before = gs.remote_seats["conn-1"].clone();
    gs.draw(5);
    gs.shuffle_library();
    gs.inc_life(-4);
    assert_eq!(gs.remote_seats["conn-1"], before);
}
