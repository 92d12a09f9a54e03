use cardtable::table::types::{ZoneKind, Zones};
use cardtable::table::zones::count_occurrences;
use cardtable::table::GameState;

fn total_cards(zones: &Zones) -> usize {
    zones.total_cards()
}

#[test]
fn move_card_conserves_total_count() {
    let mut gs = GameState::with_seed(3);
    let before = total_cards(&gs.zones);
    let id = gs.zones.library[0].id;
    gs.move_card(id, ZoneKind::Battlefield, None);
    gs.move_card(id, ZoneKind::Graveyard, None);
    gs.move_card(id, ZoneKind::Hand, None);
    assert_eq!(total_cards(&gs.zones), before);
    assert_eq!(count_occurrences(&gs.zones, id), 1);
}

#[test]
fn move_card_with_unknown_id_is_a_silent_no_op() {
    let mut gs = GameState::with_seed(3);
    let before = gs.zones.clone();
    let log_before = gs.log.len();
    gs.move_card(987_654_321, ZoneKind::Graveyard, None);
    assert_eq!(gs.zones, before);
    assert_eq!(gs.log.len(), log_before);
}

#[test]
fn leaving_battlefield_clears_position_and_tap() {
    let mut gs = GameState::with_seed(3);
    let id = gs.zones.library[0].id;
    gs.move_card(id, ZoneKind::Battlefield, None);
    gs.set_battlefield_pos(id, 120.0, 80.0);
    gs.toggle_tap(id);
    let card = gs.zones.card(id).unwrap();
    assert!(card.tapped);
    assert_eq!(card.x, Some(120.0));

    gs.move_card(id, ZoneKind::Graveyard, None);
    let card = gs.zones.card(id).unwrap();
    assert!(!card.tapped);
    assert_eq!(card.x, None);
    assert_eq!(card.y, None);
}

#[test]
fn set_battlefield_pos_is_a_no_op_off_battlefield() {
    let mut gs = GameState::with_seed(3);
    let id = gs.zones.library[0].id;
    gs.set_battlefield_pos(id, 5.0, 5.0);
    let card = gs.zones.card(id).unwrap();
    assert_eq!(card.x, None);
}

#[test]
fn token_leaving_battlefield_is_deleted() {
    let mut gs = GameState::with_seed(3);
    let before = total_cards(&gs.zones);
    gs.add_token("Goblin", ZoneKind::Battlefield, None);
    assert_eq!(total_cards(&gs.zones), before + 1);
    let id = gs.zones.battlefield.last().unwrap().id;

    gs.move_card(id, ZoneKind::Graveyard, None);
    assert_eq!(count_occurrences(&gs.zones, id), 0);
    assert_eq!(total_cards(&gs.zones), before);
    let log = gs.log.entries();
    assert!(log.last().unwrap().message.contains("token"));
}

#[test]
fn token_reposition_on_battlefield_survives() {
    let mut gs = GameState::with_seed(3);
    gs.add_token("Goblin", ZoneKind::Battlefield, None);
    let id = gs.zones.battlefield.last().unwrap().id;
    gs.move_card(id, ZoneKind::Battlefield, Some(0));
    assert_eq!(count_occurrences(&gs.zones, id), 1);
}

#[test]
fn clone_does_not_chain() {
    let mut gs = GameState::with_seed(3);
    let a = gs.zones.library[0].id;
    gs.move_card(a, ZoneKind::Battlefield, None);
    gs.set_battlefield_pos(a, 10.0, 10.0);

    gs.clone_card(a);
    let b = gs.zones.battlefield[1].id;
    assert_eq!(gs.zones.battlefield[1].clone_of, Some(a));
    // the clone is offset so it doesn't cover its source
    assert_ne!(gs.zones.battlefield[1].x, gs.zones.battlefield[0].x);

    gs.clone_card(b);
    let c = &gs.zones.battlefield[2];
    assert_ne!(c.id, b);
    assert_eq!(c.clone_of, Some(a));
}

#[test]
fn clone_adds_exactly_one_card() {
    let mut gs = GameState::with_seed(3);
    let before = total_cards(&gs.zones);
    let id = gs.zones.library[0].id;
    gs.clone_card(id);
    assert_eq!(total_cards(&gs.zones), before + 1);
}

#[test]
fn library_top_and_bottom_moves() {
    let mut gs = GameState::with_seed(3);
    let id = gs.zones.library[5].id;
    gs.move_any_to_library_top(id);
    assert_eq!(gs.zones.library[0].id, id);

    gs.move_any_to_library_bottom(id);
    assert_eq!(gs.zones.library.last().unwrap().id, id);
    assert_eq!(count_occurrences(&gs.zones, id), 1);
}

#[test]
fn move_top_library_to_bottom_rotates() {
    let mut gs = GameState::with_seed(3);
    let top = gs.zones.library[0].id;
    let second = gs.zones.library[1].id;
    gs.move_top_library_to_bottom();
    assert_eq!(gs.zones.library[0].id, second);
    assert_eq!(gs.zones.library.last().unwrap().id, top);
}

#[test]
fn untap_all_clears_every_zone() {
    let mut gs = GameState::with_seed(3);
    let a = gs.zones.library[0].id;
    let b = gs.zones.library[1].id;
    gs.move_card(a, ZoneKind::Battlefield, None);
    gs.move_card(b, ZoneKind::Lands, None);
    gs.toggle_tap(a);
    gs.toggle_tap(b);
    gs.untap_all();
    assert!(!gs.zones.card(a).unwrap().tapped);
    assert!(!gs.zones.card(b).unwrap().tapped);
}

#[test]
fn life_is_unclamped_but_poison_and_tax_floor_at_zero() {
    let mut gs = GameState::with_seed(3);
    gs.inc_life(-50);
    assert_eq!(gs.life, -10);
    gs.inc_poison(3);
    gs.inc_poison(-7);
    assert_eq!(gs.poison, 0);
    gs.inc_commander_tax(2);
    gs.inc_commander_tax(-5);
    assert_eq!(gs.commander_tax, 0);
}

#[test]
fn commander_damage_is_per_opponent_and_non_negative() {
    let mut gs = GameState::with_seed(3);
    gs.inc_commander_damage("pk-alice", 5);
    gs.inc_commander_damage("pk-bob", 2);
    assert_eq!(gs.commander_damage.get("pk-alice"), Some(&5));
    gs.inc_commander_damage("pk-alice", -9);
    assert!(!gs.commander_damage.contains_key("pk-alice"));
    assert_eq!(gs.commander_damage.get("pk-bob"), Some(&2));
}

#[test]
fn set_turn_order_rejects_empty_and_clamps_pointer() {
    let mut gs = GameState::with_seed(3);
    gs.set_turn_order(&["Alice".to_string(), "Bob".to_string(), "Cora".to_string()]);
    gs.pass_turn();
    gs.pass_turn();
    assert_eq!(gs.current_turn, 2);

    gs.set_turn_order(&["  ".to_string(), "".to_string()]);
    // whitespace-only names reject the whole update
    assert_eq!(gs.turn_order.len(), 3);

    gs.set_turn_order(&["Alice".to_string(), "Bob".to_string()]);
    assert_eq!(gs.current_turn, 1);
}

#[test]
fn pass_turn_wraps_and_logs() {
    let mut gs = GameState::with_seed(3);
    gs.set_turn_order(&["Alice".to_string(), "Bob".to_string()]);
    gs.pass_turn();
    gs.pass_turn();
    assert_eq!(gs.current_turn, 0);
    let log = gs.log.entries();
    assert!(log.last().unwrap().message.contains("Alice"));
    // empty order: no-op, no wrap-around panic
    let mut empty = GameState::with_seed(4);
    empty.pass_turn();
    assert_eq!(empty.current_turn, 0);
}

#[test]
fn uniqueness_holds_across_a_mutation_storm() {
    let mut gs = GameState::with_seed(9);
    gs.draw(5);
    let hand_ids: Vec<u64> = gs.zones.hand.iter().map(|c| c.id).collect();
    for (i, id) in hand_ids.iter().enumerate() {
        let target = match i % 4 {
            0 => ZoneKind::Battlefield,
            1 => ZoneKind::Lands,
            2 => ZoneKind::Graveyard,
            _ => ZoneKind::Exile,
        };
        gs.move_card(*id, target, None);
    }
    gs.shuffle_library();
    gs.move_top_library_to_bottom();
    if let Some(id) = hand_ids.first() {
        gs.clone_card(*id);
        gs.move_any_to_library_top(*id);
    }
    let mut all_ids = Vec::new();
    for (_, cards) in gs.zones.iter() {
        for card in cards {
            all_ids.push(card.id);
        }
    }
    let unique: std::collections::HashSet<u64> = all_ids.iter().copied().collect();
    assert_eq!(unique.len(), all_ids.len());
}

#[test]
fn seat_zero_mirrors_zones_after_every_mutation() {
    let mut gs = GameState::with_seed(9);
    gs.draw(3);
    let id = gs.zones.hand[0].id;
    gs.move_card(id, ZoneKind::Battlefield, None);
    assert_eq!(gs.players[0].battlefield, gs.zones.battlefield);
    assert_eq!(gs.players[0].hand, gs.zones.hand);

    gs.set_my_seat(2);
    gs.draw(1);
    // both the legacy seat 0 and the declared seat mirror the zones
    assert_eq!(gs.players[0].hand, gs.zones.hand);
    assert_eq!(gs.players[2].hand, gs.zones.hand);
}

#[test]
fn set_seat_name_extends_players_and_turn_order() {
    let mut gs = GameState::with_seed(9);
    gs.set_seat_name(2, "Cora");
    assert_eq!(gs.players.len(), 3);
    assert_eq!(gs.players[2].name, "Cora");
    assert_eq!(gs.turn_order.len(), 3);
    assert_eq!(gs.turn_order[2], "Cora");
    // placeholder names cover the seats in between
    assert_eq!(gs.turn_order[1], "Player 2");
}
