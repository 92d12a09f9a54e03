use cardtable::rocket_initialize;
use rocket::http::uncased::Uncased;
use rocket::http::{Header, Status};
use rocket::local::blocking::Client;

use std::borrow::Cow;

fn json_header() -> Header<'static> {
    Header {
        name: Uncased::from("Content-Type"),
        value: Cow::from("application/json"),
    }
}

fn post_json<'a>(client: &'a Client, path: &str, body: &str) -> rocket::local::blocking::LocalResponse<'a> {
    client
        .post(path.to_string())
        .header(json_header())
        .body(body.to_string())
        .dispatch()
}

#[test]
fn table_action_draw_reports_the_new_hand() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    let response = post_json(
        &client,
        "/table/action",
        r#"{ "action_type": "Draw", "count": 3 }"#,
    );
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(body["hand"], serde_json::json!(3));
    assert_eq!(body["library"], serde_json::json!(37));
}

#[test]
fn table_action_with_stale_id_still_succeeds() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    let response = post_json(
        &client,
        "/table/action",
        r#"{ "action_type": "MoveCard", "card_id": 123456789, "to": "graveyard" }"#,
    );
    // unknown targets are silent no-ops, never endpoint failures
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(body["graveyard"], serde_json::json!(0));
}

#[test]
fn table_state_returns_a_full_document() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    post_json(&client, "/table/action", r#"{ "action_type": "Draw", "count": 2 }"#);
    let response = client.get("/table/state").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let doc: serde_json::Value = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(doc["zones"]["hand"].as_array().unwrap().len(), 2);
    assert_eq!(doc["life"], serde_json::json!(40));
    assert!(doc["playerKey"].as_str().unwrap().starts_with("pk-"));
}

#[test]
fn table_hydrate_applies_a_document_and_ignores_garbage() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    let response = post_json(&client, "/table/hydrate", r#"{ "life": 25 }"#);
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(body["life"], serde_json::json!(25));

    let response = post_json(&client, "/table/hydrate", r#""nonsense""#);
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(body["life"], serde_json::json!(25));
}

#[test]
fn table_log_pages_by_sequence() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    for _ in 0..3 {
        post_json(&client, "/table/action", r#"{ "action_type": "Draw", "count": 1 }"#);
    }
    let response = client.get("/table/log?from_seq=2").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["seq"], serde_json::json!(2));
}

#[test]
fn deck_import_replaces_the_library() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    let response = post_json(
        &client,
        "/table/deck",
        r#"{ "cards": [ { "name": "Swamp", "count": 10 }, { "name": "Nightmare", "count": 0 } ], "commanders": ["Nightmare"] }"#,
    );
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(body["library"], serde_json::json!(10));
    assert_eq!(body["command"], serde_json::json!(1));
}

#[test]
fn empty_deck_import_is_rejected() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    let response = post_json(&client, "/table/deck", r#"{ "cards": [] }"#);
    assert_eq!(response.status(), Status::BadRequest);
}

#[test]
fn room_state_round_trips_through_the_durable_store() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");

    // an unknown room yields a fresh empty document
    let response = client.get("/rooms/ABCD/state").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().unwrap(), "{}");

    let put = client
        .put("/rooms/ABCD/state")
        .header(json_header())
        .body(r#"{ "life": 17, "zones": {} }"#)
        .dispatch();
    assert_eq!(put.status(), Status::Ok);

    let response = client.get("/rooms/ABCD/state").dispatch();
    let doc: serde_json::Value = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(doc["life"], serde_json::json!(17));
}

#[test]
fn relay_join_state_and_leave() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");

    let response = post_json(&client, "/rooms/GAME/join", r#"{ "name": "Alice" }"#);
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    let id = body["id"].as_u64().unwrap();

    let state = post_json(
        &client,
        "/rooms/GAME/state",
        &format!(r#"{{ "from": {}, "snap": {{ "life": 40 }} }}"#, id),
    );
    assert_eq!(state.status(), Status::Ok);

    // a stranger id is rejected at the relay boundary
    let stranger = post_json(
        &client,
        "/rooms/GAME/state",
        r#"{ "from": 424242, "snap": {} }"#,
    );
    assert_eq!(stranger.status(), Status::BadRequest);

    // an unknown room is not found
    let lost = post_json(&client, "/rooms/NOPE/state", r#"{ "from": 1, "snap": {} }"#);
    assert_eq!(lost.status(), Status::NotFound);

    let leave = post_json(&client, "/rooms/GAME/leave", &format!(r#"{{ "id": {} }}"#, id));
    assert_eq!(leave.status(), Status::Ok);
}

#[test]
fn dice_rolls_need_a_member() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    let response = post_json(&client, "/rooms/DICE/join", r#"{ "name": "Bob" }"#);
    let body: serde_json::Value = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    let id = body["id"].as_u64().unwrap();

    let roll = post_json(
        &client,
        "/rooms/DICE/dice",
        &format!(r#"{{ "from": {}, "die": 20, "value": 17 }}"#, id),
    );
    assert_eq!(roll.status(), Status::Ok);

    let outsider = post_json(
        &client,
        "/rooms/DICE/dice",
        r#"{ "from": 99999, "die": 6, "value": 3 }"#,
    );
    assert_eq!(outsider.status(), Status::BadRequest);
}

#[test]
fn card_lookup_misses_are_not_found() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");

    let response = client.get("/cards/Island").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let info: serde_json::Value = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(info["name"], serde_json::json!("Island"));
    assert!(info["image"].as_str().is_some());

    let response = client.get("/cards/Unknown%20Card").dispatch();
    assert_eq!(response.status(), Status::NotFound);
}
