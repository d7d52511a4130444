//! Reservation-scoped room search tests.

mod common;

use chrono::NaiveDate;
use common::TestApp;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

#[tokio::test]
async fn empty_query_returns_every_linked_room() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let (guest_id, _) = app.create_guest("Ivy Kanda").await;
    let reservation_id = app
        .insert_reservation(guest_id, "301", date(1), date(3))
        .await;

    let room_a = app.insert_room("301", "Standard Room", 100).await;
    let room_b = app.insert_room("302", "Deluxe Room", 150).await;
    // Linked to the reservation
    app.link_reservation_room(reservation_id, room_a).await;
    app.link_reservation_room(reservation_id, room_b).await;
    // Exists but not linked
    app.insert_room("303", "Suite", 300).await;

    let response = app
        .client
        .get(format!(
            "{}/reservations/{}/rooms",
            app.address, reservation_id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    let rooms = body["rooms"].as_array().unwrap();
    assert_eq!(rooms.len(), 2);
    let numbers: Vec<&str> = rooms
        .iter()
        .map(|r| r["room_number"].as_str().unwrap())
        .collect();
    assert!(numbers.contains(&"301"));
    assert!(numbers.contains(&"302"));
    assert!(!numbers.contains(&"303"));

    app.cleanup().await;
}

#[tokio::test]
async fn query_filters_by_room_number_substring() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let (guest_id, _) = app.create_guest("Jabu Langa").await;
    let reservation_id = app
        .insert_reservation(guest_id, "410", date(5), date(6))
        .await;

    let room_a = app.insert_room("410", "Standard Room", 100).await;
    let room_b = app.insert_room("520", "Deluxe Room", 150).await;
    app.link_reservation_room(reservation_id, room_a).await;
    app.link_reservation_room(reservation_id, room_b).await;

    let response = app
        .client
        .get(format!(
            "{}/reservations/{}/rooms?query=41",
            app.address, reservation_id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    let rooms = body["rooms"].as_array().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["room_number"], "410");
    assert_eq!(rooms[0]["room_type"], "Standard Room");

    app.cleanup().await;
}

#[tokio::test]
async fn query_matches_room_id_text() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let (guest_id, _) = app.create_guest("Kuda Mhlanga").await;
    let reservation_id = app
        .insert_reservation(guest_id, "601", date(10), date(11))
        .await;

    let room_a = app.insert_room("601", "Suite", 300).await;
    let room_b = app.insert_room("602", "Suite", 300).await;
    app.link_reservation_room(reservation_id, room_a).await;
    app.link_reservation_room(reservation_id, room_b).await;

    // A room id is unique, so querying for its full text yields one row.
    let response = app
        .client
        .get(format!(
            "{}/reservations/{}/rooms?query={}",
            app.address, reservation_id, room_b
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    let rooms = body["rooms"].as_array().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["room_id"], room_b.to_string());

    app.cleanup().await;
}
