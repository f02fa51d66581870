//! End-to-end booking lifecycle across both roles

use axum::http::StatusCode;
use serde_json::json;

mod support;

use support::{register_professor, register_student, spawn_app};

#[tokio::test(flavor = "multi_thread")]
async fn booking_lifecycle_end_to_end() {
    let app = spawn_app();
    let (prof_id, prof_token) = register_professor(&app, "Prof", "prof@example.edu").await;
    let (_, alice_token) = register_student(&app, "Alice", "alice@example.edu").await;
    let (_, bob_token) = register_student(&app, "Bob", "bob@example.edu").await;

    // Professor publishes two instants.
    let (status, _) = app
        .post_json(
            "/api/prof/set-availability",
            Some(&prof_token),
            &json!({
                "availability": ["2030-05-10T10:00:00Z", "2030-05-10T11:00:00Z"],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Alice books the earlier one.
    let (status, body) = app
        .post_json(
            "/api/stud/book-appointment",
            Some(&alice_token),
            &json!({ "profId": prof_id, "date": "2030-05-10", "time": "10:00" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let appointment_id = body["appointment"]["id"].as_str().unwrap().to_string();

    // The booked instant disappears from the open slots.
    let (_, body) = app
        .get(&format!("/api/stud/slots/{prof_id}"), Some(&bob_token))
        .await;
    let slots = body["availableSlots"].as_array().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["time"], "11:00:00");

    // The professor sees the booking in the upcoming listing.
    let (_, body) = app.get("/api/prof/my-appointments", Some(&prof_token)).await;
    let upcoming = body["appointments"].as_array().unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0]["student"]["email"], "alice@example.edu");

    // Cancelling frees the instant again.
    let (status, _) = app
        .post_json(
            "/api/prof/cancel-appointment",
            Some(&prof_token),
            &json!({ "appointmentId": appointment_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/prof/my-appointments", Some(&prof_token)).await;
    assert!(body["appointments"].as_array().unwrap().is_empty());

    let (_, body) = app
        .get(&format!("/api/stud/slots/{prof_id}"), Some(&bob_token))
        .await;
    assert_eq!(body["availableSlots"].as_array().unwrap().len(), 2);

    // Alice keeps the cancelled appointment in her history.
    let (_, body) = app.get("/api/stud/my-appointments", Some(&alice_token)).await;
    let history = body["appointments"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["status"], "cancelled");

    // Bob can book the freed instant.
    let (status, _) = app
        .post_json(
            "/api/stud/book-appointment",
            Some(&bob_token),
            &json!({ "profId": prof_id, "date": "2030-05-10", "time": "10:00" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_bookings_of_one_slot_have_a_single_winner() {
    let app = spawn_app();
    let (prof_id, prof_token) = register_professor(&app, "Prof", "prof@example.edu").await;
    let (_, alice_token) = register_student(&app, "Alice", "alice@example.edu").await;
    let (_, bob_token) = register_student(&app, "Bob", "bob@example.edu").await;

    let slot = json!({ "profId": prof_id, "date": "2030-05-10", "time": "10:00" });
    let ((alice_status, _), (bob_status, _)) = tokio::join!(
        app.post_json("/api/stud/book-appointment", Some(&alice_token), &slot),
        app.post_json("/api/stud/book-appointment", Some(&bob_token), &slot),
    );

    let mut statuses = [alice_status, bob_status];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);

    // Exactly one appointment was persisted for the instant.
    let (_, body) = app.get("/api/prof/get-appointments", Some(&prof_token)).await;
    let appointments = body["appointments"].as_array().unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0]["status"], "confirmed");
}
