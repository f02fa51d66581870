//! Route table

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{auth, health, professor, student};
use crate::context::AppContext;

/// Build the application router with the shared context attached
#[must_use]
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/prof/set-availability", post(professor::set_availability))
        .route("/api/prof/get-availability", get(professor::get_availability))
        .route("/api/prof/get-appointments", get(professor::get_appointments))
        .route("/api/prof/my-appointments", get(professor::my_appointments))
        .route("/api/prof/cancel-appointment", post(professor::cancel_appointment))
        .route("/api/stud/slots/{prof_id}", get(student::open_slots))
        .route("/api/stud/book-appointment", post(student::book_appointment))
        .route("/api/stud/my-appointments", get(student::my_appointments))
        .with_state(ctx)
}
