//! Professor endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use tutorium_domain::AppointmentView;

use crate::context::AppContext;
use crate::http::dto::{
    AppointmentsResponse, AvailabilityResponse, CancelAppointmentRequest, MessageResponse,
    ProfessorAppointmentDto, SetAvailabilityRequest,
};
use crate::http::error::ApiResult;
use crate::http::extract::Identity;

/// `POST /api/prof/set-availability`
pub async fn set_availability(
    State(ctx): State<Arc<AppContext>>,
    Identity(caller): Identity,
    Json(body): Json<SetAvailabilityRequest>,
) -> ApiResult<Json<AvailabilityResponse>> {
    let slots = ctx.ledger.declare(&caller, &body.availability).await?;
    Ok(Json(AvailabilityResponse {
        message: "Availability set successfully".to_string(),
        availability: slots,
    }))
}

/// `GET /api/prof/get-availability`
pub async fn get_availability(
    State(ctx): State<Arc<AppContext>>,
    Identity(caller): Identity,
) -> ApiResult<Json<AvailabilityResponse>> {
    let slots = ctx.ledger.list(&caller).await?;
    let message = if slots.is_empty() {
        "You have not set any availability"
    } else {
        "Availability fetched successfully"
    };
    Ok(Json(AvailabilityResponse {
        message: message.to_string(),
        availability: slots,
    }))
}

/// `GET /api/prof/get-appointments`
///
/// Every appointment ever made with this professor, cancelled ones
/// included.
pub async fn get_appointments(
    State(ctx): State<Arc<AppContext>>,
    Identity(caller): Identity,
) -> ApiResult<Json<AppointmentsResponse<ProfessorAppointmentDto>>> {
    let views = ctx.engine.appointments_for_professor(&caller).await?;
    Ok(Json(appointments_response(views)))
}

/// `GET /api/prof/my-appointments`
///
/// Only confirmed appointments at or after the current instant.
pub async fn my_appointments(
    State(ctx): State<Arc<AppContext>>,
    Identity(caller): Identity,
) -> ApiResult<Json<AppointmentsResponse<ProfessorAppointmentDto>>> {
    let views = ctx.engine.upcoming_for_professor(&caller, Utc::now()).await?;
    Ok(Json(appointments_response(views)))
}

/// `POST /api/prof/cancel-appointment`
pub async fn cancel_appointment(
    State(ctx): State<Arc<AppContext>>,
    Identity(caller): Identity,
    Json(body): Json<CancelAppointmentRequest>,
) -> ApiResult<Json<MessageResponse>> {
    ctx.engine.cancel(&caller, &body.appointment_id).await?;
    Ok(Json(MessageResponse {
        message: "Appointment cancelled successfully".to_string(),
    }))
}

fn appointments_response(
    views: Vec<AppointmentView>,
) -> AppointmentsResponse<ProfessorAppointmentDto> {
    let message = if views.is_empty() {
        "You have no appointments"
    } else {
        "Appointments fetched successfully"
    };
    AppointmentsResponse {
        message: message.to_string(),
        appointments: views
            .into_iter()
            .map(ProfessorAppointmentDto::from_view)
            .collect(),
    }
}
