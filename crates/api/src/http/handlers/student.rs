//! Student endpoints

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use crate::context::AppContext;
use crate::http::dto::{
    AppointmentsResponse, BookAppointmentRequest, BookedAppointmentDto, BookingResponse,
    OpenSlotsResponse, StudentAppointmentDto,
};
use crate::http::error::ApiResult;
use crate::http::extract::Identity;

/// `GET /api/stud/slots/{prof_id}`
pub async fn open_slots(
    State(ctx): State<Arc<AppContext>>,
    Identity(caller): Identity,
    Path(prof_id): Path<String>,
) -> ApiResult<Json<OpenSlotsResponse>> {
    let open = ctx.engine.open_slots(&caller, &prof_id, Utc::now()).await?;
    let message = if open.slots.is_empty() {
        "No available slots found"
    } else {
        "Available slots fetched successfully"
    };
    Ok(Json(OpenSlotsResponse {
        message: message.to_string(),
        available_slots: open.slots,
        professor: open.professor,
    }))
}

/// `POST /api/stud/book-appointment`
pub async fn book_appointment(
    State(ctx): State<Arc<AppContext>>,
    Identity(caller): Identity,
    Json(body): Json<BookAppointmentRequest>,
) -> ApiResult<(StatusCode, Json<BookingResponse>)> {
    let confirmation = ctx
        .engine
        .reserve(
            &caller,
            body.prof_id.as_deref().unwrap_or(""),
            body.date.as_deref().unwrap_or(""),
            body.time.as_deref().unwrap_or(""),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            message: "Appointment booked successfully".to_string(),
            appointment: BookedAppointmentDto::from_confirmation(confirmation),
        }),
    ))
}

/// `GET /api/stud/my-appointments`
pub async fn my_appointments(
    State(ctx): State<Arc<AppContext>>,
    Identity(caller): Identity,
) -> ApiResult<Json<AppointmentsResponse<StudentAppointmentDto>>> {
    let views = ctx.engine.appointments_for_student(&caller).await?;
    let message = if views.is_empty() {
        "You have no appointments"
    } else {
        "Appointments fetched successfully"
    };
    Ok(Json(AppointmentsResponse {
        message: message.to_string(),
        appointments: views
            .into_iter()
            .map(StudentAppointmentDto::from_view)
            .collect(),
    }))
}
