//! Appointment booking service - core business logic

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::debug;
use tutorium_domain::{
    Appointment, AppointmentStatus, AppointmentView, BookingConfirmation, OpenSlots, Principal,
    PublicIdentity, Result, Role, SlotView, TutoriumError,
};
use uuid::Uuid;

use super::ports::{AppointmentStore, AvailabilityStore};
use crate::access::require_role;
use crate::identity::ports::PrincipalDirectory;

/// Which side of an appointment the caller wants resolved
#[derive(Clone, Copy)]
enum CounterpartSide {
    Student,
    Professor,
}

/// Appointment booking service
pub struct ReservationEngine {
    directory: Arc<dyn PrincipalDirectory>,
    availability: Arc<dyn AvailabilityStore>,
    appointments: Arc<dyn AppointmentStore>,
}

impl ReservationEngine {
    /// Create a new reservation engine
    pub fn new(
        directory: Arc<dyn PrincipalDirectory>,
        availability: Arc<dyn AvailabilityStore>,
        appointments: Arc<dyn AppointmentStore>,
    ) -> Self {
        Self { directory, availability, appointments }
    }

    /// Open slots of a professor as seen by the calling student
    ///
    /// Declared instants minus the instants held by confirmed
    /// appointments, future-only, ascending.
    pub async fn open_slots(
        &self,
        caller: &Principal,
        professor_id: &str,
        as_of: DateTime<Utc>,
    ) -> Result<OpenSlots> {
        require_role(caller, Role::Student)?;
        let professor = self.resolve_professor(professor_id).await?;

        let declared = self.availability.get_slots(&professor.id).await?;
        let booked: HashSet<i64> = self
            .appointments
            .get_confirmed_for_professor(&professor.id)
            .await?
            .iter()
            .map(|appointment| appointment.time_slot.timestamp())
            .collect();

        let mut open: Vec<DateTime<Utc>> = declared
            .into_iter()
            .filter(|slot| *slot > as_of && !booked.contains(&slot.timestamp()))
            .collect();
        open.sort_unstable();

        Ok(OpenSlots {
            professor: professor.public_identity(),
            slots: open.into_iter().map(SlotView::from_instant).collect(),
        })
    }

    /// Reserve a professor's slot for the calling student
    ///
    /// The slot does not have to be declared: a booking at any free
    /// instant of an existing professor is accepted.
    pub async fn reserve(
        &self,
        caller: &Principal,
        professor_id: &str,
        date: &str,
        time: &str,
    ) -> Result<BookingConfirmation> {
        require_role(caller, Role::Student)?;
        let instant = combine_date_time(date, time)?;
        let professor = self.resolve_professor(professor_id).await?;

        if self
            .appointments
            .get_confirmed_at(&professor.id, instant)
            .await?
            .is_some()
        {
            return Err(TutoriumError::Conflict("Slot already booked".to_string()));
        }

        let now = Utc::now().timestamp();
        let appointment = Appointment {
            id: Uuid::new_v4().to_string(),
            student_id: caller.id.clone(),
            professor_id: professor.id.clone(),
            time_slot: instant,
            status: AppointmentStatus::Confirmed,
            created_at: now,
            updated_at: now,
        };
        let appointment_id = appointment.id.clone();

        // The store enforces one confirmed appointment per slot, so a
        // concurrent reservation that slips past the check above still
        // loses here.
        self.appointments.create(appointment).await.map_err(|err| match err {
            TutoriumError::Conflict(_) => TutoriumError::Conflict("Slot already booked".to_string()),
            other => other,
        })?;

        debug!(appointment_id = %appointment_id, professor_id = %professor.id, "appointment booked");

        Ok(BookingConfirmation {
            appointment_id,
            student: caller.public_identity(),
            professor: professor.public_identity(),
            time_slot: instant,
            status: AppointmentStatus::Confirmed,
        })
    }

    /// Cancel an appointment owned by the calling professor
    ///
    /// Cancellation is terminal: a cancelled appointment stays cancelled,
    /// and the instant it held becomes bookable again.
    pub async fn cancel(&self, caller: &Principal, appointment_id: &str) -> Result<()> {
        require_role(caller, Role::Professor)?;
        if appointment_id.trim().is_empty() {
            return Err(TutoriumError::InvalidInput(
                "Appointment ID is required".to_string(),
            ));
        }

        let appointment = self
            .appointments
            .get_by_id(appointment_id)
            .await?
            .ok_or_else(|| TutoriumError::NotFound("Appointment not found".to_string()))?;

        if appointment.professor_id != caller.id {
            return Err(TutoriumError::Forbidden(
                "You can only cancel your own appointments".to_string(),
            ));
        }
        if appointment.status == AppointmentStatus::Cancelled {
            return Err(TutoriumError::Conflict(
                "Appointment already cancelled".to_string(),
            ));
        }

        let cancelled = self
            .appointments
            .cancel(appointment_id, Utc::now().timestamp())
            .await?;
        if !cancelled {
            // A concurrent cancellation observed the transition first.
            return Err(TutoriumError::Conflict(
                "Appointment already cancelled".to_string(),
            ));
        }

        debug!(appointment_id = %appointment_id, "appointment cancelled");
        Ok(())
    }

    /// All appointments of the calling professor, newest slot first
    pub async fn appointments_for_professor(
        &self,
        caller: &Principal,
    ) -> Result<Vec<AppointmentView>> {
        require_role(caller, Role::Professor)?;
        let records = self.appointments.get_for_professor(&caller.id).await?;
        self.attach_counterparts(records, CounterpartSide::Student).await
    }

    /// All appointments of the calling student, newest slot first
    pub async fn appointments_for_student(
        &self,
        caller: &Principal,
    ) -> Result<Vec<AppointmentView>> {
        require_role(caller, Role::Student)?;
        let records = self.appointments.get_for_student(&caller.id).await?;
        self.attach_counterparts(records, CounterpartSide::Professor).await
    }

    /// Confirmed appointments of the calling professor at or after `as_of`
    pub async fn upcoming_for_professor(
        &self,
        caller: &Principal,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<AppointmentView>> {
        require_role(caller, Role::Professor)?;
        let records = self
            .appointments
            .get_upcoming_for_professor(&caller.id, as_of)
            .await?;
        self.attach_counterparts(records, CounterpartSide::Student).await
    }

    async fn resolve_professor(&self, id: &str) -> Result<Principal> {
        self.directory
            .get_by_id(id)
            .await?
            .filter(|principal| principal.role == Role::Professor)
            .ok_or_else(|| TutoriumError::NotFound("Professor not found".to_string()))
    }

    async fn attach_counterparts(
        &self,
        records: Vec<Appointment>,
        side: CounterpartSide,
    ) -> Result<Vec<AppointmentView>> {
        let mut identities: HashMap<String, PublicIdentity> = HashMap::new();
        let mut views = Vec::with_capacity(records.len());
        for record in records {
            let counterpart_id = match side {
                CounterpartSide::Student => record.student_id.clone(),
                CounterpartSide::Professor => record.professor_id.clone(),
            };
            let identity = if let Some(identity) = identities.get(&counterpart_id) {
                identity.clone()
            } else {
                let principal = self
                    .directory
                    .get_by_id(&counterpart_id)
                    .await?
                    .ok_or_else(|| {
                        TutoriumError::Internal(format!(
                            "appointment {} references missing account {}",
                            record.id, counterpart_id
                        ))
                    })?;
                let identity = principal.public_identity();
                identities.insert(counterpart_id, identity.clone());
                identity
            };
            views.push(AppointmentView {
                id: record.id,
                counterpart: identity,
                time_slot: record.time_slot,
                status: record.status,
            });
        }
        Ok(views)
    }
}

/// Combine `YYYY-MM-DD` and a wall-clock time into one UTC instant
///
/// Seconds may be omitted in the time part.
fn combine_date_time(date: &str, time: &str) -> Result<DateTime<Utc>> {
    let invalid = || TutoriumError::InvalidInput("Invalid date or time format".to_string());
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map_err(|_| invalid())?;
    Ok(date.and_time(time).and_utc())
}
