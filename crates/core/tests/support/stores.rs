//! Mock store implementations for testing
//!
//! Provides in-memory mocks for all scheduling ports, enabling
//! deterministic unit tests without database dependencies. The mocks
//! enforce the same uniqueness rules as the SQLite implementations.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tutorium_core::identity::ports::PrincipalDirectory;
use tutorium_core::scheduling::ports::{AppointmentStore, AvailabilityStore};
use tutorium_domain::{
    Appointment, AppointmentStatus, Principal, Result as DomainResult, TutoriumError,
};

/// In-memory mock for `PrincipalDirectory`.
///
/// Enforces email uniqueness the way the SQLite repository does.
#[derive(Default, Clone)]
pub struct MockPrincipalDirectory {
    principals: Arc<Mutex<Vec<Principal>>>,
}

impl MockPrincipalDirectory {
    /// Create a new mock seeded with the provided principals.
    pub fn new(principals: Vec<Principal>) -> Self {
        Self { principals: Arc::new(Mutex::new(principals)) }
    }

    /// Convenience helper for adding a single principal to the mock.
    pub fn with_principal(self, principal: Principal) -> Self {
        self.principals.lock().unwrap().push(principal);
        self
    }
}

#[async_trait]
impl PrincipalDirectory for MockPrincipalDirectory {
    async fn get_by_id(&self, id: &str) -> DomainResult<Option<Principal>> {
        Ok(self
            .principals
            .lock()
            .unwrap()
            .iter()
            .find(|principal| principal.id == id)
            .cloned())
    }

    async fn get_by_email(&self, email: &str) -> DomainResult<Option<Principal>> {
        Ok(self
            .principals
            .lock()
            .unwrap()
            .iter()
            .find(|principal| principal.email == email)
            .cloned())
    }

    async fn create(&self, principal: Principal) -> DomainResult<()> {
        let mut principals = self.principals.lock().unwrap();
        if principals.iter().any(|existing| existing.email == principal.email) {
            return Err(TutoriumError::Conflict(
                "unique constraint violation".to_string(),
            ));
        }
        principals.push(principal);
        Ok(())
    }
}

/// In-memory mock for `AvailabilityStore`.
///
/// Keeps instants per professor in insertion order and ignores
/// re-inserted instants, matching the SQLite `INSERT OR IGNORE`.
#[derive(Default, Clone)]
pub struct MockAvailabilityStore {
    slots: Arc<Mutex<HashMap<String, Vec<DateTime<Utc>>>>>,
}

impl MockAvailabilityStore {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience helper for seeding slots for a professor.
    pub fn with_slots(self, professor_id: &str, instants: Vec<DateTime<Utc>>) -> Self {
        self.slots
            .lock()
            .unwrap()
            .entry(professor_id.to_string())
            .or_default()
            .extend(instants);
        self
    }
}

#[async_trait]
impl AvailabilityStore for MockAvailabilityStore {
    async fn get_slots(&self, professor_id: &str) -> DomainResult<Vec<DateTime<Utc>>> {
        Ok(self
            .slots
            .lock()
            .unwrap()
            .get(professor_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_slots(&self, professor_id: &str, slots: &[DateTime<Utc>]) -> DomainResult<()> {
        let mut all = self.slots.lock().unwrap();
        let entry = all.entry(professor_id.to_string()).or_default();
        for slot in slots {
            if !entry.contains(slot) {
                entry.push(*slot);
            }
        }
        Ok(())
    }
}

/// In-memory mock for `AppointmentStore`.
///
/// Enforces the one-confirmed-appointment-per-slot rule and the
/// confirmed-to-cancelled transition the way the SQLite repository does.
#[derive(Default, Clone)]
pub struct MockAppointmentStore {
    appointments: Arc<Mutex<Vec<Appointment>>>,
}

impl MockAppointmentStore {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience helper for seeding a single appointment.
    pub fn with_appointment(self, appointment: Appointment) -> Self {
        self.appointments.lock().unwrap().push(appointment);
        self
    }

    /// Snapshot of everything stored, for assertions.
    pub fn all(&self) -> Vec<Appointment> {
        self.appointments.lock().unwrap().clone()
    }
}

#[async_trait]
impl AppointmentStore for MockAppointmentStore {
    async fn create(&self, appointment: Appointment) -> DomainResult<()> {
        let mut appointments = self.appointments.lock().unwrap();
        let slot_taken = appointments.iter().any(|existing| {
            existing.professor_id == appointment.professor_id
                && existing.time_slot == appointment.time_slot
                && existing.status == AppointmentStatus::Confirmed
        });
        if slot_taken {
            return Err(TutoriumError::Conflict(
                "unique constraint violation".to_string(),
            ));
        }
        appointments.push(appointment);
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Option<Appointment>> {
        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .find(|appointment| appointment.id == id)
            .cloned())
    }

    async fn get_confirmed_at(
        &self,
        professor_id: &str,
        time_slot: DateTime<Utc>,
    ) -> DomainResult<Option<Appointment>> {
        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .find(|appointment| {
                appointment.professor_id == professor_id
                    && appointment.time_slot == time_slot
                    && appointment.status == AppointmentStatus::Confirmed
            })
            .cloned())
    }

    async fn get_confirmed_for_professor(
        &self,
        professor_id: &str,
    ) -> DomainResult<Vec<Appointment>> {
        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|appointment| {
                appointment.professor_id == professor_id
                    && appointment.status == AppointmentStatus::Confirmed
            })
            .cloned()
            .collect())
    }

    async fn get_for_professor(&self, professor_id: &str) -> DomainResult<Vec<Appointment>> {
        let mut records: Vec<Appointment> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|appointment| appointment.professor_id == professor_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.time_slot.cmp(&a.time_slot));
        Ok(records)
    }

    async fn get_for_student(&self, student_id: &str) -> DomainResult<Vec<Appointment>> {
        let mut records: Vec<Appointment> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|appointment| appointment.student_id == student_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.time_slot.cmp(&a.time_slot));
        Ok(records)
    }

    async fn get_upcoming_for_professor(
        &self,
        professor_id: &str,
        as_of: DateTime<Utc>,
    ) -> DomainResult<Vec<Appointment>> {
        let mut records: Vec<Appointment> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|appointment| {
                appointment.professor_id == professor_id
                    && appointment.status == AppointmentStatus::Confirmed
                    && appointment.time_slot >= as_of
            })
            .cloned()
            .collect();
        records.sort_by(|a, b| b.time_slot.cmp(&a.time_slot));
        Ok(records)
    }

    async fn cancel(&self, id: &str, updated_at: i64) -> DomainResult<bool> {
        let mut appointments = self.appointments.lock().unwrap();
        for appointment in appointments.iter_mut() {
            if appointment.id == id && appointment.status == AppointmentStatus::Confirmed {
                appointment.status = AppointmentStatus::Cancelled;
                appointment.updated_at = updated_at;
                return Ok(true);
            }
        }
        Ok(false)
    }
}
