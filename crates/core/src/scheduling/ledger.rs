//! Availability publication service - core business logic

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use tutorium_domain::{Principal, Result, Role, SlotView, TutoriumError};

use super::ports::AvailabilityStore;
use crate::access::require_role;
use crate::identity::ports::PrincipalDirectory;

/// Availability publication service
pub struct AvailabilityLedger {
    directory: Arc<dyn PrincipalDirectory>,
    availability: Arc<dyn AvailabilityStore>,
}

impl AvailabilityLedger {
    /// Create a new availability ledger
    pub fn new(
        directory: Arc<dyn PrincipalDirectory>,
        availability: Arc<dyn AvailabilityStore>,
    ) -> Self {
        Self { directory, availability }
    }

    /// Declare availability instants for the calling professor
    ///
    /// Instants are RFC 3339 strings and are normalized to second
    /// precision. Instants in the past and instants already declared are
    /// dropped silently. The full updated list is returned in insertion
    /// order.
    pub async fn declare(&self, caller: &Principal, proposed: &[String]) -> Result<Vec<SlotView>> {
        require_role(caller, Role::Professor)?;

        if proposed.is_empty() {
            return Err(TutoriumError::InvalidInput(
                "Invalid availability data".to_string(),
            ));
        }

        // Parse everything up front: one bad instant rejects the whole
        // call before anything is persisted.
        let mut parsed = Vec::with_capacity(proposed.len());
        for raw in proposed {
            let instant = DateTime::parse_from_rfc3339(raw).map_err(|_| {
                TutoriumError::InvalidInput(format!("Invalid availability instant: {raw}"))
            })?;
            parsed.push(truncate_to_second(instant.with_timezone(&Utc)));
        }

        let professor = self.resolve_caller(&caller.id).await?;

        let existing = self.availability.get_slots(&professor.id).await?;
        let mut seen: HashSet<i64> = existing.iter().map(DateTime::timestamp).collect();

        let now = Utc::now();
        let mut accepted = Vec::new();
        let mut dropped_past = 0_usize;
        let mut dropped_duplicate = 0_usize;
        for instant in parsed {
            if instant <= now {
                dropped_past += 1;
                continue;
            }
            if !seen.insert(instant.timestamp()) {
                dropped_duplicate += 1;
                continue;
            }
            accepted.push(instant);
        }

        if !accepted.is_empty() {
            self.availability.add_slots(&professor.id, &accepted).await?;
        }

        debug!(
            professor_id = %professor.id,
            accepted = accepted.len(),
            dropped_past,
            dropped_duplicate,
            "availability declared"
        );

        let mut all = existing;
        all.extend(accepted);
        Ok(all.into_iter().map(SlotView::from_instant).collect())
    }

    /// List all declared instants of the calling professor in insertion order
    pub async fn list(&self, caller: &Principal) -> Result<Vec<SlotView>> {
        require_role(caller, Role::Professor)?;
        let professor = self.resolve_caller(&caller.id).await?;
        let slots = self.availability.get_slots(&professor.id).await?;
        Ok(slots.into_iter().map(SlotView::from_instant).collect())
    }

    async fn resolve_caller(&self, id: &str) -> Result<Principal> {
        self.directory
            .get_by_id(id)
            .await?
            .ok_or_else(|| TutoriumError::NotFound("User not found".to_string()))
    }
}

/// Drop sub-second precision from an instant
fn truncate_to_second(instant: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(instant.timestamp(), 0).unwrap_or(instant)
}
