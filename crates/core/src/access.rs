//! Role-based access checks
//!
//! Every operation on the scheduling services starts by gating the caller
//! on the role the operation requires. The check is deliberately a plain
//! function so services cannot forget to thread the caller through.

use tutorium_domain::{Principal, Result, Role, TutoriumError};

/// Require the caller to hold `role`, otherwise `Forbidden`
///
/// The gate runs before any lookup so callers with the wrong role cannot
/// probe which accounts or appointments exist.
pub fn require_role(caller: &Principal, role: Role) -> Result<()> {
    if caller.role == role {
        Ok(())
    } else {
        Err(TutoriumError::Forbidden("Access denied".to_string()))
    }
}
