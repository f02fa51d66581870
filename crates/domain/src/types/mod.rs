//! Domain types and models

pub mod identity;
pub mod scheduling;

// Re-export commonly used items
pub use identity::{Principal, PublicIdentity, Role};
pub use scheduling::{
    Appointment, AppointmentStatus, AppointmentView, BookingConfirmation, OpenSlots, SlotView,
};
