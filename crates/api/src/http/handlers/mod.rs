//! Request handlers, grouped by audience

pub mod auth;
pub mod health;
pub mod professor;
pub mod student;
