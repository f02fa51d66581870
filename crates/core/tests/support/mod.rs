//! Shared test helpers for `tutorium-core` integration tests.
//!
//! These helpers provide reusable fixtures and lightweight mocks so that
//! scheduling tests can focus on behaviour instead of boilerplate.

pub mod fixtures;
pub mod stores;
