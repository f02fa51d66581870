//! Identity module: port interfaces for account storage

pub mod ports;

pub use ports::PrincipalDirectory;
