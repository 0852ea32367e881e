//! Dependency-light domain utilities shared by the store and API layers.
//!
//! This crate has no internal dependencies so it can be used by the
//! API/store layer and any future worker or CLI tooling.

pub mod dates;
pub mod error;
pub mod monitors;
pub mod nonce;
pub mod percent;
pub mod roles;
pub mod token;
pub mod types;
