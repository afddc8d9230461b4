//! Domain logic for the animal/microchip registry.
//!
//! This crate is I/O-free: chip identity rules, input sanitization,
//! search-key classification, and the shared error taxonomy live here so
//! both the database layer and the HTTP layer depend on one source of
//! truth.

pub mod error;
pub mod microchip;
pub mod roles;
pub mod sanitize;
pub mod search;
pub mod types;
