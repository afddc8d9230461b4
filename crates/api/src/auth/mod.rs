//! Authentication primitives.
//!
//! Tokens are minted by the identity service; this crate only validates
//! them. [`jwt`] still exposes a generator so tests can produce tokens
//! with arbitrary roles.

pub mod jwt;
