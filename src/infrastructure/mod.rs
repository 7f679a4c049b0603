//! # Infrastructure Layer
//!
//! Handles interactions with the host system.
//! Implements the traits defined in the Domain layer (e.g., ActionRunner).

pub mod tools;
