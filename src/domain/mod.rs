//! # Domain Layer
//!
//! Core definitions, types, and traits that define the dispatch domain.
//! Independent of the HTTP transport and of the operating system, serving as the contract for other layers.

pub mod config;
pub mod error;
pub mod paths;
pub mod traits;
pub mod types;
