//! # Tools Module
//!
//! In-process execution of action kinds against the host (programs, metrics, shell).

pub mod runner;
