//! # Interface Layer
//!
//! The outer surfaces callers reach the dispatcher through.

pub mod http;
