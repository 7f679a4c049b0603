//! # Application Layer
//!
//! Contains the dispatch logic of the service.
//! This includes the action registry, matcher, code generator, executor, context history and the dispatcher.

pub mod codegen;
pub mod context;
pub mod dispatcher;
pub mod executor;
pub mod matcher;
pub mod parameters;
pub mod registry;
