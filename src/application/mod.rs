//! Application layer - command handlers orchestrating domain aggregates
//! against the store and identity ports.

pub mod handlers;
