//! Learnhub - Social Learning-Tracking Backend
//!
//! Users follow each other, enroll in learning plans, and mark progress on
//! topics within those plans. Follow and enrollment edges are mirrored
//! across independently stored aggregates and kept symmetric by the
//! application layer.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
