//! Producers domain module.
//!
//! Business rules for cheese producers, implemented as pure validation logic
//! (no IO, no HTTP, no storage).

pub mod producer;

pub use producer::{NewProducer, OperationSize, Producer, MIN_FOUNDING_YEAR};
