//! Cheeses domain module.
//!
//! A cheese is a product record owned by exactly one producer. Validation is
//! applied when a record is created and again for every field a patch touches.

pub mod cheese;

pub use cheese::{Cheese, CheesePatch, NewCheese, MAX_PRICE, MIN_PRICE};
