//! Trivia Core: shared domain abstractions.
//!
//! This crate defines the question entity, the raw records producers emit,
//! the answer shuffler, and the traits that sources and translation
//! providers implement. It contains no infrastructure code.

pub mod category;
pub mod deck;
pub mod difficulty;
pub mod error;
pub mod factory;
pub mod question;
pub mod record;
pub mod rng;
pub mod shuffle;
pub mod source;
pub mod translation;
