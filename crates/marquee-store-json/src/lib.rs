//! Flat-file JSON persistence for the Marquee cinema manager.
//!
//! Each entity kind lives in one JSON document holding its entire
//! extent; loads and saves are whole-document operations.

mod gateway;

pub mod error;

pub use error::{Error, Result};
pub use gateway::JsonGateway;

#[cfg(test)]
mod tests;
