//! Core types and trait definitions for the Marquee cinema manager.
//!
//! This crate is deliberately free of I/O and terminal dependencies;
//! every other crate in the workspace depends on it.

pub mod codec;
pub mod entity;
pub mod error;
pub mod movie;
pub mod schedule;
pub mod store;
pub mod user;

pub use error::{Error, Result};
