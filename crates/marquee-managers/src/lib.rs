//! Entity managers for the Marquee cinema manager.
//!
//! Each manager composes a [`marquee_core::store::GenericStore`] with a
//! [`marquee_store_json::JsonGateway`] for one entity kind and layers
//! the domain policy on top: id allocation, founder bootstrap, and the
//! role-based authorization matrix.

pub mod error;
pub mod movies;
pub mod policy;
pub mod session;
pub mod users;

pub use error::{Error, Result};
pub use movies::{MovieManager, NewMovie};
pub use session::{Session, login};
pub use users::{FounderBootstrap, NewUser, UserManager};
