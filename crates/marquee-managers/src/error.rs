//! Error types for `marquee-managers`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] marquee_core::Error),

  #[error("persistence error: {0}")]
  Persistence(#[from] marquee_store_json::Error),

  #[error("not authorized: {0}")]
  NotAuthorized(&'static str),

  #[error("{field} already in use")]
  FieldTaken { field: &'static str },

  #[error("incorrect nickname or password")]
  LoginFailed,

  #[error("account is inactive")]
  AccountInactive,

  #[error("this account is already active")]
  AlreadyActive,

  #[error("this account is already inactive")]
  AlreadyInactive,

  #[error("only inactive accounts can be permanently deleted")]
  AccountStillActive,

  #[error("the founder account cannot be deactivated or deleted")]
  FounderImmutable,

  #[error("the target account already holds admin privileges")]
  AlreadyAdmin,

  #[error("the target account holds no admin privileges to revoke")]
  NotAnAdmin,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
