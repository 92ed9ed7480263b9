//! [`JsonGateway`] — whole-document load and save of one entity kind.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::Result;

/// Serialises and deserialises the full extent of one entity kind
/// to/from a single JSON document.
///
/// Reads degrade to a caller-supplied default: a missing document is
/// normal on first run, and a corrupt one must not take the process
/// down (spelled out to the operator via a warning instead). Saves
/// overwrite the document in full; they are neither incremental nor
/// atomic, so a single active process is assumed.
pub struct JsonGateway {
  path: PathBuf,
}

impl JsonGateway {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path { &self.path }

  /// Load the document, or `default` if it is absent or unreadable.
  pub fn load<T: DeserializeOwned>(&self, default: T) -> T {
    let raw = match std::fs::read_to_string(&self.path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == ErrorKind::NotFound => return default,
      Err(e) => {
        tracing::warn!(path = %self.path.display(), error = %e, "error reading file");
        return default;
      }
    };

    match serde_json::from_str(&raw) {
      Ok(value) => value,
      Err(e) => {
        tracing::warn!(path = %self.path.display(), error = %e, "malformed document, using default");
        default
      }
    }
  }

  /// Overwrite the document with the full current snapshot.
  pub fn save<T: Serialize>(&self, snapshot: &T) -> Result<()> {
    let file = File::create(&self.path)?;
    serde_json::to_writer_pretty(file, snapshot)?;
    Ok(())
  }
}
