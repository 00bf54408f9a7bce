use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Error;

pub const DEFAULT_ARTIFACTS_DIR: &str = "mode-blueprint-artifacts";

/// Name of the variable the run token is handed over with, from a trigger to a later download.
pub const REPORT_RUN_ID: &str = "report_run_id";

/// The artifact folder tree of one process invocation:
///
/// ```text
/// <base>/logs
/// <base>/responses   raw API answers kept for debugging
/// <base>/variables   values passed between separate invocations
/// ```
#[derive(Debug, Clone)]
pub struct ArtifactFolders {
  base: PathBuf,
  logs: PathBuf,
  responses: PathBuf,
  variables: PathBuf,
}

impl ArtifactFolders {
  /// Determines the subfolders below `base` and creates whatever is missing.
  pub fn init(base: impl Into<PathBuf>) -> Result<ArtifactFolders, Error> {
    let base = base.into();
    let folders = ArtifactFolders {
      logs: base.join("logs"),
      responses: base.join("responses"),
      variables: base.join("variables"),
      base,
    };

    for folder in [&folders.logs, &folders.responses, &folders.variables] {
      fs::create_dir_all(folder)?;
    }
    debug!(base = %folders.base.display(), "artifact folders ready");

    Ok(folders)
  }

  pub fn base(&self) -> &Path {
    &self.base
  }

  pub fn logs(&self) -> &Path {
    &self.logs
  }

  pub fn responses(&self) -> &Path {
    &self.responses
  }

  pub fn variables(&self) -> &Path {
    &self.variables
  }

  pub fn variable_path(&self, name: &str) -> PathBuf {
    self.variables.join(format!("{name}.json"))
  }

  pub fn write_variable(&self, name: &str, value: &str) -> Result<PathBuf, Error> {
    let path = self.variable_path(name);
    fs::write(&path, serde_json::to_vec(value)?)?;
    debug!(variable = name, path = %path.display(), "variable persisted");
    Ok(path)
  }

  /// `Ok(None)` when the variable was never written.
  pub fn read_variable(&self, name: &str) -> Result<Option<String>, Error> {
    let path = self.variable_path(name);
    match fs::read(&path) {
      Ok(bytes) => Ok(Some(serde_json::from_slice::<String>(&bytes)?)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  /// Stores a response body exactly as it came over the wire.
  pub fn archive_response(&self, file_name: &str, body: &[u8]) -> Result<PathBuf, Error> {
    let path = self.responses.join(file_name);
    fs::write(&path, body)?;
    debug!(path = %path.display(), bytes = body.len(), "response archived");
    Ok(path)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn given_base_when_init_then_all_subfolders_exist() {
    // Given
    let dir = tempdir().unwrap();
    let base = dir.path().join("nested").join("artifacts");

    // When
    let folders = ArtifactFolders::init(&base).unwrap();

    // Then
    assert!(folders.logs().is_dir());
    assert!(folders.responses().is_dir());
    assert!(folders.variables().is_dir());
    assert_eq!(folders.base(), base.as_path());
  }

  #[test]
  fn given_existing_tree_when_init_again_then_nothing_is_lost() {
    // Given
    let dir = tempdir().unwrap();
    let folders = ArtifactFolders::init(dir.path()).unwrap();
    folders.write_variable(REPORT_RUN_ID, "abc123").unwrap();

    // When
    let folders = ArtifactFolders::init(dir.path()).unwrap();

    // Then
    assert_eq!(folders.read_variable(REPORT_RUN_ID).unwrap().as_deref(), Some("abc123"));
  }

  #[test]
  fn given_no_variable_when_read_then_none() {
    let dir = tempdir().unwrap();
    let folders = ArtifactFolders::init(dir.path()).unwrap();

    assert_eq!(folders.read_variable(REPORT_RUN_ID).unwrap(), None);
  }

  #[test]
  fn given_variable_when_written_twice_then_last_value_wins() {
    let dir = tempdir().unwrap();
    let folders = ArtifactFolders::init(dir.path()).unwrap();

    folders.write_variable(REPORT_RUN_ID, "first").unwrap();
    folders.write_variable(REPORT_RUN_ID, "second").unwrap();

    assert_eq!(folders.read_variable(REPORT_RUN_ID).unwrap().as_deref(), Some("second"));
  }

  #[test]
  fn given_body_when_archived_then_bytes_are_kept_verbatim() {
    let dir = tempdir().unwrap();
    let folders = ArtifactFolders::init(dir.path()).unwrap();

    let path = folders.archive_response("sync_run_r1_response.json", b"{\"token\": \"t\"}").unwrap();

    assert_eq!(path, folders.responses().join("sync_run_r1_response.json"));
    assert_eq!(fs::read(path).unwrap(), b"{\"token\": \"t\"}");
  }
}
