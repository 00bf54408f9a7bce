use std::fmt::{Display, Formatter, Result};
use std::path::PathBuf;

use crate::exit_code::{self, ApiFailure};

#[derive(Debug)]
pub enum Error {
  ReqwestError(reqwest::Error),
  JsonError(serde_json::Error),
  IoError(std::io::Error),
  TemplateError(indicatif::style::TemplateError),
  InvalidFileType(String),
  MissingToken(String),
  MissingRunId(PathBuf),
  RunReport(ApiFailure, String),
  Download(ApiFailure, String),
}

impl Error {
  /// The process exit code a binary terminates with for this error.
  pub fn exit_code(&self) -> i32 {
    match self {
      Error::RunReport(failure, _) | Error::Download(failure, _) => failure.exit_code(),
      Error::MissingRunId(_) => exit_code::MISSING_RUN_ID,
      Error::ReqwestError(_)
      | Error::JsonError(_)
      | Error::IoError(_)
      | Error::TemplateError(_)
      | Error::InvalidFileType(_)
      | Error::MissingToken(_) => exit_code::UNKNOWN_ERROR,
    }
  }
}

impl std::error::Error for Error {}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      Error::ReqwestError(e) => std::fmt::Display::fmt(e, f),
      Error::JsonError(e) => std::fmt::Display::fmt(e, f),
      Error::IoError(e) => std::fmt::Display::fmt(e, f),
      Error::TemplateError(e) => std::fmt::Display::fmt(e, f),
      Error::InvalidFileType(e) => std::fmt::Display::fmt(e, f),
      Error::MissingToken(e) => std::fmt::Display::fmt(e, f),
      Error::MissingRunId(marker) => write!(
        f,
        "No run id given and no previous report run found at `{marker}`. Trigger a run first or pass --run-id.",
        marker = marker.display()
      ),
      Error::RunReport(_, e) => std::fmt::Display::fmt(e, f),
      Error::Download(_, e) => std::fmt::Display::fmt(e, f),
    }
  }
}

impl From<reqwest::Error> for Error {
  fn from(reqwest_error: reqwest::Error) -> Self {
    Error::ReqwestError(reqwest_error)
  }
}

impl From<serde_json::Error> for Error {
  fn from(serde_json_error: serde_json::Error) -> Self {
    Error::JsonError(serde_json_error)
  }
}

impl From<std::io::Error> for Error {
  fn from(io_error: std::io::Error) -> Self {
    Error::IoError(io_error)
  }
}

impl From<indicatif::style::TemplateError> for Error {
  fn from(template_error: indicatif::style::TemplateError) -> Self {
    Error::TemplateError(template_error)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn api_failures_exit_with_their_mapped_code() {
    let error = Error::RunReport(ApiFailure::InvalidReportId, "not found".to_string());
    assert_eq!(error.exit_code(), exit_code::INVALID_REPORT_ID);

    let error = Error::Download(ApiFailure::InvalidCredentials, "unauthorized".to_string());
    assert_eq!(error.exit_code(), exit_code::INVALID_CREDENTIALS);
  }

  #[test]
  fn missing_run_id_has_its_own_exit_code() {
    let error = Error::MissingRunId(PathBuf::from("artifacts/variables/report_run_id.json"));

    assert_eq!(error.exit_code(), exit_code::MISSING_RUN_ID);
    assert!(error.to_string().contains("artifacts/variables/report_run_id.json"));
  }

  #[test]
  fn local_failures_are_unknown_errors() {
    let error = Error::from(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
    assert_eq!(error.exit_code(), exit_code::UNKNOWN_ERROR);
  }
}
