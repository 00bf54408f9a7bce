use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::error::Error::InvalidFileType;

/// Identifies a report inside a Mode account (workspace).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDescriptor {
  pub account_name: String,
  pub report_id: String,
}

impl ReportDescriptor {
  pub fn new(account_name: impl Into<String>, report_id: impl Into<String>) -> Self {
    ReportDescriptor { account_name: account_name.into(), report_id: report_id.into() }
  }
}

/// Mode API token pair used for basic auth.
#[derive(Clone)]
pub struct Credentials {
  pub token_id: String,
  pub token_password: String,
}

impl Credentials {
  pub fn new(token_id: impl Into<String>, token_password: impl Into<String>) -> Self {
    Credentials { token_id: token_id.into(), token_password: token_password.into() }
  }
}

impl Debug for Credentials {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("token_id", &self.token_id)
      .field("token_password", &"<redacted>")
      .finish()
  }
}

/// Body of a `202 Accepted` answer to a report run request. Mode sends a lot more
/// (HAL links, timestamps, state); only the run token is of interest here.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ReportRun {
  pub(crate) token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
  Json,
  Csv,
  Pdf,
}

impl FileType {
  pub fn extension(&self) -> &'static str {
    match self {
      FileType::Json => "json",
      FileType::Csv => "csv",
      FileType::Pdf => "pdf",
    }
  }
}

impl Display for FileType {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.extension())
  }
}

impl FromStr for FileType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    match s.to_lowercase().as_str() {
      "json" => Ok(FileType::Json),
      "csv" => Ok(FileType::Csv),
      "pdf" => Ok(FileType::Pdf),
      _ => Err(InvalidFileType(format!("invalid file type `{s}`, expected one of: json, pdf, csv"))),
    }
  }
}
