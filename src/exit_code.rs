use std::fmt::{Display, Formatter, Result};

use http::StatusCode;

// general error codes
pub const SUCCESS: i32 = 0;
pub const UNKNOWN_ERROR: i32 = 3;
pub const INVALID_CREDENTIALS: i32 = 200;
pub const BAD_REQUEST: i32 = 201;

// run report specific
pub const INVALID_REPORT_ID: i32 = 203;

// download result specific
pub const MISSING_RUN_ID: i32 = 204;

// verify status specific, no component in this crate reports them yet
pub const FINAL_STATUS_SUCCESS: i32 = 0;
pub const FINAL_STATUS_PENDING: i32 = 210;
pub const FINAL_STATUS_FAILED: i32 = 211;
pub const FINAL_STATUS_CANCELLED: i32 = 213;
pub const FINAL_STATUS_NOT_STARTED: i32 = 214;

/// Why the Mode API refused a request, as far as the exit code contract cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFailure {
  BadRequest,
  /// 401
  InvalidCredentials,
  /// 403, the credentials are fine but cannot see the account.
  AccountNotAccessible,
  InvalidReportId,
  /// 404 while fetching a result: either the report or the run is unknown.
  RunNotFound,
  /// 500, Mode failed while working on an otherwise well formed request.
  ServerError,
  Unknown(u16),
}

impl ApiFailure {
  pub fn exit_code(&self) -> i32 {
    match self {
      ApiFailure::BadRequest | ApiFailure::ServerError => BAD_REQUEST,
      ApiFailure::InvalidCredentials | ApiFailure::AccountNotAccessible => INVALID_CREDENTIALS,
      ApiFailure::InvalidReportId | ApiFailure::RunNotFound => INVALID_REPORT_ID,
      ApiFailure::Unknown(_) => UNKNOWN_ERROR,
    }
  }
}

impl Display for ApiFailure {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      ApiFailure::BadRequest => write!(f, "bad request"),
      ApiFailure::InvalidCredentials => write!(f, "invalid credentials"),
      ApiFailure::AccountNotAccessible => write!(f, "account not accessible"),
      ApiFailure::InvalidReportId => write!(f, "invalid report id"),
      ApiFailure::RunNotFound => write!(f, "report or run not found"),
      ApiFailure::ServerError => write!(f, "server error"),
      ApiFailure::Unknown(status) => write!(f, "unknown status {status}"),
    }
  }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
  Success,
  Failed(ApiFailure),
}

/// Status table for `POST /reports/{report_id}/runs`.
pub fn run_report_outcome(status: StatusCode) -> Outcome {
  match status {
    StatusCode::ACCEPTED => Outcome::Success,
    StatusCode::BAD_REQUEST => Outcome::Failed(ApiFailure::BadRequest),
    StatusCode::UNAUTHORIZED => Outcome::Failed(ApiFailure::InvalidCredentials),
    StatusCode::FORBIDDEN => Outcome::Failed(ApiFailure::AccountNotAccessible),
    StatusCode::NOT_FOUND => Outcome::Failed(ApiFailure::InvalidReportId),
    StatusCode::INTERNAL_SERVER_ERROR => Outcome::Failed(ApiFailure::ServerError),
    other => Outcome::Failed(ApiFailure::Unknown(other.as_u16())),
  }
}

/// Status table for both result endpoints (`content.{json,csv}` and the pdf export).
pub fn download_outcome(status: StatusCode) -> Outcome {
  match status {
    StatusCode::OK => Outcome::Success,
    StatusCode::UNAUTHORIZED => Outcome::Failed(ApiFailure::InvalidCredentials),
    StatusCode::NOT_FOUND => Outcome::Failed(ApiFailure::RunNotFound),
    other => Outcome::Failed(ApiFailure::Unknown(other.as_u16())),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn exit_code_of(outcome: Outcome) -> i32 {
    match outcome {
      Outcome::Success => SUCCESS,
      Outcome::Failed(failure) => failure.exit_code(),
    }
  }

  #[test]
  fn run_report_statuses_map_to_exit_codes() {
    let table = [
      (202, SUCCESS),
      (400, BAD_REQUEST),
      (401, INVALID_CREDENTIALS),
      (403, INVALID_CREDENTIALS),
      (404, INVALID_REPORT_ID),
      (500, BAD_REQUEST),
      (200, UNKNOWN_ERROR),
      (409, UNKNOWN_ERROR),
      (502, UNKNOWN_ERROR),
    ];

    for (status, expected) in table {
      let status = StatusCode::from_u16(status).unwrap();
      assert_eq!(exit_code_of(run_report_outcome(status)), expected, "status {status}");
    }
  }

  #[test]
  fn download_statuses_map_to_exit_codes() {
    let table = [
      (200, SUCCESS),
      (401, INVALID_CREDENTIALS),
      (404, INVALID_REPORT_ID),
      (202, UNKNOWN_ERROR),
      (400, UNKNOWN_ERROR),
      (403, UNKNOWN_ERROR),
      (500, UNKNOWN_ERROR),
    ];

    for (status, expected) in table {
      let status = StatusCode::from_u16(status).unwrap();
      assert_eq!(exit_code_of(download_outcome(status)), expected, "status {status}");
    }
  }

  #[test]
  fn forbidden_and_server_error_keep_their_own_failure() {
    assert_eq!(
      run_report_outcome(StatusCode::FORBIDDEN),
      Outcome::Failed(ApiFailure::AccountNotAccessible)
    );
    assert_eq!(
      run_report_outcome(StatusCode::INTERNAL_SERVER_ERROR),
      Outcome::Failed(ApiFailure::ServerError)
    );
  }

  #[test]
  fn unknown_status_carries_the_code() {
    assert_eq!(
      download_outcome(StatusCode::IM_A_TEAPOT),
      Outcome::Failed(ApiFailure::Unknown(418))
    );
  }
}
