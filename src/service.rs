use std::fs::File;
use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, warn};

use crate::artifacts::ArtifactFolders;
use crate::error::Error;
use crate::exit_code::{download_outcome, run_report_outcome, ApiFailure, Outcome};
use crate::model::{Credentials, FileType, ReportDescriptor, ReportRun};
use crate::progress::SpinnerHelper;

pub const MODE_API_URL: &str = "https://app.mode.com/api";

#[async_trait]
pub trait ReportLoader {
  /// Starts a run of the report and gives back the run token. The raw answer is
  /// archived below `artifacts` whatever the status.
  async fn run_report(
    &self,
    report: &ReportDescriptor,
    credentials: &Credentials,
    artifacts: &ArtifactFolders,
  ) -> Result<String, Error>;

  /// Streams the result of a finished run into `destination` and returns the number of bytes written.
  async fn download_result(
    &self,
    report: &ReportDescriptor,
    run_id: &str,
    file_type: FileType,
    credentials: &Credentials,
    destination: &Path,
  ) -> Result<u64, Error>;
}

pub struct ModeReportService {
  pub client: Client,
  pub base_url: String,
}

impl ModeReportService {
  pub fn new(client: Client) -> Self {
    Self::with_base_url(client, MODE_API_URL)
  }

  pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
    let base_url = base_url.into().trim_end_matches('/').to_string();
    ModeReportService { client, base_url }
  }

  fn report_url(&self, report: &ReportDescriptor) -> String {
    format!(
      "{url}/{account}/reports/{report_id}",
      url = self.base_url,
      account = report.account_name,
      report_id = report.report_id
    )
  }

  pub fn run_report_url(&self, report: &ReportDescriptor) -> String {
    format!("{report_url}/runs", report_url = self.report_url(report))
  }

  /// JSON and CSV come from the run's results, a PDF has to be fetched from the exports.
  pub fn result_url(&self, report: &ReportDescriptor, run_id: &str, file_type: FileType) -> String {
    let report_url = self.report_url(report);
    match file_type {
      FileType::Pdf => format!("{report_url}/exports/runs/{run_id}/pdf/download"),
      FileType::Json | FileType::Csv => {
        format!("{report_url}/runs/{run_id}/results/content.{ext}", ext = file_type.extension())
      }
    }
  }

  fn with_mode_headers(request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
    request
      .header(CONTENT_TYPE, "application/json")
      .header(ACCEPT, "application/hal+json")
      .basic_auth(&credentials.token_id, Some(&credentials.token_password))
  }
}

#[async_trait]
impl ReportLoader for ModeReportService {
  async fn run_report(
    &self,
    report: &ReportDescriptor,
    credentials: &Credentials,
    artifacts: &ArtifactFolders,
  ) -> Result<String, Error> {
    let report_id = &report.report_id;
    let url = self.run_report_url(report);
    debug!(%url, "triggering report run");

    let response = Self::with_mode_headers(self.client.post(&url), credentials).send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    artifacts.archive_response(&format!("sync_run_{report_id}_response.json"), &body)?;

    match run_report_outcome(status) {
      Outcome::Success => {
        println!("Run report for ID: {report_id} was successfully triggered.");
        serde_json::from_slice::<ReportRun>(&body)?.token.ok_or_else(|| {
          Error::MissingToken(format!(
            "Mode accepted the run of report {report_id} but did not return a run token. Returned data: {body}",
            body = String::from_utf8_lossy(&body)
          ))
        })
      }
      Outcome::Failed(failure) => {
        warn!(%status, %failure, "report run rejected");
        let body = String::from_utf8_lossy(&body);
        Err(Error::RunReport(failure, run_report_failure_message(failure, report, status, &body)))
      }
    }
  }

  async fn download_result(
    &self,
    report: &ReportDescriptor,
    run_id: &str,
    file_type: FileType,
    credentials: &Credentials,
    destination: &Path,
  ) -> Result<u64, Error> {
    let url = self.result_url(report, run_id, file_type);
    println!("{url}");

    let response = Self::with_mode_headers(self.client.get(&url), credentials).send().await?;
    let status = response.status();

    match download_outcome(status) {
      Outcome::Success => {
        let spinner = SpinnerHelper::create(format!("Download {file_type} result of run {run_id}"))?;

        let mut out = File::create(destination)?;
        let mut written = 0u64;
        let mut body = Box::pin(response.bytes_stream());
        while let Some(chunk) = body.next().await {
          let chunk = chunk?;
          out.write_all(&chunk)?;
          written += chunk.len() as u64;
          spinner.inc(chunk.len() as u64);
        }
        out.flush()?;

        spinner.finish_with_message(format!("Result of run {run_id} downloaded."));
        debug!(destination = %destination.display(), bytes = written, "result written");
        Ok(written)
      }
      Outcome::Failed(failure) => {
        warn!(%status, %failure, "result download rejected");
        let body = response.text().await?;
        Err(Error::Download(failure, download_failure_message(failure, report, run_id, status, &body)))
      }
    }
  }
}

fn run_report_failure_message(
  failure: ApiFailure,
  report: &ReportDescriptor,
  status: StatusCode,
  body: &str,
) -> String {
  match failure {
    ApiFailure::BadRequest => format!("Bad request sent to Mode. Response data: {body}"),
    ApiFailure::InvalidCredentials => unauthorized_message(),
    ApiFailure::AccountNotAccessible => format!(
      "Mode account {account} is not accessible, check if the account is correct and try again",
      account = report.account_name
    ),
    ApiFailure::InvalidReportId => format!("Mode report: {report_id} not found", report_id = report.report_id),
    ApiFailure::ServerError => format!(
      "Mode encountered an error trying your request. Check if report id: {report_id} is correct",
      report_id = report.report_id
    ),
    ApiFailure::RunNotFound | ApiFailure::Unknown(_) => {
      format!("Mode run report returned an unknown status {status}. Returned data: {body}")
    }
  }
}

fn download_failure_message(
  failure: ApiFailure,
  report: &ReportDescriptor,
  run_id: &str,
  status: StatusCode,
  body: &str,
) -> String {
  match failure {
    ApiFailure::InvalidCredentials => unauthorized_message(),
    ApiFailure::RunNotFound => format!(
      "Mode report: report id {report_id} or run id {run_id} not found",
      report_id = report.report_id
    ),
    _ => format!("Mode result download returned an unknown status {status}. Returned data: {body}"),
  }
}

fn unauthorized_message() -> String {
  String::from("Mode API returned an Unauthorized response, check if credentials are correct and try again")
}
