//! The two blueprint operations: trigger a report run, then download its result. They only
//! talk to each other through the `report_run_id` variable in the artifact folders.

use std::env;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::artifacts::{ArtifactFolders, REPORT_RUN_ID};
use crate::error::Error;
use crate::model::{Credentials, FileType, ReportDescriptor};
use crate::service::ReportLoader;

/// Triggers a run and hands its token over to later downloads. Nothing is persisted when
/// Mode does not accept the run.
pub async fn run_report<L: ReportLoader + Sync>(
  loader: &L,
  artifacts: &ArtifactFolders,
  report: &ReportDescriptor,
  credentials: &Credentials,
) -> Result<String, Error> {
  let run_id = loader.run_report(report, credentials, artifacts).await?;
  println!("Report run id is: {run_id}");

  let marker = artifacts.write_variable(REPORT_RUN_ID, &run_id)?;
  info!(report_id = %report.report_id, marker = %marker.display(), "report run id persisted");

  Ok(run_id)
}

#[derive(Debug, Clone)]
pub struct DownloadRequest {
  pub report: ReportDescriptor,
  /// Falls back to the run id of the last trigger when absent.
  pub run_id: Option<String>,
  pub file_type: FileType,
  pub dest_file_name: String,
  /// Defaults to the current working directory.
  pub dest_folder_name: Option<PathBuf>,
}

pub async fn download_result<L: ReportLoader + Sync>(
  loader: &L,
  artifacts: &ArtifactFolders,
  request: &DownloadRequest,
  credentials: &Credentials,
) -> Result<PathBuf, Error> {
  let run_id = resolve_run_id(request.run_id.as_deref(), artifacts)?;
  let destination = destination_path(request.dest_folder_name.as_deref(), &request.dest_file_name)?;

  let written = loader
    .download_result(&request.report, &run_id, request.file_type, credentials, &destination)
    .await?;
  info!(run_id = %run_id, bytes = written, "report result downloaded");

  Ok(destination)
}

/// An explicit, non-empty run id wins over the persisted one.
pub fn resolve_run_id(explicit: Option<&str>, artifacts: &ArtifactFolders) -> Result<String, Error> {
  match explicit.filter(|run_id| !run_id.is_empty()) {
    Some(run_id) => Ok(run_id.to_string()),
    None => artifacts
      .read_variable(REPORT_RUN_ID)?
      .ok_or_else(|| Error::MissingRunId(artifacts.variable_path(REPORT_RUN_ID))),
  }
}

pub fn destination_path(dest_folder_name: Option<&Path>, dest_file_name: &str) -> Result<PathBuf, Error> {
  let folder = match dest_folder_name.filter(|folder| !folder.as_os_str().is_empty()) {
    Some(folder) => folder.to_path_buf(),
    None => env::current_dir()?,
  };
  Ok(folder.join(dest_file_name))
}
