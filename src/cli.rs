use std::path::PathBuf;

use clap::{Args, Parser};
use tracing_subscriber::EnvFilter;

use crate::artifacts::DEFAULT_ARTIFACTS_DIR;
use crate::commands::DownloadRequest;
use crate::model::{Credentials, FileType, ReportDescriptor};
use crate::service::MODE_API_URL;

/// Triggers a run of a Mode report. The run id is printed and remembered so that a later
/// `mode-download-result` can pick it up without `--run-id`.
#[derive(Parser)]
#[clap(version)]
pub struct RunReportCli {
  #[clap(flatten)]
  pub report: ReportArgs,
  #[clap(flatten)]
  pub credentials: CredentialArgs,
  #[clap(flatten)]
  pub settings: Settings,
}

/// Downloads the result of a Mode report run as JSON, CSV or PDF.
#[derive(Parser)]
#[clap(version)]
pub struct DownloadResultCli {
  #[clap(flatten)]
  pub report: ReportArgs,
  #[clap(flatten)]
  pub credentials: CredentialArgs,
  /// The run to download. Defaults to the run triggered last by `mode-run-report`.
  #[clap(long)]
  pub run_id: Option<String>,
  /// Name of the file the result is written to. An existing file is overwritten.
  #[clap(long)]
  pub dest_file_name: String,
  /// Folder the result is written to. [default: current directory]
  #[clap(long)]
  pub dest_folder_name: Option<PathBuf>,
  /// One of `json`, `csv` or `pdf` (case-insensitive).
  #[clap(long)]
  pub file_type: FileType,
  #[clap(flatten)]
  pub settings: Settings,
}

impl DownloadResultCli {
  pub fn download_request(&self) -> DownloadRequest {
    DownloadRequest {
      report: self.report.descriptor(),
      run_id: self.run_id.clone(),
      file_type: self.file_type,
      dest_file_name: self.dest_file_name.clone(),
      dest_folder_name: self.dest_folder_name.clone(),
    }
  }
}

#[derive(Args)]
pub struct ReportArgs {
  /// The Mode account (workspace) name as it appears in `app.mode.com/{account name}`.
  #[clap(long)]
  pub account_name: String,
  /// The report token, the last path segment of `app.mode.com/{account}/reports/{report id}`.
  #[clap(long)]
  pub report_id: String,
}

impl ReportArgs {
  pub fn descriptor(&self) -> ReportDescriptor {
    ReportDescriptor::new(&self.account_name, &self.report_id)
  }
}

#[derive(Args)]
pub struct CredentialArgs {
  /// The token of your Mode API token.
  #[clap(long, env = "MODE_TOKEN_ID")]
  pub token_id: String,
  /// The password of your Mode API token.
  #[clap(long, env = "MODE_TOKEN_PASSWORD", hide_env_values = true)]
  pub token_password: String,
}

impl CredentialArgs {
  pub fn credentials(&self) -> Credentials {
    Credentials::new(&self.token_id, &self.token_password)
  }
}

#[derive(Args)]
pub struct Settings {
  /// Root of the artifact folders (archived responses, run id of the last trigger).
  #[clap(long, env = "MODE_ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
  pub artifacts_dir: PathBuf,
  #[clap(long, env = "MODE_API_BASE_URL", default_value = MODE_API_URL)]
  pub api_base_url: String,
}

/// Diagnostics go to stderr so stdout stays reserved for the blueprint messages.
pub fn init_tracing() {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "mode_report=warn".into()))
    .init();
}
