use std::process;

use clap::Parser;
use mode_report::cli::{init_tracing, RunReportCli};
use mode_report::{commands, ArtifactFolders, Error, ModeReportService};
use reqwest::Client;

#[tokio::main]
async fn main() {
  init_tracing();
  let RunReportCli { report, credentials, settings } = RunReportCli::parse();

  let result: Result<String, Error> = async {
    let artifacts = ArtifactFolders::init(&settings.artifacts_dir)?;
    let service = ModeReportService::with_base_url(Client::new(), settings.api_base_url.as_str());

    commands::run_report(&service, &artifacts, &report.descriptor(), &credentials.credentials()).await
  }
  .await;

  if let Err(error) = result {
    println!("{error}");
    process::exit(error.exit_code());
  }
}
