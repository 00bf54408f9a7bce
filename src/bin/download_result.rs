use std::process;

use clap::Parser;
use mode_report::cli::{init_tracing, DownloadResultCli};
use mode_report::{commands, ArtifactFolders, Error, ModeReportService};
use reqwest::Client;

#[tokio::main]
async fn main() {
  init_tracing();
  let cli = DownloadResultCli::parse();

  let result: Result<_, Error> = async {
    let artifacts = ArtifactFolders::init(&cli.settings.artifacts_dir)?;
    let service = ModeReportService::with_base_url(Client::new(), cli.settings.api_base_url.as_str());

    commands::download_result(&service, &artifacts, &cli.download_request(), &cli.credentials.credentials()).await
  }
  .await;

  match result {
    Ok(destination) => println!("Downloaded to: `{}`", destination.display()),
    Err(error) => {
      println!("{error}");
      process::exit(error.exit_code());
    }
  }
}
