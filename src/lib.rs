pub mod artifacts;
#[cfg(feature = "build-binary")]
pub mod cli;
pub mod commands;
pub mod error;
pub mod exit_code;
pub mod model;
mod progress;
pub mod service;

pub use artifacts::ArtifactFolders;
pub use error::Error;
pub use model::{Credentials, FileType, ReportDescriptor};
pub use service::{ModeReportService, ReportLoader};
