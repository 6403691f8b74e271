//! Status and output artifacts consumed by the orchestrator.
//!
//! The status file (`CLOUDBEES_STATUS`) holds a single `{status, message}`
//! record and is overwritten on every write. Named outputs are individual
//! files under the `CLOUDBEES_OUTPUTS` directory.

use crate::approval::types::JobStatus;
use crate::config::environment::{vars, Environment};
use crate::error::{ApprovalError, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output name for the approver's comments.
pub const COMMENTS_OUTPUT: &str = "comments";
/// Output name for the typed approval input values.
pub const INPUT_VALUES_OUTPUT: &str = "approvalInputValues";

const STATUS_FILE_MODE: u32 = 0o666;
const OUTPUT_FILE_MODE: u32 = 0o755;

/// The job outcome record written to the status file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub status: JobStatus,
    pub message: String,
}

impl StatusRecord {
    pub fn new(status: JobStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Writes artifacts to the locations named by the environment.
///
/// Locations are resolved lazily so a missing variable only fails the
/// invocation when something actually needs to be written there.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    status_file: Option<PathBuf>,
    outputs_dir: Option<PathBuf>,
}

impl ArtifactWriter {
    pub fn from_env(env: &Environment) -> Self {
        Self {
            status_file: env.get(vars::STATUS_FILE).map(PathBuf::from),
            outputs_dir: env.get(vars::OUTPUTS_DIR).map(PathBuf::from),
        }
    }

    /// Overwrite the status file with a new record.
    pub fn write_status(&self, status: JobStatus, message: impl Into<String>) -> Result<()> {
        let path = self
            .status_file
            .as_deref()
            .ok_or(ApprovalError::MissingEnv(vars::STATUS_FILE))?;
        let record = StatusRecord::new(status, message);
        let bytes = serde_json::to_vec(&record).map_err(|source| ApprovalError::Serialize {
            what: "status record",
            source,
        })?;
        tracing::debug!(path = %path.display(), %status, "Writing status record");
        write_file(path, &bytes, STATUS_FILE_MODE)
    }

    /// Write a named output artifact.
    pub fn write_output(&self, name: &str, value: &[u8]) -> Result<()> {
        let dir = self
            .outputs_dir
            .as_deref()
            .ok_or(ApprovalError::MissingEnv(vars::OUTPUTS_DIR))?;
        let path = dir.join(name);
        tracing::debug!(path = %path.display(), bytes = value.len(), "Writing output");
        write_file(&path, value, OUTPUT_FILE_MODE)
    }
}

/// Create or truncate `path` and write `contents`. `mode` applies on create.
fn write_file(path: &Path, contents: &[u8], mode: u32) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let to_write_error = |source: std::io::Error| ApprovalError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = options.open(path).map_err(to_write_error)?;
    file.write_all(contents).map_err(to_write_error)?;
    file.flush().map_err(to_write_error)
}
