//! Local working copy operations
//!
//! The gateway serves out of a git checkout and can fast-forward it to
//! the tracked remote on a signed `/update` request. Operations shell
//! out to the `git` binary; every invocation is bounded by a timeout so
//! a hung remote cannot wedge a request handler.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// Source-control working copy the gateway runs from.
#[async_trait]
pub trait SourceRepo: Send + Sync {
    /// Fast-forward the working copy to the tracked remote.
    async fn pull(&self) -> Result<()>;

    /// Current HEAD revision identifier.
    async fn head_revision(&self) -> Result<String>;
}

/// [`SourceRepo`] backed by the `git` binary.
pub struct GitWorkingCopy {
    dir: PathBuf,
    timeout: Duration,
}

impl GitWorkingCopy {
    /// Default bound on a single git invocation.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a working copy handle for the given checkout directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-invocation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run_git(&self, args: &[&str]) -> Result<String> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new("git")
                .current_dir(&self.dir)
                .args(args)
                .output(),
        )
        .await
        .map_err(|_| Error::Repo(format!("git {} timed out", args.join(" "))))?
        .map_err(|e| Error::Repo(format!("failed to run git {}: {}", args.join(" "), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Repo(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl SourceRepo for GitWorkingCopy {
    async fn pull(&self) -> Result<()> {
        tracing::info!(dir = %self.dir.display(), "pulling latest from origin");
        self.run_git(&["pull", "--ff-only", "origin"]).await?;
        Ok(())
    }

    async fn head_revision(&self) -> Result<String> {
        self.run_git(&["rev-parse", "HEAD"]).await
    }
}
