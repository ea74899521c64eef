//! Catalog data service.
//!
//! # Responsibility
//! - Expose async "list all trees" and "fetch one tree" use-cases.
//! - Simulate backend latency and transient backend failure.
//! - Derive QR targets for detail presentation.
//!
//! # Invariants
//! - A failed list call returns no data at all.
//! - Every list call draws its failure sample independently; retries are
//!   not favored.
//! - Fetch-by-id never fails; a missing id is `Ok`-shaped `None`.

use crate::config::CatalogConfig;
use crate::model::tree::TreeRecord;
use crate::repo::tree_repo::TreeRepository;
use crate::runtime::{Clock, Entropy};
use crate::service::qr::{derive_qr_target, QrTarget};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Message carried by injected list failures.
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "Database connection failed. Please try again.";

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog service error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Simulated backend outage; `message` is safe to show to users.
    ServiceUnavailable { message: String },
}

impl CatalogError {
    /// User-displayable message.
    pub fn user_message(&self) -> &str {
        match self {
            Self::ServiceUnavailable { message } => message.as_str(),
        }
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ServiceUnavailable { message } => write!(f, "service unavailable: {message}"),
        }
    }
}

impl Error for CatalogError {}

/// Use-case service over a tree repository with simulated transport.
#[derive(Debug)]
pub struct CatalogService<R: TreeRepository, C: Clock, E: Entropy> {
    repo: R,
    clock: C,
    entropy: E,
    config: CatalogConfig,
}

impl<R: TreeRepository, C: Clock, E: Entropy> CatalogService<R, C, E> {
    pub fn new(repo: R, clock: C, entropy: E, config: CatalogConfig) -> Self {
        Self {
            repo,
            clock,
            entropy,
            config,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Lists every tree after the simulated list latency.
    ///
    /// # Errors
    /// - `ServiceUnavailable` with probability `failure_rate`, per call.
    pub async fn list_trees(&self) -> CatalogResult<Vec<TreeRecord>> {
        let started_at = Instant::now();
        self.clock.sleep(self.config.list_delay()).await;

        let sample = self.entropy.next_unit();
        if sample < self.config.failure_rate {
            warn!(
                "event=list_trees module=service status=error error_code=service_unavailable duration_ms={}",
                started_at.elapsed().as_millis()
            );
            return Err(CatalogError::ServiceUnavailable {
                message: SERVICE_UNAVAILABLE_MESSAGE.to_string(),
            });
        }

        let trees = self.repo.list_trees();
        info!(
            "event=list_trees module=service status=ok count={} duration_ms={}",
            trees.len(),
            started_at.elapsed().as_millis()
        );
        Ok(trees)
    }

    /// Fetches one tree by exact id after the simulated lookup latency.
    ///
    /// Returns `None` when the id is unknown.
    pub async fn fetch_tree(&self, id: &str) -> Option<TreeRecord> {
        self.clock.sleep(self.config.lookup_delay()).await;
        let found = self.repo.find_tree(id);
        debug!(
            "event=fetch_tree module=service status=ok found={}",
            found.is_some()
        );
        found
    }

    /// Derives the deep link and QR image URL for `id`. No I/O.
    pub fn qr_target(&self, id: &str) -> QrTarget {
        derive_qr_target(&self.config, id)
    }
}
