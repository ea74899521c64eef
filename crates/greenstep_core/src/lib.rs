//! Core catalog logic for GreenStep community trees.
//! This crate owns the tree fixture, the simulated catalog service and the
//! view state machines; front ends only render what it derives.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod runtime;
pub mod search;
pub mod service;
pub mod view;

pub use config::{CatalogConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::tree::{TreeId, TreeRecord, TreeValidationError};
pub use repo::tree_repo::{FixtureTreeRepository, RepoError, RepoResult, TreeRepository};
pub use runtime::{Clock, Entropy, InstantClock, ScriptedEntropy, ThreadEntropy, TokioClock};
pub use search::filter::{count_label, filter_trees, matches_query};
pub use service::catalog_service::{
    CatalogError, CatalogResult, CatalogService, SERVICE_UNAVAILABLE_MESSAGE,
};
pub use service::qr::{deep_link, derive_qr_target, tree_id_from_deep_link, QrTarget};
pub use view::catalog_view::{
    reduce, CatalogController, CatalogEvent, CatalogPresentation, CatalogState, CatalogView,
    LoadRequestId, LoadStatus, LoadTicket,
};
pub use view::detail_view::{fallback_qr_data_uri, QrImage, TreeDetail};

/// Catalog service over the compiled-in fixture with real latency and RNG.
pub type DefaultCatalogService = CatalogService<FixtureTreeRepository, TokioClock, ThreadEntropy>;

/// Builds the production catalog service for `config`.
pub fn default_catalog_service(config: CatalogConfig) -> DefaultCatalogService {
    CatalogService::new(FixtureTreeRepository::new(), TokioClock, ThreadEntropy, config)
}

/// Minimal health-check API for smoke probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
