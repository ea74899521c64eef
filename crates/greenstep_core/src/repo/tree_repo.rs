//! Tree repository contracts and fixture-backed implementation.
//!
//! # Responsibility
//! - Provide read-only access to the tree catalog.
//! - Hand out owned copies so callers can never mutate backing records.
//!
//! # Invariants
//! - Ids are unique across the repository.
//! - The backing collection is immutable after construction.
//! - Lookups are exact id equality; there is no fuzzy matching here.

use crate::model::tree::{TreeId, TreeRecord, TreeValidationError};
use crate::repo::fixture::FIXTURE_TREES;
use log::debug;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors raised while building a repository over caller-supplied records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Two records share the same id.
    DuplicateId(TreeId),
    /// A record failed shape validation.
    InvalidRecord(TreeValidationError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate tree id: {id}"),
            Self::InvalidRecord(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DuplicateId(_) => None,
            Self::InvalidRecord(err) => Some(err),
        }
    }
}

impl From<TreeValidationError> for RepoError {
    fn from(value: TreeValidationError) -> Self {
        Self::InvalidRecord(value)
    }
}

/// Read-only repository interface for tree records.
pub trait TreeRepository {
    /// Returns a fresh copy of every record, in store order.
    fn list_trees(&self) -> Vec<TreeRecord>;
    /// Returns a copy of the record with exactly this id.
    fn find_tree(&self, id: &str) -> Option<TreeRecord>;
    /// Number of records in the store.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Repository over an immutable record collection.
///
/// `Default` uses the compiled-in fixture; clones share the same backing
/// collection.
#[derive(Debug, Clone)]
pub struct FixtureTreeRepository {
    records: Records,
}

#[derive(Debug, Clone)]
enum Records {
    Fixture,
    Custom(Arc<[TreeRecord]>),
}

impl FixtureTreeRepository {
    /// Repository over the compiled-in six-tree fixture.
    pub fn new() -> Self {
        Self {
            records: Records::Fixture,
        }
    }

    /// Builds a repository over caller-supplied records.
    ///
    /// # Errors
    /// - `InvalidRecord` when any record fails `TreeRecord::validate()`.
    /// - `DuplicateId` when two records share an id.
    pub fn with_records(records: Vec<TreeRecord>) -> RepoResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.validate()?;
            if !seen.insert(record.id.clone()) {
                return Err(RepoError::DuplicateId(record.id.clone()));
            }
        }
        debug!(
            "event=repo_init module=repo status=ok source=custom count={}",
            records.len()
        );
        Ok(Self {
            records: Records::Custom(records.into()),
        })
    }

    fn records(&self) -> &[TreeRecord] {
        match &self.records {
            Records::Fixture => FIXTURE_TREES.as_slice(),
            Records::Custom(records) => records,
        }
    }
}

impl Default for FixtureTreeRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeRepository for FixtureTreeRepository {
    fn list_trees(&self) -> Vec<TreeRecord> {
        self.records().to_vec()
    }

    fn find_tree(&self, id: &str) -> Option<TreeRecord> {
        self.records()
            .iter()
            .find(|record| record.id.as_str() == id)
            .cloned()
    }

    fn len(&self) -> usize {
        self.records().len()
    }
}
