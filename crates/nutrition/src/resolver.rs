//! Staged nutrition resolution.
//!
//! A query is tried against each [`Stage`] in order and the first stage that
//! produces anything wins:
//!
//! 1. [`Stage::Exact`]: the trimmed query is a table key
//! 2. [`Stage::Fuzzy`]: a table key contains the query or is contained in it
//! 3. [`Stage::Remote`]: a configured [`RemoteLookup`], under a timeout
//! 4. [`Stage::Estimated`]: keyword category averages
//!
//! Local stages are pure functions of the table and the query. The remote
//! stage never fails the resolution: errors and timeouts are logged and the
//! next stage runs.

use crate::advice::{Advice, advise};
use crate::catalogue::{Catalogue, catalogue};
use crate::error::{NutritionError, Result};
use crate::estimate::estimate;
use crate::matching::{exact_match, nearest_names, substring_match};
use crate::result::{RemoteFood, SearchResult};
use crate::table::ReferenceTable;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default bound on a remote lookup.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(5);

/// A remote nutrition database.
#[async_trait]
pub trait RemoteLookup: Send + Sync {
    /// Short name, used as the result id prefix (`usda`)
    fn name(&self) -> &str;

    /// Search the remote database
    async fn search(&self, query: &str) -> Result<Vec<RemoteFood>>;
}

/// One step of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Exact table key
    Exact,
    /// Substring match against table keys
    Fuzzy,
    /// Remote database, when configured
    Remote,
    /// Keyword category estimate
    Estimated,
}

impl Stage {
    /// Stage order used by [`Resolver::new`]
    pub const ALL: [Stage; 4] = [Stage::Exact, Stage::Fuzzy, Stage::Remote, Stage::Estimated];

    /// Whether the stage runs without I/O
    #[must_use]
    pub fn is_local(&self) -> bool {
        !matches!(self, Stage::Remote)
    }
}

/// Exact stage.
#[must_use]
pub fn exact_stage(table: &ReferenceTable, query: &str) -> Option<SearchResult> {
    exact_match(table, query).map(SearchResult::exact)
}

/// Fuzzy stage.
#[must_use]
pub fn fuzzy_stage(table: &ReferenceTable, query: &str) -> Option<SearchResult> {
    substring_match(table, query).map(|entry| SearchResult::fuzzy(entry, query))
}

/// Estimation stage.
#[must_use]
pub fn estimate_stage(query: &str) -> Option<SearchResult> {
    estimate(query).map(|(category, record)| SearchResult::estimated(category, query, record))
}

/// Nutrition resolver over a shared reference table.
#[derive(Clone)]
pub struct Resolver {
    table: Arc<ReferenceTable>,
    remote: Option<Arc<dyn RemoteLookup>>,
    remote_timeout: Duration,
    stages: Vec<Stage>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(ReferenceTable::builtin())
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("entries", &self.table.len())
            .field("remote", &self.remote.as_ref().map(|r| r.name().to_string()))
            .field("remote_timeout", &self.remote_timeout)
            .field("stages", &self.stages)
            .finish()
    }
}

impl Resolver {
    /// Resolver over `table` with all stages and no remote source
    #[must_use]
    pub fn new(table: Arc<ReferenceTable>) -> Self {
        Self {
            table,
            remote: None,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
            stages: Stage::ALL.to_vec(),
        }
    }

    /// Enable the remote stage
    #[must_use]
    pub fn with_remote(mut self, remote: Arc<dyn RemoteLookup>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Bound the remote stage
    #[must_use]
    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout = timeout;
        self
    }

    /// Replace the stage order
    #[must_use]
    pub fn with_stages(mut self, stages: impl Into<Vec<Stage>>) -> Self {
        self.stages = stages.into();
        self
    }

    /// The table this resolver reads
    #[must_use]
    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    /// Whether a remote source is configured
    #[must_use]
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Resolve a free-text food name.
    ///
    /// Blank queries resolve to nothing without consulting any stage.
    #[instrument(skip(self))]
    pub async fn resolve(&self, query: &str) -> Vec<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        for stage in &self.stages {
            let results = match stage {
                Stage::Remote => self.remote_stage(query).await,
                local => self.local_stage(*local, query),
            };
            if !results.is_empty() {
                debug!(stage = ?stage, count = results.len(), "Resolved");
                return results;
            }
        }

        debug!("No stage produced a result");
        Vec::new()
    }

    /// Resolve using only the local stages
    #[must_use]
    pub fn resolve_local(&self, query: &str) -> Vec<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        self.stages
            .iter()
            .filter(|stage| stage.is_local())
            .map(|stage| self.local_stage(*stage, query))
            .find(|results| !results.is_empty())
            .unwrap_or_default()
    }

    fn local_stage(&self, stage: Stage, query: &str) -> Vec<SearchResult> {
        let result = match stage {
            Stage::Exact => exact_stage(&self.table, query),
            Stage::Fuzzy => fuzzy_stage(&self.table, query),
            Stage::Estimated => estimate_stage(query),
            Stage::Remote => None,
        };
        result.into_iter().collect()
    }

    async fn remote_stage(&self, query: &str) -> Vec<SearchResult> {
        let Some(remote) = &self.remote else {
            return Vec::new();
        };

        match self.search_remote(remote.as_ref(), query).await {
            Ok(foods) => foods
                .into_iter()
                .map(|food| SearchResult::remote(remote.name(), food))
                .collect(),
            Err(e) => {
                warn!(source = remote.name(), error = %e, "Remote lookup failed, falling back");
                Vec::new()
            }
        }
    }

    async fn search_remote(&self, remote: &dyn RemoteLookup, query: &str) -> Result<Vec<RemoteFood>> {
        tokio::time::timeout(self.remote_timeout, remote.search(query))
            .await
            .map_err(|_| NutritionError::Timeout(self.remote_timeout))?
    }

    /// Advice for the top result of `query`
    pub async fn advice(&self, query: &str) -> Vec<Advice> {
        self.resolve(query)
            .await
            .first()
            .map(|top| advise(&top.record.nutrients))
            .unwrap_or_default()
    }

    /// Advisory texts for the top result of `query`
    pub async fn suggestions(&self, query: &str) -> Vec<String> {
        self.advice(query)
            .await
            .into_iter()
            .map(|advice| advice.text.to_string())
            .collect()
    }

    /// Every table entry, sorted by category then name
    #[must_use]
    pub fn foods(&self) -> Catalogue {
        catalogue(&self.table)
    }

    /// Table names close to `query`, for "did you mean" hints
    #[must_use]
    pub fn did_you_mean(&self, query: &str, limit: usize) -> Vec<String> {
        nearest_names(&self.table, query.trim(), limit)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
