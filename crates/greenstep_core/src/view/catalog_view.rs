//! Catalog view state machine.
//!
//! # Responsibility
//! - Own the `records / query / status / selection` state of one catalog
//!   view instance.
//! - Apply transitions as a pure `(state, event) -> state` reducer.
//! - Drive load and manual retry through `CatalogController`.
//!
//! # Invariants
//! - `Loading -> Ready` only on a successful list call, `Loading -> Failed`
//!   only on a failed one.
//! - Only the most recently initiated load may commit. Completions carrying
//!   an older request id are dropped, whatever order they resolve in.
//! - After unmount, no load completion is committed.
//! - The displayed set is derived from `records` + `query`; it is never
//!   stored.
//! - Selection is only reachable in `Ready` and only for a loaded record.

use crate::model::tree::{TreeId, TreeRecord};
use crate::repo::tree_repo::TreeRepository;
use crate::runtime::{Clock, Entropy};
use crate::search::filter::{count_label, filter_trees};
use crate::service::catalog_service::{CatalogResult, CatalogService};
use crate::view::detail_view::TreeDetail;
use log::{debug, info, warn};
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Monotonic id of one initiated load. `0` means no load issued yet.
pub type LoadRequestId = u64;

/// Load lifecycle of the catalog view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    /// Last load failed; `message` is shown with a retry affordance.
    Failed { message: String },
}

/// Input events for [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    LoadStarted {
        request: LoadRequestId,
    },
    LoadSucceeded {
        request: LoadRequestId,
        records: Vec<TreeRecord>,
    },
    LoadFailed {
        request: LoadRequestId,
        message: String,
    },
    QueryChanged(String),
    Selected(TreeId),
    Closed,
    Unmounted,
}

/// Full state of one catalog view instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogState {
    records: Vec<TreeRecord>,
    query: String,
    status: LoadStatus,
    selection: Option<TreeRecord>,
    latest_request: LoadRequestId,
    mounted: bool,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogState {
    /// Fresh mounted state: `Loading`, no records, empty query.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            query: String::new(),
            status: LoadStatus::Loading,
            selection: None,
            latest_request: 0,
            mounted: true,
        }
    }

    /// Records from the last successful load.
    pub fn records(&self) -> &[TreeRecord] {
        &self.records
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn selection(&self) -> Option<&TreeRecord> {
        self.selection.as_ref()
    }

    pub fn latest_request(&self) -> LoadRequestId {
        self.latest_request
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Records matching the current query, in load order.
    pub fn visible_trees(&self) -> Vec<&TreeRecord> {
        filter_trees(&self.records, &self.query)
    }

    /// Count label shown alongside a non-empty query.
    pub fn count_label(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        Some(count_label(self.visible_trees().len()))
    }

    /// Derived presentation for the current state.
    pub fn presentation(&self) -> CatalogPresentation<'_> {
        match &self.status {
            LoadStatus::Loading => CatalogPresentation::Loading,
            LoadStatus::Failed { message } => CatalogPresentation::Failed {
                message: message.as_str(),
            },
            LoadStatus::Ready => {
                let visible = self.visible_trees();
                if !visible.is_empty() {
                    CatalogPresentation::Trees(visible)
                } else if self.query.is_empty() {
                    CatalogPresentation::Empty
                } else {
                    CatalogPresentation::NoResults {
                        query: self.query.as_str(),
                    }
                }
            }
        }
    }

    fn accepts_completion(&self, request: LoadRequestId) -> bool {
        self.mounted
            && request != 0
            && request == self.latest_request
            && self.status == LoadStatus::Loading
    }
}

/// What the catalog view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogPresentation<'a> {
    Loading,
    Failed { message: &'a str },
    /// Loaded successfully, but the store has no records.
    Empty,
    /// Non-empty query with zero matches.
    NoResults { query: &'a str },
    Trees(Vec<&'a TreeRecord>),
}

/// Applies one event to `state`.
pub fn reduce(mut state: CatalogState, event: CatalogEvent) -> CatalogState {
    match event {
        CatalogEvent::LoadStarted { request } => {
            if !state.mounted || request <= state.latest_request {
                debug!(
                    "event=catalog_load module=view status=skipped reason=not_newest request={} latest={}",
                    request, state.latest_request
                );
                return state;
            }
            state.latest_request = request;
            state.status = LoadStatus::Loading;
            state.selection = None;
        }
        CatalogEvent::LoadSucceeded { request, records } => {
            if !state.accepts_completion(request) {
                debug!(
                    "event=catalog_load module=view status=stale request={} latest={} mounted={}",
                    request, state.latest_request, state.mounted
                );
                return state;
            }
            info!(
                "event=catalog_load module=view status=ok request={} count={}",
                request,
                records.len()
            );
            state.records = records;
            state.status = LoadStatus::Ready;
        }
        CatalogEvent::LoadFailed { request, message } => {
            if !state.accepts_completion(request) {
                debug!(
                    "event=catalog_load module=view status=stale request={} latest={} mounted={}",
                    request, state.latest_request, state.mounted
                );
                return state;
            }
            warn!(
                "event=catalog_load module=view status=error request={} error={}",
                request, message
            );
            state.status = LoadStatus::Failed { message };
        }
        CatalogEvent::QueryChanged(query) => {
            state.query = query;
        }
        CatalogEvent::Selected(id) => {
            if state.status != LoadStatus::Ready {
                return state;
            }
            if let Some(record) = state.records.iter().find(|record| record.id == id) {
                state.selection = Some(record.clone());
            }
        }
        CatalogEvent::Closed => {
            state.selection = None;
        }
        CatalogEvent::Unmounted => {
            state.mounted = false;
            state.selection = None;
        }
    }
    state
}

/// Proof that a load was initiated; hand it back on completion.
///
/// Tickets are bound to the `CatalogView` that issued them and are rejected
/// by any other view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    view: u64,
    request: LoadRequestId,
}

impl LoadTicket {
    pub fn request(&self) -> LoadRequestId {
        self.request
    }
}

/// Stateful wrapper that issues request ids and feeds the reducer.
#[derive(Debug)]
pub struct CatalogView {
    id: u64,
    state: CatalogState,
    issued: LoadRequestId,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogView {
    pub fn new() -> Self {
        Self {
            id: NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed),
            state: CatalogState::new(),
            issued: 0,
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn dispatch(&mut self, event: CatalogEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, event);
    }

    /// Initiates a load. Returns `None` once the view is unmounted.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if !self.state.mounted {
            return None;
        }
        self.issued += 1;
        let request = self.issued;
        self.dispatch(CatalogEvent::LoadStarted { request });
        Some(LoadTicket {
            view: self.id,
            request,
        })
    }

    /// Initiates a manual retry; only reachable from `Failed`.
    pub fn retry(&mut self) -> Option<LoadTicket> {
        if !matches!(self.state.status, LoadStatus::Failed { .. }) {
            return None;
        }
        self.begin_load()
    }

    /// Commits a load result. Returns `false` when the result was stale or
    /// the ticket came from another view.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: CatalogResult<Vec<TreeRecord>>,
    ) -> bool {
        if ticket.view != self.id {
            debug!(
                "event=catalog_load module=view status=skipped reason=foreign_ticket request={}",
                ticket.request
            );
            return false;
        }
        let accepted = self.state.accepts_completion(ticket.request);
        let event = match result {
            Ok(records) => CatalogEvent::LoadSucceeded {
                request: ticket.request,
                records,
            },
            Err(err) => CatalogEvent::LoadFailed {
                request: ticket.request,
                message: err.user_message().to_string(),
            },
        };
        self.dispatch(event);
        accepted
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.dispatch(CatalogEvent::QueryChanged(query.into()));
    }

    /// Opens the detail view for `id`. Returns whether a record was selected.
    pub fn select(&mut self, id: impl Into<TreeId>) -> bool {
        self.dispatch(CatalogEvent::Selected(id.into()));
        self.state.selection.is_some()
    }

    pub fn close(&mut self) {
        self.dispatch(CatalogEvent::Closed);
    }

    /// Tears the view down; late load results are ignored from now on.
    pub fn unmount(&mut self) {
        self.dispatch(CatalogEvent::Unmounted);
    }

    /// Terminal rendering of the current presentation.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if let Some(label) = self.state.count_label() {
            let _ = writeln!(out, "Search: \"{}\" ({label})", self.state.query);
            out.push('\n');
        }

        match self.state.presentation() {
            CatalogPresentation::Loading => {
                out.push_str("Loading Trees...\nFetching tree data from our database\n");
            }
            CatalogPresentation::Failed { message } => {
                let _ = writeln!(out, "Unable to Load Trees\n{message}\n[Try Again]");
            }
            CatalogPresentation::Empty => {
                out.push_str("No trees have been planted in the catalog yet.\n");
            }
            CatalogPresentation::NoResults { query } => {
                let _ = writeln!(
                    out,
                    "No Trees Found\nWe couldn't find any trees matching \"{query}\". Try searching with different keywords."
                );
            }
            CatalogPresentation::Trees(trees) => {
                for tree in trees {
                    let _ = writeln!(out, "{}  [ID: {}]", tree.common_name, tree.id);
                    let _ = writeln!(out, "  {}", tree.scientific_name);
                    let _ = writeln!(out, "  Location:   {}", tree.location);
                    let _ = writeln!(out, "  Height:     {}", tree.height);
                    let _ = writeln!(out, "  CO2 Offset: {}", tree.carbon_offset);
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// Couples one `CatalogView` to a `CatalogService`.
#[derive(Debug)]
pub struct CatalogController<R: TreeRepository, C: Clock, E: Entropy> {
    service: CatalogService<R, C, E>,
    view: CatalogView,
}

impl<R: TreeRepository, C: Clock, E: Entropy> CatalogController<R, C, E> {
    /// Creates a controller with a fresh view instance.
    pub fn new(service: CatalogService<R, C, E>) -> Self {
        Self {
            service,
            view: CatalogView::new(),
        }
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CatalogView {
        &mut self.view
    }

    /// Runs the initial load. Returns whether the result was committed.
    pub async fn mount(&mut self) -> bool {
        let Some(ticket) = self.view.begin_load() else {
            return false;
        };
        let result = self.service.list_trees().await;
        self.view.complete(ticket, result)
    }

    /// Re-runs the full load from `Failed`. Returns `false` when not in
    /// `Failed` or when the result was not committed.
    pub async fn retry(&mut self) -> bool {
        let Some(ticket) = self.view.retry() else {
            return false;
        };
        info!(
            "event=catalog_retry module=view status=start request={}",
            ticket.request()
        );
        let result = self.service.list_trees().await;
        self.view.complete(ticket, result)
    }

    /// Detail presentation of the current selection.
    pub fn selected_detail(&self) -> Option<TreeDetail> {
        let record = self.view.state().selection()?;
        let qr = self.service.qr_target(record.id.as_str());
        Some(TreeDetail::from_record(record, &qr))
    }
}

#[cfg(test)]
mod tests {
    use super::{reduce, CatalogEvent, CatalogState, LoadStatus};
    use crate::repo::tree_repo::{FixtureTreeRepository, TreeRepository};

    #[test]
    fn out_of_order_start_is_ignored() {
        let state = reduce(CatalogState::new(), CatalogEvent::LoadStarted { request: 2 });
        let state = reduce(state, CatalogEvent::LoadStarted { request: 1 });
        assert_eq!(state.latest_request(), 2);
    }

    #[test]
    fn duplicate_completion_is_ignored() {
        let records = FixtureTreeRepository::new().list_trees();
        let state = reduce(CatalogState::new(), CatalogEvent::LoadStarted { request: 1 });
        let state = reduce(
            state,
            CatalogEvent::LoadSucceeded {
                request: 1,
                records: records.clone(),
            },
        );
        let state = reduce(
            state,
            CatalogEvent::LoadFailed {
                request: 1,
                message: "late".to_string(),
            },
        );
        assert_eq!(state.status(), &LoadStatus::Ready);
        assert_eq!(state.records(), records.as_slice());
    }

    #[test]
    fn completion_without_issued_request_is_ignored() {
        let records = FixtureTreeRepository::new().list_trees();
        let state = reduce(
            CatalogState::new(),
            CatalogEvent::LoadSucceeded {
                request: 0,
                records,
            },
        );
        assert_eq!(state.status(), &LoadStatus::Loading);
        assert!(state.records().is_empty());

        let state = reduce(
            state,
            CatalogEvent::LoadFailed {
                request: 0,
                message: "never issued".to_string(),
            },
        );
        assert_eq!(state.status(), &LoadStatus::Loading);
    }

    #[test]
    fn selection_ignored_while_loading() {
        let state = reduce(CatalogState::new(), CatalogEvent::Selected("tree-001".into()));
        assert!(state.selection().is_none());
    }
}
