//! Keeps a list view's visible data consistent with its location.
//!
//! The location's query parameters are the single source of truth. The
//! synchronizer derives from them the server-side scope that must be
//! fetched and the client-side filter, sort and page applied to whatever
//! was fetched. Fetches are ticketed so that a slow response for old
//! parameters can never overwrite newer results.

use std::cmp::Ordering;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use super::freshness::{RequestTicket, RequestTracker};
use super::location::{History, Location};
use super::pagination::{PageInfo, PageSlice, paginate};
use super::query::{ORDER_PARAM, PAGE_PARAM, ViewQuery};
use super::sorting::SortOrder;
use crate::api::ClientError;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

/// Definition of a list screen: how its parameters are read, which of them
/// require a new fetch and how items are filtered and ordered.
pub trait ListView {
    /// Item shown in the list.
    type Item;
    /// View-specific parameters parsed from the query.
    type Params;
    /// Server-side part of the parameters; a change means refetching.
    type Scope: Clone + PartialEq + fmt::Debug;

    /// Short view name used in logs and telemetry.
    fn name(&self) -> &'static str;

    /// Page size used when the location does not specify one.
    fn default_page_size(&self) -> u32;

    /// Reads the view's parameters, applying defaults.
    fn params(&self, query: &ViewQuery) -> Self::Params;

    /// Returns the fetch scope for `params`.
    fn scope(&self, params: &Self::Params) -> Self::Scope;

    /// Returns true when `item` passes the client-side filters.
    fn matches(&self, params: &Self::Params, item: &Self::Item) -> bool;

    /// Compares two items in ascending order of the selected sort field.
    fn compare(&self, params: &Self::Params, left: &Self::Item, right: &Self::Item) -> Ordering;
}

/// Fetch lifecycle of a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Loading {
        /// Identifier of the latest request.
        request_id: u64,
    },
    /// Data for the current scope is available.
    Loaded,
    /// The latest request failed.
    Errored(ClientError),
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result (data or error) became the view's state.
    Applied,
    /// The result belonged to superseded parameters and was dropped.
    Discarded,
}

/// Synchronizes a [`ListView`] with its location and fetched data.
pub struct ListViewSynchronizer<V: ListView> {
    view: V,
    history: History,
    items: Vec<V::Item>,
    loaded_scope: Option<V::Scope>,
    state: FetchState,
    tracker: RequestTracker<V::Scope>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl<V: ListView> ListViewSynchronizer<V> {
    /// Creates a synchronizer positioned at the history's current location.
    #[must_use]
    pub fn new(view: V, history: History) -> Self {
        Self {
            view,
            history,
            items: Vec::new(),
            loaded_scope: None,
            state: FetchState::Idle,
            tracker: RequestTracker::default(),
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }

    /// Routes telemetry events to `sink`.
    #[must_use]
    pub fn with_telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = sink;
        self
    }

    /// Returns the view definition.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Returns the current location.
    #[must_use]
    pub const fn location(&self) -> &Location {
        self.history.current()
    }

    /// Returns the current query parameters.
    #[must_use]
    pub const fn query(&self) -> &ViewQuery {
        self.history.current().query()
    }

    /// Returns the view's parameters for the current location.
    #[must_use]
    pub fn params(&self) -> V::Params {
        self.view.params(self.query())
    }

    /// Returns the scope the current location needs.
    #[must_use]
    pub fn scope(&self) -> V::Scope {
        self.view.scope(&self.params())
    }

    /// Returns the sort direction.
    #[must_use]
    pub fn order(&self) -> SortOrder {
        SortOrder::parse(self.query().get(ORDER_PARAM))
    }

    /// Returns the fetch lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &FetchState {
        &self.state
    }

    /// Returns the navigation history.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Gives the history back for further navigation.
    #[must_use]
    pub fn into_history(self) -> History {
        self.history
    }

    /// Updates one query parameter, replacing the current history entry.
    ///
    /// Returns true when the update changed the scope and a fetch is needed.
    pub fn set_param(&mut self, key: &str, value: &str) -> bool {
        let mut query = self.query().clone();
        query.set_param(key, value);
        let location = self.location().clone().with_query(query);
        debug!(view = self.view.name(), %location, "updated list parameters");
        self.history.replace(location);
        self.needs_fetch()
    }

    /// Advances one page if a next page exists.
    pub fn next_page(&mut self) -> bool {
        let info = self.page_info();
        if !info.has_next() {
            return false;
        }
        let next = info.current_page().saturating_add(1);
        self.set_param(PAGE_PARAM, &next.to_string());
        true
    }

    /// Goes back one page if not on the first page.
    pub fn previous_page(&mut self) -> bool {
        let info = self.page_info();
        if !info.has_prev() {
            return false;
        }
        let previous = info
            .current_page()
            .min(info.total_pages().saturating_add(1))
            .saturating_sub(1);
        self.set_param(PAGE_PARAM, &previous.to_string());
        true
    }

    /// Returns true when the loaded data does not belong to the current
    /// scope.
    #[must_use]
    pub fn needs_fetch(&self) -> bool {
        self.loaded_scope.as_ref() != Some(&self.scope())
    }

    /// Issues a ticket for the current scope and marks the view as loading.
    pub fn begin_fetch(&mut self) -> RequestTicket<V::Scope> {
        let ticket = self.tracker.issue(self.scope());
        debug!(
            view = self.view.name(),
            request_id = ticket.id(),
            scope = ?ticket.scope(),
            "fetch started"
        );
        self.state = FetchState::Loading {
            request_id: ticket.id(),
        };
        ticket
    }

    /// Applies a completed fetch if its ticket is still current.
    pub fn complete_fetch(
        &mut self,
        ticket: RequestTicket<V::Scope>,
        result: Result<Vec<V::Item>, ClientError>,
    ) -> FetchOutcome {
        if !self.tracker.is_current(&ticket, &self.scope()) {
            warn!(
                view = self.view.name(),
                request_id = ticket.id(),
                "discarding response for superseded parameters"
            );
            self.telemetry
                .record(TelemetryEvent::StaleResponseDiscarded {
                    view: self.view.name().to_owned(),
                    request_id: ticket.id(),
                });
            return FetchOutcome::Discarded;
        }

        match result {
            Ok(items) => {
                let latency_ms = u64::try_from(ticket.elapsed().as_millis()).unwrap_or(u64::MAX);
                debug!(
                    view = self.view.name(),
                    request_id = ticket.id(),
                    item_count = items.len(),
                    latency_ms,
                    "fetch applied"
                );
                self.telemetry.record(TelemetryEvent::ViewFetched {
                    view: self.view.name().to_owned(),
                    item_count: items.len(),
                    latency_ms,
                });
                self.items = items;
                self.loaded_scope = Some(ticket.scope().clone());
                self.state = FetchState::Loaded;
            }
            Err(error) => {
                debug!(view = self.view.name(), %error, "fetch failed");
                self.items.clear();
                self.loaded_scope = None;
                self.state = FetchState::Errored(error);
            }
        }
        FetchOutcome::Applied
    }

    /// Fetches the current scope with `fetch` and applies the result.
    ///
    /// # Errors
    ///
    /// Returns the fetch error when it was applied to the view.
    pub async fn refresh<F, Fut>(&mut self, fetch: F) -> Result<FetchOutcome, ClientError>
    where
        F: FnOnce(V::Scope) -> Fut,
        Fut: Future<Output = Result<Vec<V::Item>, ClientError>>,
    {
        let ticket = self.begin_fetch();
        let result = fetch(ticket.scope().clone()).await;
        let failure = result.as_ref().err().cloned();
        let outcome = self.complete_fetch(ticket, result);
        match failure {
            Some(error) if outcome == FetchOutcome::Applied => Err(error),
            _ => Ok(outcome),
        }
    }

    /// Like [`refresh`](Self::refresh), but only when the scope changed.
    ///
    /// # Errors
    ///
    /// Returns the fetch error when a fetch ran and failed.
    pub async fn refresh_if_needed<F, Fut>(&mut self, fetch: F) -> Result<(), ClientError>
    where
        F: FnOnce(V::Scope) -> Fut,
        Fut: Future<Output = Result<Vec<V::Item>, ClientError>>,
    {
        if self.needs_fetch() {
            self.refresh(fetch).await?;
        }
        Ok(())
    }

    /// Returns the filtered, sorted items on the current page.
    ///
    /// Until data for the current scope has loaded the page is empty.
    #[must_use]
    pub fn visible(&self) -> PageSlice<&V::Item> {
        let params = self.params();
        let query = self.query();
        let page = query.page();
        let page_size = query.page_size(self.view.default_page_size());

        if self.needs_fetch() {
            return PageSlice {
                items: Vec::new(),
                info: PageInfo::new(page, page_size, 0),
            };
        }

        let order = self.order();
        let mut filtered: Vec<&V::Item> = self
            .items
            .iter()
            .filter(|item| self.view.matches(&params, item))
            .collect();
        filtered.sort_by(|left, right| order.apply(self.view.compare(&params, left, right)));
        paginate(filtered, page, page_size)
    }

    fn page_info(&self) -> PageInfo {
        self.visible().info
    }
}
