//! List page state for one resource.
//!
//! `ListStore` owns the collection, the selection, the pagination cursor, the
//! request status and the active tab and search query. Every change goes
//! through a named `&mut self` operation; everything a page renders is derived
//! on read (`filtered`, `page_slice`, `pagination_info`, `stats`, `view`).

pub mod draft;
pub mod filter;
pub mod id;
pub mod mutation;
pub mod pagination;
pub mod stats;

use std::collections::HashSet;
use std::fmt;

use jiff::civil::Date;
use serde_json::Value;

use crate::entity::{Entity, EntityId};
use crate::error::Result;
use crate::normalize::normalize;
use crate::remote::CollectionClient;
use crate::types::Resource;

pub use draft::Draft;
pub use filter::{FilterContext, SearchQuery, Tab};
pub use id::IdGenerator;
pub use pagination::PaginationInfo;
pub use stats::{MovieStats, Stats, UserStats};

// ============================================================================
// State Types
// ============================================================================

/// Lifecycle of the most recent fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed(String),
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestStatus::Failed(reason) => Some(reason.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Idle => write!(f, "idle"),
            RequestStatus::Loading => write!(f, "loading"),
            RequestStatus::Succeeded => write!(f, "succeeded"),
            RequestStatus::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Handle for one in-flight fetch, issued by [`ListStore::begin_load`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "pass the ticket to complete_load"]
pub struct LoadTicket {
    seq: u64,
}

/// Whether a fetch completion was applied to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer fetch was started after this one; its result was dropped
    Stale,
}

/// One rendered row
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    pub entity: &'a Entity,
    pub selected: bool,
}

/// Everything a list page renders, derived from a single clock reading
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<'a> {
    pub resource: Resource,
    pub tab: Tab,
    pub search: &'a str,
    pub rows: Vec<Row<'a>>,
    pub pagination: PaginationInfo,
    pub selected_count: usize,
    pub all_visible_selected: bool,
    pub status: &'a RequestStatus,
}

/// Client-side state for a movies or users list page
#[derive(Debug, Clone)]
pub struct ListStore {
    resource: Resource,
    collection: Vec<Entity>,
    selection: HashSet<EntityId>,
    page: usize,
    page_size: usize,
    status: RequestStatus,
    tab: Tab,
    search: String,
    ids: IdGenerator,
    issued_seq: u64,
}

impl ListStore {
    pub fn new(resource: Resource, page_size: usize) -> Self {
        Self {
            resource,
            collection: Vec::new(),
            selection: HashSet::new(),
            page: 1,
            page_size: page_size.max(1),
            status: RequestStatus::Idle,
            tab: Tab::All,
            search: String::new(),
            ids: IdGenerator::new(),
            issued_seq: 0,
        }
    }

    /// Store with the resource's default page size
    pub fn for_resource(resource: Resource) -> Self {
        Self::new(resource, resource.default_page_size())
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn entities(&self) -> &[Entity] {
        &self.collection
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.collection.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn selection(&self) -> &HashSet<EntityId> {
        &self.selection
    }

    /// Selected ids in collection order
    pub fn selected_ids(&self) -> Vec<EntityId> {
        self.collection
            .iter()
            .filter(|e| self.selection.contains(e.id()))
            .map(|e| e.id().clone())
            .collect()
    }

    pub fn is_selected(&self, id: &EntityId) -> bool {
        self.selection.contains(id)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// Mark a fetch as started and hand out its ticket.
    ///
    /// The store stays readable and mutable until the matching
    /// [`complete_load`](Self::complete_load).
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued_seq += 1;
        self.status = RequestStatus::Loading;
        tracing::debug!(resource = %self.resource, seq = self.issued_seq, "load started");
        LoadTicket {
            seq: self.issued_seq,
        }
    }

    /// Apply the result of a fetch.
    ///
    /// Only the most recently issued ticket is applied. On success the
    /// collection is replaced wholesale (discarding local edits) and the
    /// selection is pruned to surviving keys; page and tab are kept. On
    /// failure the collection is left untouched.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Value>) -> LoadOutcome {
        if ticket.seq != self.issued_seq {
            tracing::debug!(
                resource = %self.resource,
                seq = ticket.seq,
                latest = self.issued_seq,
                "discarding stale load"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(raw) => {
                let entities = normalize(raw, self.resource);
                self.replace_collection(entities);
                self.status = RequestStatus::Succeeded;
                tracing::debug!(
                    resource = %self.resource,
                    count = self.collection.len(),
                    "load succeeded"
                );
            }
            Err(err) => {
                let reason = err.reason();
                tracing::warn!(resource = %self.resource, %reason, "load failed");
                self.status = RequestStatus::Failed(reason);
            }
        }
        LoadOutcome::Applied
    }

    /// Fetch through `client` and apply the result. Calling this again after a
    /// failure is the retry.
    pub async fn load(&mut self, client: &dyn CollectionClient) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = client.fetch_all(self.resource).await;
        self.complete_load(ticket, result)
    }

    /// Seed the collection directly, as a successful load would
    pub fn replace_collection(&mut self, entities: Vec<Entity>) {
        self.collection = entities;
        let keys: HashSet<&EntityId> = self.collection.iter().map(Entity::id).collect();
        self.selection.retain(|id| keys.contains(id));
    }

    // ------------------------------------------------------------------------
    // Navigation and selection
    // ------------------------------------------------------------------------

    /// Move to page `n`, clamped into `[1, total_pages]`. Clears the selection.
    pub fn set_page(&mut self, n: usize) {
        let ctx = FilterContext::now();
        let len = self.filtered_at(ctx).len();
        self.page = pagination::clamp_page(n, len, self.page_size);
        self.selection.clear();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Flip membership of `id` in the selection. Returns whether it is now
    /// selected. Ids outside the collection are ignored.
    pub fn toggle_selection(&mut self, id: &EntityId) -> bool {
        if !self.contains(id) {
            tracing::debug!(resource = %self.resource, %id, "ignoring selection of unknown id");
            return false;
        }
        if self.selection.remove(id) {
            false
        } else {
            self.selection.insert(id.clone());
            true
        }
    }

    /// Make the selection exactly the rows on the current page
    pub fn select_all_visible(&mut self) {
        let visible: HashSet<EntityId> =
            self.page_slice().iter().map(|e| e.id().clone()).collect();
        self.selection = visible;
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Header checkbox: clear when every visible row is selected, else select them all
    pub fn toggle_select_all(&mut self) {
        if self.all_visible_selected(FilterContext::now()) {
            self.clear_selection();
        } else {
            self.select_all_visible();
        }
    }

    /// Switch tab. Resets to page 1 and clears the selection.
    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.page = 1;
        self.selection.clear();
    }

    /// Change the search query. Resets to page 1 and clears the selection.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.page = 1;
        self.selection.clear();
    }

    // ------------------------------------------------------------------------
    // Derivations
    // ------------------------------------------------------------------------

    /// Entities passing the active tab and search query, in collection order
    pub fn filtered(&self) -> Vec<&Entity> {
        self.filtered_at(FilterContext::now())
    }

    pub fn filtered_at(&self, ctx: FilterContext) -> Vec<&Entity> {
        let search = SearchQuery::new(&self.search);
        self.collection
            .iter()
            .filter(|e| self.tab.matches(e, ctx))
            .filter(|e| search.matches(e, self.resource))
            .collect()
    }

    /// Rows of the current page
    pub fn page_slice(&self) -> Vec<&Entity> {
        self.page_slice_at(FilterContext::now())
    }

    pub fn page_slice_at(&self, ctx: FilterContext) -> Vec<&Entity> {
        let filtered = self.filtered_at(ctx);
        let range = pagination::page_range(filtered.len(), self.page_size, self.page);
        filtered[range].to_vec()
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.filtered().len(), self.page_size)
    }

    pub fn pagination_info(&self) -> PaginationInfo {
        self.pagination_info_at(FilterContext::now())
    }

    pub fn pagination_info_at(&self, ctx: FilterContext) -> PaginationInfo {
        PaginationInfo::compute(self.filtered_at(ctx).len(), self.page_size, self.page)
    }

    /// Stats over the whole collection, independent of tab and search
    pub fn stats(&self) -> Stats {
        self.stats_on(jiff::Zoned::now().date())
    }

    pub fn stats_on(&self, today: Date) -> Stats {
        stats::compute_stats(&self.collection, self.resource, today)
    }

    fn all_visible_selected(&self, ctx: FilterContext) -> bool {
        let visible = self.page_slice_at(ctx);
        !visible.is_empty() && visible.iter().all(|e| self.selection.contains(e.id()))
    }

    /// Page view model
    pub fn view(&self) -> ListView<'_> {
        self.view_at(FilterContext::now())
    }

    pub fn view_at(&self, ctx: FilterContext) -> ListView<'_> {
        let rows: Vec<Row<'_>> = self
            .page_slice_at(ctx)
            .into_iter()
            .map(|entity| Row {
                entity,
                selected: self.selection.contains(entity.id()),
            })
            .collect();
        let all_visible_selected = !rows.is_empty() && rows.iter().all(|r| r.selected);

        ListView {
            resource: self.resource,
            tab: self.tab,
            search: &self.search,
            rows,
            pagination: self.pagination_info_at(ctx),
            selected_count: self.selection.len(),
            all_visible_selected,
            status: &self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use serde_json::json;

    const CTX: FilterContext = FilterContext { current_year: 2026 };

    fn movies(n: usize) -> Value {
        Value::Array(
            (0..n)
                .map(|i| {
                    json!({"_id": format!("m{i}"), "title": format!("Movie {i}"), "year": 1990 + i})
                })
                .collect(),
        )
    }

    fn loaded(n: usize) -> ListStore {
        let mut store = ListStore::new(Resource::Movies, 10);
        let ticket = store.begin_load();
        assert_eq!(store.complete_load(ticket, Ok(movies(n))), LoadOutcome::Applied);
        store
    }

    fn id(s: &str) -> EntityId {
        EntityId::new(s)
    }

    #[test]
    fn test_new_store_is_idle_and_empty() {
        let store = ListStore::for_resource(Resource::Users);
        assert_eq!(store.status(), &RequestStatus::Idle);
        assert_eq!(store.page_size(), 9);
        assert_eq!(store.total_pages(), 1);
        assert!(store.page_slice().is_empty());
    }

    #[test]
    fn test_load_transitions() {
        let mut store = ListStore::new(Resource::Movies, 10);
        let ticket = store.begin_load();
        assert!(store.status().is_loading());
        store.complete_load(ticket, Ok(movies(3)));
        assert_eq!(store.status(), &RequestStatus::Succeeded);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_failed_load_keeps_collection() {
        let mut store = loaded(3);
        let ticket = store.begin_load();
        store.complete_load(ticket, Err(BoardError::Network("connection refused".into())));
        assert_eq!(store.status().error(), Some("connection refused"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut store = ListStore::new(Resource::Movies, 10);
        let first = store.begin_load();
        let second = store.begin_load();

        assert_eq!(store.complete_load(second, Ok(movies(2))), LoadOutcome::Applied);
        assert_eq!(store.complete_load(first, Ok(movies(7))), LoadOutcome::Stale);
        assert_eq!(store.len(), 2);
        assert_eq!(store.status(), &RequestStatus::Succeeded);
    }

    #[test]
    fn test_reload_keeps_page_and_prunes_selection() {
        let mut store = loaded(25);
        store.set_page(2);
        store.toggle_selection(&id("m11"));
        store.toggle_selection(&id("m20"));

        let ticket = store.begin_load();
        store.complete_load(ticket, Ok(movies(15)));
        assert_eq!(store.page(), 2);
        assert!(store.is_selected(&id("m11")));
        assert!(!store.is_selected(&id("m20")));
    }

    #[test]
    fn test_set_page_clamps_and_clears_selection() {
        let mut store = loaded(23);
        store.toggle_selection(&id("m0"));
        store.set_page(99);
        assert_eq!(store.page(), 3);
        assert!(store.selection().is_empty());
        assert_eq!(store.page_slice_at(CTX).len(), 3);

        store.set_page(0);
        assert_eq!(store.page(), 1);
    }

    #[test]
    fn test_next_and_prev_stay_in_range() {
        let mut store = loaded(12);
        store.prev_page();
        assert_eq!(store.page(), 1);
        store.next_page();
        store.next_page();
        assert_eq!(store.page(), 2);
    }

    #[test]
    fn test_toggle_selection_allows_other_pages_and_ignores_unknown() {
        let mut store = loaded(23);
        assert!(store.toggle_selection(&id("m22")));
        assert!(!store.toggle_selection(&id("nope")));
        assert_eq!(store.selected_ids(), vec![id("m22")]);
        assert!(!store.toggle_selection(&id("m22")));
        assert!(store.selection().is_empty());
    }

    #[test]
    fn test_toggle_select_all() {
        let mut store = loaded(12);
        store.toggle_select_all();
        assert_eq!(store.selection().len(), 10);
        store.toggle_select_all();
        assert!(store.selection().is_empty());

        store.toggle_selection(&id("m0"));
        store.toggle_select_all();
        assert_eq!(store.selection().len(), 10);
    }

    #[test]
    fn test_select_all_visible_drops_off_page_ids() {
        let mut store = loaded(15);
        store.toggle_selection(&id("m12"));
        store.select_all_visible();

        let expected: HashSet<EntityId> = (0..10).map(|i| id(&format!("m{i}"))).collect();
        assert_eq!(store.selection(), &expected);
        assert_eq!(store.bulk_remove(), 10);
        assert!(store.contains(&id("m12")));
    }

    #[test]
    fn test_tab_and_search_reset_page() {
        let mut store = loaded(23);
        store.set_page(3);
        store.toggle_selection(&id("m0"));
        store.set_tab(Tab::Classics);
        assert_eq!(store.page(), 1);
        assert!(store.selection().is_empty());
        assert_eq!(store.filtered_at(CTX).len(), 10);

        store.set_page(2);
        store.set_search("Movie 1");
        assert_eq!(store.page(), 1);
    }

    #[test]
    fn test_view_marks_selected_rows() {
        let mut store = loaded(3);
        store.toggle_selection(&id("m1"));
        let view = store.view_at(CTX);
        let marks: Vec<bool> = view.rows.iter().map(|r| r.selected).collect();
        assert_eq!(marks, vec![false, true, false]);
        assert_eq!(view.selected_count, 1);
        assert!(!view.all_visible_selected);
        assert_eq!(view.pagination.end_index, 3);
    }
}
