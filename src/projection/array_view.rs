use {
    crate::{
        buffer::source::{Source, SourceOp},
        config::ViewConfig,
        error::ViewError,
        projection::{
            comparator::{parse_sort_args, Resolve, SortKey, SortSpec},
            filter::{FilterChain, FilterSelector, Predicate},
            paginate::Pagination,
        },
        view::{Observer, SourcePort, Upstream},
    },
    serde::Serialize,
    std::{
        cmp::Ordering,
        sync::{Arc, RwLock, Weak},
    },
    tracing::{debug, trace, warn, Level},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

struct ViewState<T>
where
    T: Clone + Send + Sync + 'static,
{
    source: Arc<dyn Upstream<T>>,
    filters: FilterChain<T>,
    sort: SortSpec<T>,
    pagination: Pagination,
    unpaginated: Vec<T>,
    port: SourcePort<T>,
}

impl<T> ViewState<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// filter -> sort -> paginate
    fn update(&mut self) {
        let items = self.source.port().snapshot();
        let mut items = self.filters.apply(items);
        self.sort.apply(&mut items);
        self.unpaginated = items;
        self.update_pagination();
    }

    fn update_pagination(&mut self) {
        let visible = self.pagination.window(&self.unpaginated);
        trace!(
            total = self.unpaginated.len(),
            visible = visible.len(),
            page = self.pagination.page(),
            "view refreshed"
        );
        self.port.replace(visible);
        self.port.refresh_dependents();
    }
}

impl<T> Observer for ViewState<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn refresh(&mut self) {
        self.update();
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                Array View
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/

/// Auto-refreshing view over a `Source` or over another view.
///
/// The visible contents are the source's items with all filters applied in
/// order, stably sorted, and cut down to the current page. They are
/// recomputed whenever the source changes and whenever a filter, the sort
/// or the pagination of this view changes.
///
/// Writes through a view (`push`, `splice`, ...) are forwarded upstream to
/// the root source; a view never mutates its derived contents directly.
pub struct ArrayView<T>
where
    T: Clone + Send + Sync + 'static,
{
    state: Arc<RwLock<ViewState<T>>>,
    port: SourcePort<T>,
}

impl<T> ArrayView<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Binds a new view to `source` and derives its initial contents.
    pub fn new(source: impl Upstream<T> + 'static) -> Self {
        let source: Arc<dyn Upstream<T>> = Arc::new(source);
        let port = SourcePort::new();

        let view = ArrayView {
            state: Arc::new(RwLock::new(ViewState {
                source: source.clone(),
                filters: FilterChain::new(),
                sort: SortSpec::Unsorted,
                pagination: Pagination::none(),
                unpaginated: Vec::new(),
                port: port.clone(),
            })),
            port,
        };

        source.port().add_observer(view.observer());
        debug!(source_len = source.port().len(), "view created");
        view.refresh();
        view
    }

    fn observer(&self) -> Weak<RwLock<dyn Observer>> {
        let observer: Arc<RwLock<dyn Observer>> = self.state.clone();
        Arc::downgrade(&observer)
    }

    fn modify(&self, f: impl FnOnce(&mut ViewState<T>)) -> &Self {
        let mut state = self.state.write().unwrap();
        f(&mut state);
        state.update();
        self
    }

    fn modify_pagination(&self, f: impl FnOnce(&mut Pagination)) -> &Self {
        let mut state = self.state.write().unwrap();
        f(&mut state.pagination);
        state.update_pagination();
        self
    }

    /// Re-derives the contents from the source.
    pub fn refresh(&self) -> &Self {
        self.modify(|_| {})
    }

    /// Creates a view of this view.
    pub fn view(&self) -> ArrayView<T> {
        ArrayView::new(self.clone())
    }

    pub fn get_port(&self) -> SourcePort<T> {
        self.port.clone()
    }

    pub fn dependent_count(&self) -> usize {
        self.port.dependent_count()
    }

    pub fn len(&self) -> usize {
        self.port.len()
    }

    pub fn is_empty(&self) -> bool {
        self.port.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<T> {
        self.port.get(idx)
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.port.snapshot()
    }

    /// Filtered and sorted contents, before pagination.
    pub fn unpaginated(&self) -> Vec<T> {
        self.state.read().unwrap().unpaginated.clone()
    }

    /// Whether this view currently tracks `source`.
    pub fn is_bound_to(&self, source: &impl Upstream<T>) -> bool {
        self.state.read().unwrap().source.port().same_port(&source.port())
    }

    //<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
    // filters

    pub fn filter(&self, pred: impl Fn(&T) -> bool + Send + Sync + 'static) -> &Self {
        self.filter_shared(Arc::new(pred))
    }

    /// Adds `pred` so it can later be removed by identity.
    pub fn filter_shared(&self, pred: Predicate<T>) -> &Self {
        self.modify(|state| state.filters.push(None, pred))
    }

    pub fn named_filter(
        &self,
        name: impl Into<String>,
        pred: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> &Self {
        let name = name.into();
        self.modify(|state| state.filters.push(Some(name), Arc::new(pred)))
    }

    /// Removes by name, by identity or (`FilterSelector::Last`) the newest
    /// filter. Nothing matching leaves the view untouched.
    pub fn remove_filter(&self, selector: impl Into<FilterSelector<T>>) -> &Self {
        let selector = selector.into();
        let mut state = self.state.write().unwrap();
        if state.filters.remove(&selector) {
            state.update();
        }
        self
    }

    pub fn remove_last_filter(&self) -> &Self {
        self.remove_filter(FilterSelector::Last)
    }

    pub fn filter_count(&self) -> usize {
        self.state.read().unwrap().filters.len()
    }

    /// Names of the named filters, oldest first.
    pub fn filter_names(&self) -> Vec<String> {
        self.state.read().unwrap().filters.names().map(String::from).collect()
    }

    //<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
    // sorting

    pub fn sort_with(&self, cmp: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> &Self {
        self.modify(|state| state.sort = SortSpec::By(Arc::new(cmp)))
    }

    /// Marks the source as already ordered; nothing is re-sorted.
    pub fn presorted(&self) -> &Self {
        self.modify(|state| state.sort = SortSpec::Presorted)
    }

    pub fn remove_sort(&self) -> &Self {
        self.modify(|state| state.sort = SortSpec::Unsorted)
    }

    //<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
    // pagination

    /// Shows only page `page` of `page_size` items. A `page_size` of zero
    /// turns pagination off. Out-of-range pages are clamped.
    pub fn paginate(&self, page_size: usize, page: usize) -> &Self {
        self.modify_pagination(|pagination| *pagination = Pagination::new(page_size, page))
    }

    pub fn unpaginate(&self) -> &Self {
        self.modify_pagination(|pagination| *pagination = Pagination::none())
    }

    /// Current page, 1 when unpaginated.
    pub fn page_number(&self) -> usize {
        self.state.read().unwrap().pagination.page()
    }

    pub fn set_page_number(&self, page: usize) -> &Self {
        self.modify_pagination(|pagination| pagination.set_page(page))
    }

    pub fn page_size(&self) -> Option<usize> {
        self.state.read().unwrap().pagination.page_size()
    }

    pub fn page_count(&self) -> usize {
        let state = self.state.read().unwrap();
        state.pagination.page_count(state.unpaginated.len())
    }

    /// Number of items before pagination.
    pub fn total(&self) -> usize {
        self.state.read().unwrap().unpaginated.len()
    }

    /// Page on which `item` appears. Always 1 when unpaginated; a paginated
    /// view gives 0 for items filtered out or missing from the source.
    pub fn item_page_number(&self, item: &T) -> usize
    where
        T: PartialEq,
    {
        let state = self.state.read().unwrap();
        if !state.pagination.is_paginated() {
            return 1;
        }

        state
            .unpaginated
            .iter()
            .position(|x| x == item)
            .map_or(0, |idx| state.pagination.page_of(idx))
    }

    //<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
    // lifecycle

    /// Unhooks the view from its live source and rebinds it to a fresh
    /// `Source` holding a copy of the current unpaginated contents.
    ///
    /// The previous source stops refreshing (and referencing) this view.
    /// Mutating the returned source still drives the view.
    #[tracing::instrument(level = Level::DEBUG, skip_all)]
    pub fn detach(&self) -> Source<T> {
        let observer = self.observer();
        let mut state = self.state.write().unwrap();

        state.source.port().remove_observer(&observer);

        let snapshot = Source::with_data(state.unpaginated.clone());
        snapshot.get_port().add_observer(observer);
        state.source = Arc::new(snapshot.clone());
        state.update();

        debug!(len = snapshot.len(), "view detached");
        snapshot
    }

    //<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
    // writes, forwarded to the root source; indices refer to root positions

    pub fn push(&self, val: T) {
        self.apply(SourceOp::Push(val));
    }

    pub fn pop(&self) -> Option<T> {
        self.apply(SourceOp::Pop).pop()
    }

    pub fn push_front(&self, val: T) {
        self.apply(SourceOp::PushFront(val));
    }

    pub fn pop_front(&self) -> Option<T> {
        self.apply(SourceOp::PopFront).pop()
    }

    pub fn splice(&self, idx: usize, remove: usize, insert: impl IntoIterator<Item = T>) -> Vec<T> {
        self.apply(SourceOp::Splice {
            idx,
            remove,
            insert: insert.into_iter().collect(),
        })
    }
}

impl<T> ArrayView<T>
where
    T: Resolve + Clone + Send + Sync + 'static,
{
    /// Sorts by field paths, earlier keys first. No keys clears sorting.
    pub fn sort<K: Into<SortKey>>(&self, keys: impl IntoIterator<Item = K>) -> &Self {
        let keys = keys.into_iter().map(Into::into).collect::<Vec<SortKey>>();
        self.modify(|state| state.sort = SortSpec::from_keys(&keys))
    }

    /// Like `sort`, from loose string arguments (see `parse_sort_args`).
    /// Unreadable arguments leave the view untouched.
    pub fn sort_fields(&self, args: &[&str]) -> &Self {
        match parse_sort_args(args) {
            Ok(keys) => self.sort(keys),
            Err(err) => {
                warn!(?args, %err, "ignoring sort arguments");
                self
            }
        }
    }

    /// Applies sort and pagination settings in one refresh.
    pub fn configure(&self, config: &ViewConfig) -> &Self {
        self.modify(|state| {
            state.sort = SortSpec::from_keys(&config.sort);
            state.pagination = Pagination::new(config.page_size.unwrap_or(0), config.page.unwrap_or(1));
        })
    }
}

impl<T> ArrayView<T>
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    /// Visible contents as a JSON array.
    pub fn to_json(&self) -> Result<String, ViewError> {
        Ok(serde_json::to_string(&*self.port.read())?)
    }
}

impl<T> Upstream<T> for ArrayView<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn port(&self) -> SourcePort<T> {
        self.get_port()
    }

    fn apply(&self, op: SourceOp<T>) -> Vec<T> {
        let source = self.state.read().unwrap().source.clone();
        source.apply(op)
    }
}

impl<T> Clone for ArrayView<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        ArrayView {
            state: self.state.clone(),
            port: self.port.clone(),
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
