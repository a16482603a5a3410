use std::sync::Arc;

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Picks the filter `remove_filter` takes out.
pub enum FilterSelector<T> {
    /// most recently added
    Last,
    Name(String),
    /// matched by identity
    Predicate(Predicate<T>),
}

impl<T> From<&str> for FilterSelector<T> {
    fn from(name: &str) -> Self {
        FilterSelector::Name(name.to_string())
    }
}

impl<T> From<String> for FilterSelector<T> {
    fn from(name: String) -> Self {
        FilterSelector::Name(name)
    }
}

impl<T> From<Predicate<T>> for FilterSelector<T> {
    fn from(pred: Predicate<T>) -> Self {
        FilterSelector::Predicate(pred)
    }
}

impl<T> From<&Predicate<T>> for FilterSelector<T> {
    fn from(pred: &Predicate<T>) -> Self {
        FilterSelector::Predicate(pred.clone())
    }
}

impl<T> From<Option<&str>> for FilterSelector<T> {
    fn from(name: Option<&str>) -> Self {
        name.map_or(FilterSelector::Last, FilterSelector::from)
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
               Filter Chain
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/

struct NamedFilter<T> {
    name: Option<String>,
    pred: Predicate<T>,
}

/// Predicates in registration order.
pub struct FilterChain<T> {
    filters: Vec<NamedFilter<T>>,
}

impl<T> FilterChain<T> {
    pub fn new() -> Self {
        FilterChain {
            filters: Vec::new(),
        }
    }

    /// Appends `pred`. A name already in use moves over to the new
    /// filter; the older one stays active but can then only be removed
    /// by identity or as the last one.
    pub fn push(&mut self, name: Option<String>, pred: Predicate<T>) {
        if let Some(name) = name.as_ref() {
            for f in self.filters.iter_mut() {
                if f.name.as_ref() == Some(name) {
                    f.name = None;
                }
            }
        }
        self.filters.push(NamedFilter { name, pred });
    }

    /// Returns `true` if a filter was removed.
    pub fn remove(&mut self, selector: &FilterSelector<T>) -> bool {
        let idx = match selector {
            FilterSelector::Last => self.filters.len().checked_sub(1),
            FilterSelector::Name(name) => self
                .filters
                .iter()
                .position(|f| f.name.as_deref() == Some(name.as_str())),
            FilterSelector::Predicate(pred) => self
                .filters
                .iter()
                .position(|f| Arc::ptr_eq(&f.pred, pred)),
        };

        if let Some(idx) = idx {
            self.filters.remove(idx);
            true
        } else {
            false
        }
    }

    /// Each predicate sees only what the previous ones kept.
    pub fn apply(&self, mut items: Vec<T>) -> Vec<T> {
        for f in self.filters.iter() {
            items.retain(|x| (f.pred)(x));
        }
        items
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.filters.iter().filter_map(|f| f.name.as_deref())
    }
}

impl<T> Default for FilterChain<T> {
    fn default() -> Self {
        FilterChain::new()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::projection::filter::*;

    fn pred(f: impl Fn(&i32) -> bool + Send + Sync + 'static) -> Predicate<i32> {
        Arc::new(f)
    }

    #[test]
    fn filters_apply_in_sequence() {
        let mut chain = FilterChain::new();
        chain.push(None, pred(|x| *x > 2));
        chain.push(Some("even".into()), pred(|x| x % 2 == 0));

        assert_eq!(chain.apply((0..10).collect()), vec![4, 6, 8]);
        assert_eq!(chain.names().collect::<Vec<_>>(), vec!["even"]);
    }

    #[test]
    fn remove_by_name_identity_and_last() {
        let small = pred(|x| *x < 5);
        let mut chain = FilterChain::new();
        chain.push(None, small.clone());
        chain.push(Some("odd".into()), pred(|x| x % 2 == 1));
        chain.push(None, pred(|x| *x != 3));

        assert!(chain.remove(&FilterSelector::Last));
        assert_eq!(chain.apply((0..10).collect()), vec![1, 3]);

        assert!(chain.remove(&"odd".into()));
        assert!(!chain.remove(&"odd".into()));
        assert_eq!(chain.apply((0..10).collect()), vec![0, 1, 2, 3, 4]);

        assert!(chain.remove(&FilterSelector::from(&small)));
        assert!(chain.is_empty());
        assert!(!chain.remove(&FilterSelector::Last));
    }

    #[test]
    fn reused_name_moves_to_newest_filter() {
        let mut chain = FilterChain::new();
        chain.push(Some("k".into()), pred(|x| *x > 0));
        chain.push(Some("k".into()), pred(|x| *x < 3));

        assert!(chain.remove(&"k".into()));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.apply(vec![-1, 0, 1, 5]), vec![1, 5]);
        assert!(!chain.remove(&"k".into()));
    }
}
