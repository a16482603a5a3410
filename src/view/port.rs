use {
    crate::view::{Observer, ObserverBroadcast},
    std::sync::{Arc, RwLock, RwLockReadGuard, Weak},
};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
               Source Port
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/

/// Shared contents of a collection together with its dependents.
///
/// Cloning a port yields another handle onto the same contents; contents
/// are only ever replaced in place, so every handle observes the latest
/// state.
pub struct SourcePort<T> {
    items: Arc<RwLock<Vec<T>>>,
    cast: Arc<RwLock<ObserverBroadcast>>,
}

impl<T> SourcePort<T> {
    pub fn new() -> Self {
        SourcePort::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<T>) -> Self {
        SourcePort {
            items: Arc::new(RwLock::new(items)),
            cast: Arc::new(RwLock::new(ObserverBroadcast::new())),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.items.read().unwrap()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Runs `f` on the contents without notifying dependents.
    pub fn with_items_mut<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        f(&mut self.items.write().unwrap())
    }

    /// Swaps in new contents, keeping the container itself.
    pub fn replace(&self, items: Vec<T>) {
        *self.items.write().unwrap() = items;
    }

    pub fn add_observer(&self, observer: Weak<RwLock<dyn Observer>>) {
        self.cast.write().unwrap().add_observer(observer);
    }

    pub fn remove_observer(&self, observer: &Weak<RwLock<dyn Observer>>) -> bool {
        self.cast.write().unwrap().remove_observer(observer)
    }

    pub fn dependent_count(&self) -> usize {
        self.cast.read().unwrap().len()
    }

    /// Refreshes every dependent in registration order.
    pub fn refresh_dependents(&self) {
        // release the broadcast before refreshing so dependents may
        // (un)register further views
        let observers: Vec<_> = self.cast.read().unwrap().iter().collect();

        for observer in observers {
            observer.write().unwrap().refresh();
        }
    }

    pub fn same_port(&self, other: &SourcePort<T>) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl<T: Clone> SourcePort<T> {
    pub fn snapshot(&self) -> Vec<T> {
        self.read().clone()
    }

    pub fn get(&self, idx: usize) -> Option<T> {
        self.read().get(idx).cloned()
    }
}

impl<T> Clone for SourcePort<T> {
    fn clone(&self) -> Self {
        SourcePort {
            items: self.items.clone(),
            cast: self.cast.clone(),
        }
    }
}

impl<T> Default for SourcePort<T> {
    fn default() -> Self {
        SourcePort::new()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::view::port::*;

    struct Mirror {
        src: SourcePort<u32>,
        seen: Vec<u32>,
    }

    impl Observer for Mirror {
        fn refresh(&mut self) {
            self.seen = self.src.snapshot();
        }
    }

    #[test]
    fn port_clones_share_contents() {
        let port = SourcePort::with_items(vec![1, 2]);
        let other = port.clone();

        port.replace(vec![3]);
        assert_eq!(other.snapshot(), vec![3]);
        assert!(port.same_port(&other));
        assert!(!port.same_port(&SourcePort::with_items(vec![3])));
    }

    #[test]
    fn port_refreshes_dependents() {
        let port = SourcePort::with_items(vec![1, 2]);
        let mirror = Arc::new(RwLock::new(Mirror {
            src: port.clone(),
            seen: vec![],
        }));
        let obs: Arc<RwLock<dyn Observer>> = mirror.clone();
        port.add_observer(Arc::downgrade(&obs));
        assert_eq!(port.dependent_count(), 1);

        port.with_items_mut(|items| items.push(7));
        assert!(mirror.read().unwrap().seen.is_empty());

        port.refresh_dependents();
        assert_eq!(mirror.read().unwrap().seen, vec![1, 2, 7]);
    }
}
