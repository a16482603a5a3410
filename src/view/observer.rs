use std::sync::{Arc, RwLock, Weak};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 Observer
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
pub trait Observer: Send + Sync {
    /// Re-derive from the observed source and pass the change on
    fn refresh(&mut self);
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 Broadcast
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/

/// Ordered set of dependents.
///
/// Observers are held weakly: the broadcast never keeps a dependent alive,
/// and dropped dependents are pruned on the next registration.
pub struct ObserverBroadcast {
    observers: Vec<Weak<RwLock<dyn Observer>>>,
}

impl ObserverBroadcast {
    pub fn new() -> Self {
        ObserverBroadcast {
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, obs: Weak<RwLock<dyn Observer>>) {
        self.cleanup();
        if !self.contains(&obs) {
            self.observers.push(obs);
        }
    }

    /// Returns `true` if `obs` was registered.
    pub fn remove_observer(&mut self, obs: &Weak<RwLock<dyn Observer>>) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| !Weak::ptr_eq(o, obs));
        self.cleanup();
        before != self.observers.len()
    }

    pub fn contains(&self, obs: &Weak<RwLock<dyn Observer>>) -> bool {
        self.observers.iter().any(|o| Weak::ptr_eq(o, obs))
    }

    fn cleanup(&mut self) {
        self.observers.retain(|o| o.strong_count() > 0);
    }

    pub fn len(&self) -> usize {
        self.observers.iter().filter(|o| o.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live observers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = Arc<RwLock<dyn Observer>>> + '_ {
        self.observers.iter().filter_map(|o| o.upgrade())
    }
}

impl Default for ObserverBroadcast {
    fn default() -> Self {
        ObserverBroadcast::new()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
