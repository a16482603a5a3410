
use crate::buffer::source::SourceOp;

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 Upstream
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/

/// Anything a view can derive from: a root `Source` or another view.
pub trait Upstream<T>: Send + Sync {
    /// Contents and dependents of this collection
    fn port(&self) -> SourcePort<T>;

    /// Performs `op` on the underlying root storage and returns the removed items.
    fn apply(&self, op: SourceOp<T>) -> Vec<T>;
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub mod observer;
pub mod port;

pub use {
    observer::{Observer, ObserverBroadcast},
    port::SourcePort,
};
