use {
    crate::{
        error::ViewError,
        projection::array_view::ArrayView,
        view::{SourcePort, Upstream},
    },
    serde::{de::DeserializeOwned, Deserialize, Serialize},
    std::cmp::min,
    tracing::trace,
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// The intercepted mutations of a source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SourceOp<T> {
    Push(T),
    Pop,
    PushFront(T),
    PopFront,
    Splice { idx: usize, remove: usize, insert: Vec<T> },
}

impl<T> SourceOp<T> {
    /// Performs the op on `data`, returning whatever it removed.
    /// Out-of-range splice bounds are clamped to the vector.
    pub fn apply_to(self, data: &mut Vec<T>) -> Vec<T> {
        match self {
            SourceOp::Push(val) => {
                data.push(val);
                vec![]
            }
            SourceOp::Pop => data.pop().into_iter().collect(),
            SourceOp::PushFront(val) => {
                data.insert(0, val);
                vec![]
            }
            SourceOp::PopFront => {
                if data.is_empty() {
                    vec![]
                } else {
                    vec![data.remove(0)]
                }
            }
            SourceOp::Splice { idx, remove, insert } => {
                let start = min(idx, data.len());
                let end = start + min(remove, data.len() - start);
                data.splice(start..end, insert).collect()
            }
        }
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                  Source
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/

/// Root collection owning the items views derive from.
///
/// `Source` is a handle: clones refer to the same items and the same
/// dependents. Every mutation refreshes all dependent views before
/// returning.
pub struct Source<T>
where
    T: Clone + Send + Sync + 'static,
{
    port: SourcePort<T>,
}

impl<T> Source<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn with_data(data: Vec<T>) -> Self {
        Source {
            port: SourcePort::with_items(data),
        }
    }

    pub fn new() -> Self {
        Source::with_data(vec![])
    }

    pub fn get_port(&self) -> SourcePort<T> {
        self.port.clone()
    }

    /// Creates a new view showing the full contents of this source.
    pub fn view(&self) -> ArrayView<T> {
        ArrayView::new(self.clone())
    }

    pub fn apply_op(&self, op: SourceOp<T>) -> Vec<T> {
        let removed = self.port.with_items_mut(move |data| op.apply_to(data));
        trace!(
            len = self.port.len(),
            removed = removed.len(),
            dependents = self.port.dependent_count(),
            "source mutated"
        );
        self.refresh_dependents();
        removed
    }

    pub fn refresh_dependents(&self) {
        self.port.refresh_dependents();
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

    pub fn push(&self, val: T) {
        self.apply_op(SourceOp::Push(val));
    }

    pub fn pop(&self) -> Option<T> {
        self.apply_op(SourceOp::Pop).pop()
    }

    pub fn push_front(&self, val: T) {
        self.apply_op(SourceOp::PushFront(val));
    }

    pub fn pop_front(&self) -> Option<T> {
        self.apply_op(SourceOp::PopFront).pop()
    }

    pub fn splice(&self, idx: usize, remove: usize, insert: impl IntoIterator<Item = T>) -> Vec<T> {
        self.apply_op(SourceOp::Splice {
            idx,
            remove,
            insert: insert.into_iter().collect(),
        })
    }

    pub fn insert(&self, idx: usize, val: T) {
        self.splice(idx, 0, Some(val));
    }

    pub fn remove(&self, idx: usize) -> Option<T> {
        self.splice(idx, 1, None::<T>).pop()
    }

    pub fn clear(&self) -> Vec<T> {
        self.splice(0, self.len(), None::<T>)
    }
}

impl<T> Source<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Applies one JSON-encoded `SourceOp`.
    pub fn apply_json(&self, json: &str) -> Result<Vec<T>, ViewError> {
        let op = serde_json::from_str::<SourceOp<T>>(json)?;
        Ok(self.apply_op(op))
    }
}

impl<T> Upstream<T> for Source<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn port(&self) -> SourcePort<T> {
        self.get_port()
    }

    fn apply(&self, op: SourceOp<T>) -> Vec<T> {
        self.apply_op(op)
    }
}

impl<T> Clone for Source<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Source {
            port: self.port.clone(),
        }
    }
}

impl<T> Default for Source<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Source::new()
    }
}

impl<T> From<Vec<T>> for Source<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn from(data: Vec<T>) -> Self {
        Source::with_data(data)
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::buffer::source::*;

    #[test]
    fn source_ops_return_removed_items() {
        let source = Source::with_data(vec!['b', 'c']);

        source.push('d');
        source.push_front('a');
        assert_eq!(source.to_vec(), vec!['a', 'b', 'c', 'd']);

        assert_eq!(source.pop(), Some('d'));
        assert_eq!(source.pop_front(), Some('a'));
        assert_eq!(source.to_vec(), vec!['b', 'c']);

        assert_eq!(source.splice(1, 1, vec!['x', 'y']), vec!['c']);
        assert_eq!(source.to_vec(), vec!['b', 'x', 'y']);

        source.insert(0, 'q');
        assert_eq!(source.remove(1), Some('b'));
        assert_eq!(source.to_vec(), vec!['q', 'x', 'y']);

        assert_eq!(source.clear(), vec!['q', 'x', 'y']);
        assert_eq!(source.pop(), None);
        assert_eq!(source.pop_front(), None);
    }

    #[test]
    fn splice_clamps_out_of_range_bounds() {
        let source = Source::with_data(vec![1, 2, 3]);

        assert_eq!(source.splice(10, 5, vec![4]), Vec::<i32>::new());
        assert_eq!(source.to_vec(), vec![1, 2, 3, 4]);

        assert_eq!(source.splice(2, 100, None::<i32>), vec![3, 4]);
        assert_eq!(source.to_vec(), vec![1, 2]);
        assert_eq!(source.remove(7), None);
    }

    #[test]
    fn source_clones_share_items() {
        let source = Source::new();
        let handle = source.clone();

        handle.push(1);
        assert_eq!(source.to_vec(), vec![1]);
        assert_eq!(source.get(0), Some(1));
        assert_eq!(source.get(1), None);
    }

    #[test]
    fn apply_json_replays_recorded_op() {
        let source = Source::with_data(vec![1, 2, 3]);

        let op = serde_json::to_string(&SourceOp::Splice {
            idx: 0,
            remove: 2,
            insert: vec![9],
        })
        .unwrap();

        assert_eq!(source.apply_json(&op).unwrap(), vec![1, 2]);
        assert_eq!(source.to_vec(), vec![9, 3]);

        assert_eq!(source.apply_json("\"Pop\"").unwrap(), vec![3]);
        assert!(source.apply_json("{\"Shove\": 1}").is_err());
        assert_eq!(source.to_vec(), vec![9]);
    }
}
