//! Auto-refreshing Array Views
//!
//! An [`ArrayView`] is a derived sequence that always reflects its source after
//! applying, in order, a chain of filter predicates, an optional sort and an
//! optional page window.
//! Mutating the root [`Source`] through its `push` / `pop` / `push_front` /
//! `pop_front` / `splice` operations refreshes every dependent view before the
//! call returns, transitively through views of views.
//!
//! Views are replaced wholesale on every refresh; there are no incremental
//! diffs and no indexes.
//!
//!# Examples
//!
//! ```
//! use array_view::Source;
//! use serde_json::json;
//!
//! let source = Source::with_data(vec![
//!     json!({"n": "b", "v": 2}),
//!     json!({"n": "a", "v": 1}),
//!     json!({"n": "c", "v": 3}),
//! ]);
//!
//! let view = source.view();
//! view.sort(["n"])
//!     .filter(|x| x["v"].as_i64() > Some(1));
//!
//! assert_eq!(view.to_vec(), vec![json!({"n": "b", "v": 2}), json!({"n": "c", "v": 3})]);
//!
//! source.push(json!({"n": "d", "v": 4}));
//! assert_eq!(view.len(), 3);
//!
//! // views of views follow along
//! let page = view.view();
//! page.paginate(2, 2);
//! assert_eq!(page.to_vec(), vec![json!({"n": "d", "v": 4})]);
//!
//! // a detached view keeps its contents but stops following `source`
//! let frozen = view.detach();
//! source.clear();
//! assert_eq!(view.total(), 3);
//! assert_eq!(frozen.len(), 3);
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod projection;
pub mod view;

pub use {
    buffer::source::{Source, SourceOp},
    config::ViewConfig,
    error::ViewError,
    projection::{
        array_view::ArrayView,
        comparator::{build_comparator, Direction, FieldPath, Resolve, SortKey, SortSpec},
        filter::{FilterSelector, Predicate},
    },
};
