
pub mod comparator;
pub mod filter;
pub mod paginate;
pub mod array_view;
