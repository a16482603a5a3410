
pub mod source;
