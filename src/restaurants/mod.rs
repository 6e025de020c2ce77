pub mod collection;
pub mod source;
pub mod store;
