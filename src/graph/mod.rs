pub mod forget;
pub mod query;
pub mod store;
pub mod types;
