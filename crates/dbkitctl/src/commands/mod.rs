pub mod batch;
pub mod exec;
pub mod query;
pub mod select;
