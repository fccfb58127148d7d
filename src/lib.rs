pub mod analyzers;
pub mod catalog;
pub mod fetch;
pub mod output;
pub mod records;
pub mod store;
