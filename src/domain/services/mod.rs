pub mod aggregation;
pub mod categories;
pub mod filters;
pub mod headers;
pub mod hierarchy;
