pub mod columns;
pub mod record;
pub mod rows;
pub mod upload;
