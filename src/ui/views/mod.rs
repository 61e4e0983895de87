pub mod grid_table;
pub mod star_delta;
pub mod upload;
