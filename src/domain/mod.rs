pub mod entities;
pub mod errors;
pub mod sample_data;
pub mod services;
