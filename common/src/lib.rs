pub mod number_pool;
pub mod random;
pub mod types;
