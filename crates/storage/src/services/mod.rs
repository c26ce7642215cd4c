pub mod geo;
pub mod statistics;
