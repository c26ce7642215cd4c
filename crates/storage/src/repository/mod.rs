pub mod game;
pub mod participant;
pub mod score;
pub mod statistics;
pub mod team;
