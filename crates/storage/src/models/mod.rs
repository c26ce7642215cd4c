mod game;
mod participant;
mod score;
mod team;

pub use game::Game;
pub use participant::{Participant, Sex};
pub use score::{PointsError, Score, parse_points};
pub use team::Team;
