pub mod achievements;
pub mod contract;
pub mod error;
pub mod msg;
pub mod points;
pub mod state;
pub mod streak;
