// Lineup scoring: slot eligibility, weekly optimal lineups, season Max PF.

pub mod optimizer;
pub mod position;
pub mod season;
