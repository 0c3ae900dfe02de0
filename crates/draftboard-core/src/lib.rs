// Draft order and draft board engine.
//
// Pure computation over already-parsed league data: optimal-lineup Max PF,
// playoff finish, draft order policies, traded-pick-aware board construction
// and the live-draft overlay. Nothing here performs I/O.

pub mod board;
pub mod error;
pub mod league;
pub mod lineup;
pub mod order;
pub mod playoffs;
pub mod standings;

pub use board::{build_board, current_owner, overlay_live_picks, DraftBoard, DraftPick};
pub use error::EngineError;
pub use lineup::optimizer::{optimal_lineup_points, LineupStrategy};
pub use lineup::season::{max_potential_points, season_weeks, MaxPfCalculator};
pub use order::{calculate_draft_order, DraftOrderMethod, OrderInputs};
pub use standings::TeamStanding;
