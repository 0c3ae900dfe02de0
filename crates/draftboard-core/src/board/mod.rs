pub mod builder;
pub mod ledger;
pub mod live;

pub use builder::{build_board, DraftBoard, DraftPick, PickedPlayer};
pub use ledger::{current_owner, PickLedger};
pub use live::{overlay_live_picks, slot_for_overall_pick};
