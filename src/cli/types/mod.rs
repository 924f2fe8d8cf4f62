//! Type-safe wrappers and enums for pickers, weeks and pick sides.

pub mod ids;
pub mod side;
pub mod time;

pub use ids::PickerId;
pub use side::{Selection, SpreadSide, TotalSide};
pub use time::{Season, Week};
