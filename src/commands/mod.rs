//! Command implementations for the pick-duel CLI

pub mod combine;
pub mod common;
pub mod pick;
pub mod picks;
pub mod record;
pub mod schedule;


pub use common::CommandContext;
