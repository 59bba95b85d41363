//! Selection domain - candidate items and the playlist selection engine.

mod candidate;
mod engine;

pub use candidate::{CandidateItem, SequenceRole};
pub use engine::{filter_contraindicated, select, Selection};
