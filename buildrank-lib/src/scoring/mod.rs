//! Weighted Sum Model scoring and ranking.
//!
//! Scoring is a whole-corpus operation: column maxima are only known once every entity has been
//! measured, so [`score`] takes the complete metric matrix at once.

mod weights;
mod wsm;

pub use weights::WeightVector;
pub use wsm::{ScoredEntity, score};
