pub mod artwork;
pub mod providers;
pub mod recommendations;

pub use artwork::ArtworkService;
pub use recommendations::{Recommender, ScoredTitle, ScoringWeights};
