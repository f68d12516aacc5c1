/// Offline index construction
///
/// Turns a raw movie CSV into the three artifacts the recommender loads at
/// startup: the cleaned catalog, the TF-IDF feature matrix and the title
/// index. Row order is shared between the catalog and the matrix.
pub mod artifacts;
pub mod builder;
pub mod matrix;
pub mod stopwords;
pub mod tfidf;

pub use artifacts::IndexArtifacts;
pub use builder::{BuildReport, IndexBuilder};
pub use tfidf::{TextFeatures, TfidfVectorizer};
