pub mod artwork;
pub mod catalog;

pub use artwork::{Artwork, TmdbMovie, TmdbSearchResponse};
pub use catalog::{Catalog, CatalogRow, TitleIndex};
