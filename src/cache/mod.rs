pub mod memory;

mod macros;

pub use memory::{Cache, CacheKey};
