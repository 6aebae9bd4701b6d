//! Text normalization, matching and entity extraction (§4.1–§4.3).

pub mod entities;
pub mod matcher;
pub mod normalize;

pub use entities::extract_entities;
pub use matcher::mentioned;
pub use normalize::{domain, normalize};
