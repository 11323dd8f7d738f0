//! Suggests which CSV column feeds which importer field.
//!
//! Each header is scored against every field definition on name equality,
//! partial name containment, a synonym dictionary and sampled cell data.
//! The best candidate per header becomes a [`MappingSuggestion`] when its
//! confidence clears the threshold.

mod engine;
pub mod shape;
pub mod synonyms;
mod utils;

pub use engine::{MAPPING_SAMPLE_ROWS, MappingEngine, suggest_mappings};
pub use importkit_model::MappingSuggestion;
pub use utils::normalize_text;
