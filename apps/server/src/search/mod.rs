//! Search layer - secondary document index and query translation
//!
//! The index is never the system of record: it answers search requests
//! only, and its contents may lag the resource store or miss recently
//! created resources entirely.

pub mod elastic;
pub mod memory;
pub mod query;
pub mod traits;

pub use elastic::ElasticsearchIndex;
pub use memory::{FailingSearchIndex, MemorySearchIndex};
pub use traits::{SearchHits, SearchIndex};
