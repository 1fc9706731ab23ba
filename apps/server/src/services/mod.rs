//! Service layer - use case orchestration

pub mod indexing;
pub mod resource;

pub use indexing::IndexingPipeline;
pub use resource::ResourceService;
