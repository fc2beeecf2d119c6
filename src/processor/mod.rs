pub mod base;
pub mod csv_processor;
pub mod pipeline;

pub use base::*;
pub use csv_processor::*;
pub use pipeline::{store_and_join, LoaderPipeline, PipelineOutcome};
