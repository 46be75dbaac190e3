//! Random JSON document generation for randjson.
//!
//! The [`Generator`] builds a random document tree with an exact value count,
//! and the [`JsonWriter`] streams that tree to a sink while reporting one
//! progress event per value written.

pub mod engine;
pub mod errors;
pub mod generator;
pub mod model;
pub mod output;
pub mod progress;
pub mod writer;

pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use generator::{Generator, generate};
pub use model::{GenerateOptions, GenerationReport};
pub use progress::{CancelToken, NoProgress, ProgressEvent, ProgressObserver};
pub use writer::{JsonWriter, WriteSummary};
