//! Random item selection.
//!
//! Composes the key sampler, the catalog and the candidate filter into a
//! bounded search:
//! - Unreachable: the newest item could not be fetched
//! - Accepted: the first candidate passing the filter
//! - Exhausted: the attempt budget ran out

mod config;
mod runner;
mod sampler;
mod types;

pub use config::SelectorConfig;
pub use runner::RandomSelector;
pub use sampler::KeySampler;
pub use types::{SearchOutcome, SelectorError};
