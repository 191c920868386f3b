//! Mirror validation: probe a list of mirrors concurrently and classify each
//! one as valid, stale, unreachable or unsupported, optionally against the
//! metadata of a canonical source.

pub mod baseline;
pub mod cancel;
pub mod candidate;
pub mod config;
pub mod engine;
pub mod logging;
pub mod mirrors;
pub mod probe;
pub mod report;
pub mod retry;
pub mod scheduler;
pub mod verdict;
