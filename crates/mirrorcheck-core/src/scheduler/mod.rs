//! Probe scheduling.
//!
//! A single bounded-parallelism primitive ([`BoundedPool`]) bounds in-flight
//! probes; [`run_all`] fans candidates out through it and joins the results.

mod parallel;
mod pool;

pub use parallel::{run_all, Dispatched};
pub use pool::{default_limit, BoundedPool, Completion};
