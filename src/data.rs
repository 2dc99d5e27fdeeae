//! Read-only job, event and mentorship listings plus the lookups over them.

mod dataset;
mod integrator;

pub use dataset::{DataStore, Dataset, Record};
pub use integrator::DataIntegrator;
