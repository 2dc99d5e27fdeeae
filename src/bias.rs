//! Pattern-based gender-bias detection and phrasing mitigation.

mod detector;
mod policy;

pub use detector::{BiasDetector, BiasFinding, BiasReport};
pub use policy::{BIAS_PATTERNS, BiasPolicy, MITIGATIONS, POSITIVE_PATTERNS};
