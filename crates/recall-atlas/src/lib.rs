//! Recall campaign core: which office holders are recallable at a point in the
//! municipality → district → ward hierarchy, where each recall effort sits in its
//! lifecycle, and whether citizen-submitted petition data is well formed.

pub mod config;
pub mod error;
pub mod recall;
pub mod telemetry;
