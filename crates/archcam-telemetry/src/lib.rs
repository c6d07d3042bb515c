pub mod capture_metrics;

pub use capture_metrics::*;
