/// Interval summaries of univariate distributions.
mod interval;

pub use interval::*;

/// Search for the narrowest interval holding a given probability mass.
mod hdi;

pub use hdi::*;
