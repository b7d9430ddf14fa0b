//! Numeric reductions shared by the analyses.

mod correlation;
mod descriptive;
mod histogram;

pub use correlation::{pearson, CorrelationMatrix};
pub use descriptive::{mean, median, quantile_sorted, BoxSummary};
pub use histogram::{histogram, HistogramBin};
