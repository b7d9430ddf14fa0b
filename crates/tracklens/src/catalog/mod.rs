//! Feature catalog: the known analyzable columns and their semantic types.

mod feature;
mod report;

pub use feature::{Feature, FeatureKind};
pub use report::SchemaReport;
