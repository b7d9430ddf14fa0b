//! Validation of a loaded dataset against the feature catalog.

use serde::{Deserialize, Serialize};

use crate::input::Dataset;

use super::feature::Feature;

/// Which catalog features a dataset carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaReport {
    /// Features found in the dataset header, in header order.
    pub present: Vec<Feature>,
    /// Required features the dataset lacks.
    pub missing_required: Vec<Feature>,
    /// Optional features the dataset lacks.
    pub missing_optional: Vec<Feature>,
}

impl SchemaReport {
    /// Compare the dataset's columns with the catalog.
    pub fn validate(dataset: &Dataset) -> Self {
        let present: Vec<Feature> = dataset.features().collect();
        let (missing_required, missing_optional): (Vec<Feature>, Vec<Feature>) = Feature::ALL
            .into_iter()
            .filter(|f| !dataset.has(*f))
            .partition(|f| f.is_required());

        Self {
            present,
            missing_required,
            missing_optional,
        }
    }

    /// True when every required feature is present.
    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;

    #[test]
    fn test_report_lists_missing_columns() {
        let data = b"track_genre,popularity,release_date\npop,80,2020-01-01\n";
        let dataset = Parser::new().parse_bytes(data).unwrap();
        let report = SchemaReport::validate(&dataset);

        assert_eq!(
            report.present,
            vec![Feature::Genre, Feature::Popularity, Feature::ReleaseDate]
        );
        assert!(report.missing_required.contains(&Feature::Energy));
        assert!(report.missing_optional.contains(&Feature::Liveness));
        assert!(!report.missing_optional.contains(&Feature::ReleaseDate));
        assert!(!report.is_complete());
    }
}
