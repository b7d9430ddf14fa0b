//! CSV parser that maps catalog headers onto [`Track`] fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Feature;
use crate::error::{Result, TracklensError};
use super::source::{fingerprint, Dataset, SourceMetadata, Track};

/// Parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Field delimiter.
    pub delimiter: char,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: char,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            max_rows: None,
            quote: '"',
        }
    }
}

/// Parses catalog files into datasets.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file on disk.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| TracklensError::io(path, e))?;

        let dataset = self.parse_bytes(&contents)?;
        let source = SourceMetadata::new(
            Some(path.to_path_buf()),
            "local",
            dataset.fingerprint().to_string(),
            contents.len() as u64,
            dataset.len(),
            dataset.features().count(),
        );
        Ok(dataset.with_source(source))
    }

    /// Parse CSV bytes. Columns outside the catalog are ignored.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Dataset> {
        let delimiter = ascii_byte(self.config.delimiter, "delimiter")?;
        let quote = ascii_byte(self.config.quote, "quote")?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .quote(quote)
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(TracklensError::EmptyData("No columns found".to_string()));
        }

        // Position in the record for each recognized feature; first occurrence wins.
        let mut columns: Vec<Feature> = Vec::new();
        let mut positions: Vec<(usize, Feature)> = Vec::new();
        for (index, header) in headers.iter().enumerate() {
            match Feature::from_column_name(header) {
                Some(feature) if !columns.contains(&feature) => {
                    columns.push(feature);
                    positions.push((index, feature));
                }
                Some(_) => tracing::debug!("Ignoring duplicate column '{}'", header),
                None => tracing::debug!("Ignoring column '{}' outside the feature catalog", header),
            }
        }

        if columns.is_empty() {
            return Err(TracklensError::EmptyData(
                "No recognized catalog columns in header".to_string(),
            ));
        }

        let mut tracks = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            let mut track = Track::default();
            for &(index, feature) in &positions {
                if let Some(raw) = record.get(index) {
                    track.set_raw(feature, raw);
                }
            }
            tracks.push(track);
        }

        if tracks.is_empty() {
            return Err(TracklensError::EmptyData("No data rows found".to_string()));
        }

        let hash = fingerprint(bytes);
        let source = SourceMetadata::new(
            None,
            "memory",
            hash.clone(),
            bytes.len() as u64,
            tracks.len(),
            columns.len(),
        );
        Ok(Dataset::from_parts(columns, tracks, hash, source))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn ascii_byte(c: char, what: &str) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(TracklensError::Config(format!("{} must be an ASCII character, got '{}'", what, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_csv() {
        let data = b"Unnamed: 0,track_id,artists,track_name,popularity,explicit,track_genre\n\
                     0,abc,Artist A,Song,73,False,acoustic\n\
                     1,def,Artist B,Other,55,True,acoustic\n";
        let dataset = Parser::new().parse_bytes(data).unwrap();

        assert_eq!(dataset.len(), 2);
        assert!(dataset.has(Feature::Genre));
        assert!(!dataset.has(Feature::ReleaseDate));
        assert_eq!(dataset.features().count(), 6);

        let first = &dataset.tracks()[0];
        assert_eq!(first.popularity, Some(73.0));
        assert_eq!(first.explicit, Some(false));
        assert_eq!(first.artists.as_deref(), Some("Artist A"));
    }

    #[test]
    fn test_short_rows_leave_missing_values() {
        let data = b"track_genre,popularity,energy\npop,80\nrock,50,0.9\n";
        let dataset = Parser::new().parse_bytes(data).unwrap();

        assert_eq!(dataset.tracks()[0].energy, None);
        assert_eq!(dataset.tracks()[1].energy, Some(0.9));
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(1),
            ..ParserConfig::default()
        });
        let dataset = parser.parse_bytes(b"popularity\n1\n2\n3\n").unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_tab_delimiter() {
        let parser = Parser::with_config(ParserConfig {
            delimiter: '\t',
            ..ParserConfig::default()
        });
        let dataset = parser.parse_bytes(b"genre\tpopularity\npop\t10\n").unwrap();
        assert_eq!(dataset.tracks()[0].genre.as_deref(), Some("pop"));
    }

    #[test]
    fn test_rejects_unrecognized_header() {
        let err = Parser::new().parse_bytes(b"foo,bar\n1,2\n").unwrap_err();
        assert!(matches!(err, TracklensError::EmptyData(_)));
    }

    #[test]
    fn test_rejects_header_only() {
        let err = Parser::new().parse_bytes(b"popularity\n").unwrap_err();
        assert!(matches!(err, TracklensError::EmptyData(_)));
    }
}
