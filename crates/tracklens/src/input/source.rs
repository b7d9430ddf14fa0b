//! In-memory dataset representation and metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::catalog::{Feature, FeatureKind};
use crate::error::{Result, TracklensError};

/// Metadata about where a dataset came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path (empty for in-memory datasets).
    pub file: String,
    /// Full path to the file, if the dataset was read from or written to disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Where the rows were obtained ("local", "memory", or a remote source name).
    pub origin: String,
    /// SHA-256 fingerprint of the parsed bytes.
    pub hash: String,
    /// Size of the parsed bytes.
    pub size_bytes: u64,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of recognized catalog columns.
    pub column_count: usize,
    /// When the dataset was materialized.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    pub fn new(
        path: Option<PathBuf>,
        origin: impl Into<String>,
        hash: String,
        size_bytes: u64,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            origin: origin.into(),
            hash,
            size_bytes,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// One row of the catalog.
///
/// Every field is optional: a missing cell, or a column the dataset does not
/// carry, is `None` and is skipped by aggregations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub track_id: Option<String>,
    pub artists: Option<String>,
    pub album_name: Option<String>,
    pub track_name: Option<String>,
    pub genre: Option<String>,
    pub popularity: Option<f64>,
    pub duration_ms: Option<f64>,
    pub explicit: Option<bool>,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub key: Option<f64>,
    pub loudness: Option<f64>,
    pub mode: Option<f64>,
    pub speechiness: Option<f64>,
    pub acousticness: Option<f64>,
    pub instrumentalness: Option<f64>,
    pub liveness: Option<f64>,
    pub valence: Option<f64>,
    pub tempo: Option<f64>,
    pub time_signature: Option<f64>,
    pub release_date: Option<String>,
}

impl Track {
    /// Value of a continuous feature. `None` for missing cells and non-numeric features.
    pub fn numeric(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Popularity => self.popularity,
            Feature::DurationMs => self.duration_ms,
            Feature::Danceability => self.danceability,
            Feature::Energy => self.energy,
            Feature::Key => self.key,
            Feature::Loudness => self.loudness,
            Feature::Mode => self.mode,
            Feature::Speechiness => self.speechiness,
            Feature::Acousticness => self.acousticness,
            Feature::Instrumentalness => self.instrumentalness,
            Feature::Liveness => self.liveness,
            Feature::Valence => self.valence,
            Feature::Tempo => self.tempo,
            Feature::TimeSignature => self.time_signature,
            _ => None,
        }
    }

    /// Value of a categorical or date feature.
    pub fn text(&self, feature: Feature) -> Option<&str> {
        let value = match feature {
            Feature::TrackId => &self.track_id,
            Feature::Artists => &self.artists,
            Feature::AlbumName => &self.album_name,
            Feature::TrackName => &self.track_name,
            Feature::Genre => &self.genre,
            Feature::ReleaseDate => &self.release_date,
            _ => return None,
        };
        value.as_deref()
    }

    /// Store a raw cell, treating null markers as missing.
    pub(crate) fn set_raw(&mut self, feature: Feature, raw: &str) {
        let missing = match feature.kind() {
            FeatureKind::Continuous | FeatureKind::Boolean => is_missing_number(raw),
            FeatureKind::Categorical | FeatureKind::OrdinalTime => is_null_value(raw),
        };
        if missing {
            return;
        }
        let raw = raw.trim();
        match feature.kind() {
            FeatureKind::Continuous => {
                let value = raw.parse::<f64>().ok().filter(|v| v.is_finite());
                match feature {
                    Feature::Popularity => self.popularity = value,
                    Feature::DurationMs => self.duration_ms = value,
                    Feature::Danceability => self.danceability = value,
                    Feature::Energy => self.energy = value,
                    Feature::Key => self.key = value,
                    Feature::Loudness => self.loudness = value,
                    Feature::Mode => self.mode = value,
                    Feature::Speechiness => self.speechiness = value,
                    Feature::Acousticness => self.acousticness = value,
                    Feature::Instrumentalness => self.instrumentalness = value,
                    Feature::Liveness => self.liveness = value,
                    Feature::Valence => self.valence = value,
                    Feature::Tempo => self.tempo = value,
                    Feature::TimeSignature => self.time_signature = value,
                    _ => {}
                }
            }
            FeatureKind::Boolean => self.explicit = parse_bool(raw),
            FeatureKind::Categorical | FeatureKind::OrdinalTime => {
                let value = Some(raw.to_string());
                match feature {
                    Feature::TrackId => self.track_id = value,
                    Feature::Artists => self.artists = value,
                    Feature::AlbumName => self.album_name = value,
                    Feature::TrackName => self.track_name = value,
                    Feature::Genre => self.genre = value,
                    Feature::ReleaseDate => self.release_date = value,
                    _ => {}
                }
            }
        }
    }

    /// Render a cell for CSV output; missing values become empty cells.
    fn cell(&self, feature: Feature) -> String {
        match feature.kind() {
            FeatureKind::Continuous => self.numeric(feature).map(|v| v.to_string()),
            FeatureKind::Boolean => self.explicit.map(|b| if b { "True" } else { "False" }.to_string()),
            FeatureKind::Categorical | FeatureKind::OrdinalTime => {
                self.text(feature).map(str::to_string)
            }
        }
        .unwrap_or_default()
    }
}

/// Check if a value represents a missing/null value in any column.
pub fn is_null_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
}

/// Null check for numeric and boolean cells, which also accept placeholder
/// markers that are legitimate text in name columns.
fn is_missing_number(value: &str) -> bool {
    let trimmed = value.trim();
    is_null_value(trimmed)
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed == "."
        || trimmed == "-"
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// An immutable, fingerprinted collection of tracks.
///
/// A dataset is never modified after construction; analyses borrow it and
/// derive whatever they need into local values.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Feature>,
    tracks: Vec<Track>,
    fingerprint: String,
    source: SourceMetadata,
}

impl Dataset {
    /// Build an in-memory dataset. The fingerprint is taken over the canonical CSV encoding.
    pub fn new(columns: Vec<Feature>, tracks: Vec<Track>) -> Self {
        let mut dataset = Self {
            source: SourceMetadata::new(None, "memory", String::new(), 0, tracks.len(), columns.len()),
            columns,
            tracks,
            fingerprint: String::new(),
        };
        let bytes = dataset.to_csv_bytes().unwrap_or_default();
        dataset.fingerprint = fingerprint(&bytes);
        dataset.source.hash = dataset.fingerprint.clone();
        dataset.source.size_bytes = bytes.len() as u64;
        dataset
    }

    pub(crate) fn from_parts(
        columns: Vec<Feature>,
        tracks: Vec<Track>,
        fingerprint: String,
        source: SourceMetadata,
    ) -> Self {
        Self {
            columns,
            tracks,
            fingerprint,
            source,
        }
    }

    pub(crate) fn with_source(mut self, source: SourceMetadata) -> Self {
        self.source = source;
        self
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Whether the dataset's header carried this feature.
    pub fn has(&self, feature: Feature) -> bool {
        self.columns.contains(&feature)
    }

    /// Features present in the dataset, in header order.
    pub fn features(&self) -> impl Iterator<Item = Feature> + '_ {
        self.columns.iter().copied()
    }

    /// Fail with `MissingColumn` for the first absent feature.
    pub fn require(&self, features: &[Feature]) -> Result<()> {
        match features.iter().find(|f| !self.has(**f)) {
            Some(missing) => Err(TracklensError::MissingColumn {
                column: missing.column_name().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// SHA-256 fingerprint identifying this dataset's content.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn source(&self) -> &SourceMetadata {
        &self.source
    }

    /// Encode the dataset as UTF-8 CSV with a header row.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.columns.iter().map(|f| f.column_name()))?;
        for track in &self.tracks {
            writer.write_record(self.columns.iter().map(|f| track.cell(*f)))?;
        }
        writer
            .into_inner()
            .map_err(|e| TracklensError::Persistence(format!("Failed to flush CSV buffer: {}", e)))
    }
}

/// Hex SHA-256 of raw bytes, prefixed like `sha256:…`.
pub(crate) fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{:x}", hasher.finalize())
}
