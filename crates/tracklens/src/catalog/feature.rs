//! The closed set of columns Tracklens knows how to analyze.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TracklensError;

/// Semantic type of a catalog column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Discrete labels (genre, artist, track name).
    Categorical,
    /// Numeric measurements (audio features, popularity, duration).
    Continuous,
    /// True/false flags.
    Boolean,
    /// Dates that order tracks in time.
    OrdinalTime,
}

/// A known column of the music catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    TrackId,
    Artists,
    AlbumName,
    TrackName,
    Popularity,
    DurationMs,
    Explicit,
    Danceability,
    Energy,
    Key,
    Loudness,
    Mode,
    Speechiness,
    Acousticness,
    Instrumentalness,
    Liveness,
    Valence,
    Tempo,
    TimeSignature,
    Genre,
    ReleaseDate,
}

impl Feature {
    /// Every feature, in canonical column order.
    pub const ALL: [Feature; 21] = [
        Feature::TrackId,
        Feature::Artists,
        Feature::AlbumName,
        Feature::TrackName,
        Feature::Popularity,
        Feature::DurationMs,
        Feature::Explicit,
        Feature::Danceability,
        Feature::Energy,
        Feature::Key,
        Feature::Loudness,
        Feature::Mode,
        Feature::Speechiness,
        Feature::Acousticness,
        Feature::Instrumentalness,
        Feature::Liveness,
        Feature::Valence,
        Feature::Tempo,
        Feature::TimeSignature,
        Feature::Genre,
        Feature::ReleaseDate,
    ];

    /// Column name used when writing the dataset.
    pub fn column_name(self) -> &'static str {
        match self {
            Feature::TrackId => "track_id",
            Feature::Artists => "artists",
            Feature::AlbumName => "album_name",
            Feature::TrackName => "track_name",
            Feature::Popularity => "popularity",
            Feature::DurationMs => "duration_ms",
            Feature::Explicit => "explicit",
            Feature::Danceability => "danceability",
            Feature::Energy => "energy",
            Feature::Key => "key",
            Feature::Loudness => "loudness",
            Feature::Mode => "mode",
            Feature::Speechiness => "speechiness",
            Feature::Acousticness => "acousticness",
            Feature::Instrumentalness => "instrumentalness",
            Feature::Liveness => "liveness",
            Feature::Valence => "valence",
            Feature::Tempo => "tempo",
            Feature::TimeSignature => "time_signature",
            Feature::Genre => "track_genre",
            Feature::ReleaseDate => "release_date",
        }
    }

    /// Alternative header spellings accepted by the parser.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Feature::Genre => &["genre"],
            Feature::Artists => &["artist"],
            Feature::TrackName => &["name", "title"],
            Feature::AlbumName => &["album"],
            Feature::DurationMs => &["duration"],
            Feature::TimeSignature => &["time signature"],
            _ => &[],
        }
    }

    /// Resolve a header cell to a feature, case-insensitively.
    pub fn from_column_name(header: &str) -> Option<Feature> {
        let header = header.trim();
        Feature::ALL.into_iter().find(|f| {
            f.column_name().eq_ignore_ascii_case(header)
                || f.aliases().iter().any(|a| a.eq_ignore_ascii_case(header))
        })
    }

    pub fn kind(self) -> FeatureKind {
        match self {
            Feature::TrackId
            | Feature::Artists
            | Feature::AlbumName
            | Feature::TrackName
            | Feature::Genre => FeatureKind::Categorical,
            Feature::Explicit => FeatureKind::Boolean,
            Feature::ReleaseDate => FeatureKind::OrdinalTime,
            _ => FeatureKind::Continuous,
        }
    }

    pub fn is_numeric(self) -> bool {
        self.kind() == FeatureKind::Continuous
    }

    /// Whether the default dashboard needs this column.
    pub fn is_required(self) -> bool {
        matches!(
            self,
            Feature::Genre
                | Feature::Artists
                | Feature::TrackName
                | Feature::Popularity
                | Feature::DurationMs
                | Feature::Explicit
                | Feature::Danceability
                | Feature::Energy
                | Feature::Tempo
                | Feature::Loudness
                | Feature::Valence
                | Feature::Acousticness
        )
    }

    /// Human-readable label for titles and axes.
    pub fn label(self) -> &'static str {
        match self {
            Feature::TrackId => "Track ID",
            Feature::Artists => "Artists",
            Feature::AlbumName => "Album",
            Feature::TrackName => "Track name",
            Feature::Popularity => "Popularity",
            Feature::DurationMs => "Duration (ms)",
            Feature::Explicit => "Explicit",
            Feature::Danceability => "Danceability",
            Feature::Energy => "Energy",
            Feature::Key => "Key",
            Feature::Loudness => "Loudness",
            Feature::Mode => "Mode",
            Feature::Speechiness => "Speechiness",
            Feature::Acousticness => "Acousticness",
            Feature::Instrumentalness => "Instrumentalness",
            Feature::Liveness => "Liveness",
            Feature::Valence => "Valence",
            Feature::Tempo => "Tempo (BPM)",
            Feature::TimeSignature => "Time signature",
            Feature::Genre => "Genre",
            Feature::ReleaseDate => "Release date",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Feature {
    type Err = TracklensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::from_column_name(s)
            .ok_or_else(|| TracklensError::InvalidParameter(format!("unknown feature '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names_round_trip() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_column_name(feature.column_name()), Some(feature));
        }
    }

    #[test]
    fn test_aliases_and_case() {
        assert_eq!(Feature::from_column_name("Genre"), Some(Feature::Genre));
        assert_eq!(Feature::from_column_name(" TEMPO "), Some(Feature::Tempo));
        assert_eq!(Feature::from_column_name("Unnamed: 0"), None);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Feature::Genre.kind(), FeatureKind::Categorical);
        assert_eq!(Feature::Explicit.kind(), FeatureKind::Boolean);
        assert_eq!(Feature::ReleaseDate.kind(), FeatureKind::OrdinalTime);
        assert!(Feature::Loudness.is_numeric());
        assert!(!Feature::Artists.is_numeric());
    }

    #[test]
    fn test_parse_unknown_feature() {
        assert!("tempo".parse::<Feature>().is_ok());
        assert!("groove".parse::<Feature>().is_err());
    }
}
