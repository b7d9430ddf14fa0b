//! Group-and-rank analyses: genre popularity, features by genre, top artists and tracks.

use crate::catalog::Feature;
use crate::chart::{Axis, ChartDescription, ChartKind, Series, Values};
use crate::error::{Result, TracklensError};
use crate::input::Dataset;
use crate::stats::mean;

use super::grouping::{group_values, rank_groups, sort_descending, unzip_ranked};
use super::AnalysisOutput;

pub const TOP_ARTISTS: usize = 20;
pub const TOP_TRACKS: usize = 10;

pub(crate) fn genre_popularity(dataset: &Dataset) -> Result<AnalysisOutput> {
    dataset.require(&[Feature::Genre, Feature::Popularity])?;

    let groups = group_values(dataset, Feature::Genre, Feature::Popularity);
    let (genres, means) = unzip_ranked(rank_groups(&groups, mean));

    let chart = ChartDescription::new(ChartKind::Bar, "Average popularity by genre", 300)
        .with_series(Series::new(Values::Labels(genres), Values::Numbers(means)))
        .with_x_axis(Axis::untitled())
        .with_y_axis(Axis::titled("Average popularity"));

    Ok(AnalysisOutput::new(
        chart,
        "This chart shows the average popularity score of each genre. Assuming popularity \
         tracks sales, it points to the genres that may be the most profitable to focus on.",
    ))
}

pub(crate) fn feature_by_genre(dataset: &Dataset, feature: Feature) -> Result<AnalysisOutput> {
    if !feature.is_numeric() {
        return Err(TracklensError::InvalidParameter(format!(
            "'{}' is not a numeric feature",
            feature
        )));
    }
    dataset.require(&[Feature::Genre, feature])?;

    let groups = group_values(dataset, Feature::Genre, feature);
    let (genres, means) = unzip_ranked(rank_groups(&groups, mean));

    let title = format!("Average {} by genre", feature.label());
    let chart = ChartDescription::new(ChartKind::Bar, title, 300)
        .with_series(Series::new(Values::Labels(genres.clone()), Values::Numbers(means)))
        .with_category_order(genres)
        .with_x_axis(Axis::untitled())
        .with_y_axis(Axis::titled(format!("Average {}", feature.label())))
        .with_legend(false);

    Ok(AnalysisOutput::new(
        chart,
        format!(
            "This chart compares the average {} across music genres. It shows how this \
             characteristic varies by genre and which genres sit at the high or low end, \
             which can help tailor production to specific audiences.",
            feature
        ),
    ))
}

pub(crate) fn top_artists(dataset: &Dataset) -> Result<AnalysisOutput> {
    dataset.require(&[Feature::Artists, Feature::Popularity])?;

    let groups = group_values(dataset, Feature::Artists, Feature::Popularity);
    let mut ranked = rank_groups(&groups, mean);
    ranked.truncate(TOP_ARTISTS);
    let (artists, means) = unzip_ranked(ranked);

    let chart = ChartDescription::new(
        ChartKind::Bar,
        format!("Top {} artists by average popularity", TOP_ARTISTS),
        400,
    )
    .with_series(Series::new(Values::Numbers(means), Values::Labels(artists)).horizontal())
    .with_x_axis(Axis::titled("Average popularity"))
    .with_y_axis(Axis::titled("Artists"));

    Ok(AnalysisOutput::new(
        chart,
        format!(
            "This horizontal bar chart shows the {} artists with the highest average track \
             popularity. It helps identify the most influential or best-liked artists.",
            TOP_ARTISTS
        ),
    ))
}

pub(crate) fn top_popular_tracks(dataset: &Dataset) -> Result<AnalysisOutput> {
    dataset.require(&[Feature::TrackName, Feature::Popularity])?;

    let mut rows: Vec<(usize, f64)> = dataset
        .tracks()
        .iter()
        .enumerate()
        .filter_map(|(i, t)| t.popularity.map(|p| (i, p)))
        .collect();
    sort_descending(&mut rows);
    rows.truncate(TOP_TRACKS);

    let tracks = dataset.tracks();
    let names: Vec<String> = rows
        .iter()
        .map(|(i, _)| tracks[*i].track_name.clone().unwrap_or_default())
        .collect();
    let popularity: Vec<f64> = rows.iter().map(|(_, p)| *p).collect();

    let chart = ChartDescription::new(
        ChartKind::Bar,
        format!("Top {} most popular tracks", TOP_TRACKS),
        400,
    )
    .with_series(Series::new(Values::Labels(names), Values::Numbers(popularity)))
    .with_x_axis(Axis::untitled())
    .with_y_axis(Axis::titled("Popularity"))
    .with_legend(false);

    Ok(AnalysisOutput::new(
        chart,
        format!(
            "This chart shows the {} most popular tracks in the dataset. It highlights the \
             tracks that resonate most with listeners.",
            TOP_TRACKS
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;

    fn labels(values: &Values) -> Vec<String> {
        match values {
            Values::Labels(v) => v.clone(),
            other => panic!("expected labels, got {:?}", other),
        }
    }

    fn numbers(values: &Values) -> Vec<f64> {
        match values {
            Values::Numbers(v) => v.clone(),
            other => panic!("expected numbers, got {:?}", other),
        }
    }

    #[test]
    fn test_genre_popularity_ranks_means() {
        let data = b"track_genre,popularity\npop,80\npop,60\nrock,50\n";
        let dataset = Parser::new().parse_bytes(data).unwrap();
        let output = genre_popularity(&dataset).unwrap();

        let series = &output.chart.series[0];
        assert_eq!(labels(&series.x), vec!["pop", "rock"]);
        assert_eq!(numbers(&series.y), vec![70.0, 50.0]);
        assert_eq!(output.chart.layout.height, 300);
    }

    #[test]
    fn test_feature_by_genre_uses_feature() {
        let data = b"track_genre,tempo,energy\na,100,0.9\nb,140,0.1\n";
        let dataset = Parser::new().parse_bytes(data).unwrap();

        let tempo = feature_by_genre(&dataset, Feature::Tempo).unwrap();
        let energy = feature_by_genre(&dataset, Feature::Energy).unwrap();

        assert_eq!(labels(&tempo.chart.series[0].x), vec!["b", "a"]);
        assert_eq!(labels(&energy.chart.series[0].x), vec!["a", "b"]);
        assert!(tempo.interpretation.contains("tempo"));
        assert!(energy.interpretation.contains("energy"));
        assert!(!tempo.chart.layout.show_legend);
    }

    #[test]
    fn test_feature_by_genre_rejects_categorical() {
        let data = b"track_genre,artists\na,x\n";
        let dataset = Parser::new().parse_bytes(data).unwrap();
        assert!(matches!(
            feature_by_genre(&dataset, Feature::Artists),
            Err(TracklensError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_top_tracks_by_raw_value() {
        let mut data = String::from("track_name,popularity\n");
        for i in 0..15 {
            data.push_str(&format!("t{},{}\n", i, i % 5));
        }
        let dataset = Parser::new().parse_bytes(data.as_bytes()).unwrap();
        let output = top_popular_tracks(&dataset).unwrap();

        let series = &output.chart.series[0];
        let names = labels(&series.x);
        assert_eq!(names.len(), TOP_TRACKS);
        // Popularity 4 appears at rows 4, 9, 14; ties keep row order.
        assert_eq!(&names[..3], &["t4", "t9", "t14"]);
        assert_eq!(numbers(&series.y)[9], 1.0);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let data = b"track_genre\npop\n";
        let dataset = Parser::new().parse_bytes(data).unwrap();
        assert!(matches!(
            genre_popularity(&dataset),
            Err(TracklensError::MissingColumn { .. })
        ));
    }
}
