//! Dashboard render performance benchmarks.
//!
//! Measures parsing, cold renders (every analysis computed) and warm renders
//! (every analysis served from the cache) over synthetic catalogs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tracklens::input::Parser;
use tracklens::{Analysis, Dashboard, Dataset, TracklensConfig};

/// Generate a synthetic catalog CSV with the full column set.
fn generate_catalog(rows: usize) -> String {
    let mut data = String::new();
    data.push_str(
        "track_id,artists,album_name,track_name,popularity,duration_ms,explicit,danceability,\
         energy,key,loudness,mode,speechiness,acousticness,instrumentalness,liveness,valence,\
         tempo,time_signature,track_genre,release_date\n",
    );

    let genres = ["pop", "rock", "jazz", "hip-hop", "classical", "edm", "folk", "metal"];

    for row in 0..rows {
        let unit = |salt: usize| ((row * 37 + salt * 11) % 1000) as f64 / 1000.0;
        data.push_str(&format!(
            "t{row},artist{artist},album{album},track{row},{pop},{dur},{explicit},{dance:.3},\
             {energy:.3},{key},{loud:.2},{mode},{speech:.3},{acoustic:.3},{instr:.3},{live:.3},\
             {valence:.3},{tempo:.1},4,{genre},{year}-{month:02}-01\n",
            artist = row % 400,
            album = row % 900,
            pop = (row * 7) % 101,
            dur = 120_000 + (row * 131) % 240_000,
            explicit = if row % 5 == 0 { "True" } else { "False" },
            dance = unit(1),
            energy = unit(2),
            key = row % 12,
            loud = -30.0 + unit(3) * 30.0,
            mode = row % 2,
            speech = unit(4),
            acoustic = unit(5),
            instr = unit(6),
            live = unit(7),
            valence = unit(8),
            tempo = 60.0 + unit(9) * 140.0,
            genre = genres[row % genres.len()],
            year = 1990 + row % 34,
            month = row % 12 + 1,
        ));
    }

    data
}

fn dataset(rows: usize) -> Dataset {
    Parser::new()
        .parse_bytes(generate_catalog(rows).as_bytes())
        .unwrap()
}

fn dashboard(dataset: Dataset) -> Dashboard {
    Dashboard::new(TracklensConfig::default())
        .unwrap()
        .with_dataset(dataset)
}

/// Benchmark CSV parsing into a dataset.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for rows in [1_000, 10_000].iter() {
        let data = generate_catalog(*rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| Parser::new().parse_bytes(black_box(data.as_bytes())).unwrap())
        });
    }

    group.finish();
}

/// Benchmark a render where every analysis misses the cache.
fn bench_cold_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("cold_render");
    group.sample_size(20);

    for rows in [1_000, 10_000].iter() {
        let data = dataset(*rows);
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter_with_setup(|| dashboard(data.clone()), |dashboard| black_box(dashboard.render()))
        });
    }

    group.finish();
}

/// Benchmark a render served entirely from the cache.
fn bench_warm_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("warm_render");

    let dashboard = dashboard(dataset(10_000));
    dashboard.render();
    group.bench_function("rows/10000", |b| b.iter(|| black_box(dashboard.render())));

    group.finish();
}

/// Benchmark individual analyses without the cache.
fn bench_single_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_analysis");
    let data = dataset(10_000);

    for analysis in [
        Analysis::GenrePopularity,
        Analysis::FeatureCorrelationHeatmap,
        Analysis::TempoByGenre,
        Analysis::TopArtists,
    ] {
        group.bench_with_input(BenchmarkId::new(analysis.name(), 10_000), &data, |b, data| {
            b.iter(|| black_box(analysis.run(data)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_cold_render,
    bench_warm_render,
    bench_single_analysis
);
criterion_main!(benches);
