//! Tests for the memoization cache: hits, expiry, key discrimination and single-flight.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration as StdDuration;

use chrono::Duration;

use tracklens::cache::{CacheKey, LruBackend, ManualClock, MemoizationCache};
use tracklens::input::Parser;
use tracklens::{Analysis, Dashboard, Feature, TracklensConfig};

fn key(name: &str) -> CacheKey {
    CacheKey::new(name, &[], "sha256:test")
}

#[test]
fn test_hit_does_not_rerun_producer() {
    let cache: MemoizationCache<String> = MemoizationCache::new(Duration::hours(1));
    let calls = AtomicUsize::new(0);
    let produce = || {
        calls.fetch_add(1, Ordering::SeqCst);
        "chart".to_string()
    };

    let first = cache.get_or_compute(&key("genre_popularity"), produce);
    let second = cache.get_or_compute(&key("genre_popularity"), produce);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_expiry_reruns_producer() {
    let clock = Arc::new(ManualClock::default());
    let cache: MemoizationCache<u32> =
        MemoizationCache::new(Duration::seconds(3600)).with_clock(clock.clone());
    let calls = AtomicUsize::new(0);
    let produce = || calls.fetch_add(1, Ordering::SeqCst) as u32;

    assert_eq!(*cache.get_or_compute(&key("tempo_by_genre"), produce), 0);

    clock.advance(Duration::seconds(3599));
    assert_eq!(*cache.get_or_compute(&key("tempo_by_genre"), produce), 0);

    clock.advance(Duration::seconds(1));
    assert_eq!(*cache.get_or_compute(&key("tempo_by_genre"), produce), 1);

    let stats = cache.stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.expired, 1);
}

#[test]
fn test_distinct_params_distinct_entries() {
    let cache: MemoizationCache<String> = MemoizationCache::new(Duration::hours(1));
    let tempo = CacheKey::new("genre_features", &[("feature", "tempo".to_string())], "fp");
    let energy = CacheKey::new("genre_features", &[("feature", "energy".to_string())], "fp");

    cache.get_or_compute(&tempo, || "tempo".to_string());
    let value = cache.get_or_compute(&energy, || "energy".to_string());

    assert_eq!(value.as_str(), "energy");
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_new_dataset_misses_old_entries() {
    let cache: MemoizationCache<u32> = MemoizationCache::new(Duration::hours(1));
    let old = CacheKey::new("top_artists", &[], "sha256:old");
    let new = CacheKey::new("top_artists", &[], "sha256:new");

    cache.get_or_compute(&old, || 1);
    assert_eq!(*cache.get_or_compute(&new, || 2), 2);
}

#[test]
fn test_same_key_computes_once_under_contention() {
    let cache: Arc<MemoizationCache<u32>> = Arc::new(MemoizationCache::new(Duration::hours(1)));
    let calls = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                *cache.get_or_compute(&key("heatmap"), || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    thread::sleep(StdDuration::from_millis(50));
                    42
                })
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 42);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_distinct_keys_compute_concurrently() {
    let cache: Arc<MemoizationCache<usize>> = Arc::new(MemoizationCache::new(Duration::hours(1)));
    let barrier = Arc::new(Barrier::new(2));

    // Each producer waits for the other; this only finishes if they run at the same time.
    let handles: Vec<_> = ["a", "b"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                *cache.get_or_compute(&key(name), || {
                    barrier.wait();
                    i
                })
            })
        })
        .collect();

    let results: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![0, 1]);
}

#[test]
fn test_lru_backend_bounds_entries() {
    let cache: MemoizationCache<u32> =
        MemoizationCache::with_backend(Box::new(LruBackend::new(3)), Duration::hours(1));
    for (i, name) in ["a", "b", "c", "d", "e"].into_iter().enumerate() {
        cache.get_or_compute(&key(name), || i as u32);
    }

    assert_eq!(cache.len(), 3);
    assert_eq!(cache.stats().evicted, 2);
    assert!(cache.get(&key("a")).is_none());
    assert_eq!(cache.get(&key("e")).as_deref(), Some(&4));
}

#[test]
fn test_dashboard_expiry_recomputes_equal_output() {
    let dataset = Parser::new()
        .parse_bytes(b"track_genre,tempo\npop,120\nrock,140\n")
        .unwrap();
    let clock = Arc::new(ManualClock::default());
    let dashboard = Dashboard::new(TracklensConfig::default())
        .unwrap()
        .with_dataset(dataset)
        .with_clock(clock.clone());
    let analysis = Analysis::FeatureByGenre {
        feature: Feature::Tempo,
    };

    let first = dashboard.run(&analysis).unwrap();
    clock.advance(Duration::hours(2));
    let second = dashboard.run(&analysis).unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
    assert_eq!(dashboard.cache_stats().misses, 2);
}
