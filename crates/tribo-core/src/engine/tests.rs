//! Engine tests

use super::*;
use crate::sequence::nth;
use std::time::{Duration, Instant};

/// Wait for the detached merge to land; it is never awaited by `get`.
async fn wait_for_len(tribo: &Tribo, expected: usize) -> usize {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let len = tribo.cache_len();
        if len == expected || Instant::now() >= deadline {
            return len;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

fn wait_for_len_blocking(tribo: &Tribo, expected: usize) -> usize {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let len = tribo.cache_len();
        if len == expected || Instant::now() >= deadline {
            return len;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_new() {
    let tribo = Tribo::new(10);
    assert_eq!(tribo.cache_size_limit(), 10);
    assert_eq!(tribo.cache_len(), 3);
    assert_eq!(tribo.statistics(), EngineStatistics::default());
}

#[tokio::test]
async fn test_get_table() {
    let tribo = Tribo::new(20);
    let ctx = RequestContext::background();
    let cases: &[(i64, &str)] = &[
        (1, "0"),
        (2, "0"),
        (3, "1"),
        (14, "504"),
        (15, "927"),
        (16, "1705"),
        (4, "1"),
        (5, "2"),
        (6, "4"),
        (7, "7"),
        (8, "13"),
        (23, "121415"),
        (24, "223317"),
        (25, "410744"),
        (26, "755476"),
        (27, "1389537"),
        (28, "2555757"),
        (29, "4700770"),
        (30, "8646064"),
        (9, "24"),
        (10, "44"),
        (11, "81"),
        (12, "149"),
        (13, "274"),
        (17, "3136"),
        (18, "5768"),
        (19, "10609"),
        (20, "19513"),
        (21, "35890"),
        (22, "66012"),
    ];

    for &(n, want) in cases {
        let got = tribo.get(&ctx, n).await.unwrap();
        assert_eq!(got.value(), want, "T({})", n);
    }
}

#[tokio::test]
async fn test_invalid_index() {
    let tribo = Tribo::new(20);
    let ctx = RequestContext::background();

    for n in [0, -5, i64::MIN] {
        let err = tribo.get(&ctx, n).await.unwrap_err();
        assert!(matches!(err, TriboError::InvalidArgument(_)), "{}", n);
    }
    assert_eq!(tribo.cache_len(), 3);
    assert_eq!(tribo.statistics(), EngineStatistics::default());
}

#[test]
fn test_invalid_index_rejected_before_context() {
    let tribo = Tribo::new(20);
    let ctx = RequestContext::background();
    ctx.cancel();
    let err = tribo.get_blocking(&ctx, 0).unwrap_err();
    assert!(matches!(err, TriboError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_cache_fills_up_to_request() {
    let tribo = Tribo::new(100);
    let ctx = RequestContext::background();

    tribo.get(&ctx, 50).await.unwrap();
    assert_eq!(wait_for_len(&tribo, 50).await, 50);

    let stats = tribo.statistics();
    assert_eq!(stats.computations, 1);
    assert_eq!(stats.merges_submitted, 1);

    // Second lookup is a fast-path hit and does not grow the cache.
    let value = tribo.get(&ctx, 50).await.unwrap();
    assert_eq!(value.value(), nth(50).unwrap().to_string());
    assert_eq!(tribo.statistics().computations, 1);
    assert_eq!(tribo.statistics().fast_hits, 1);
    assert_eq!(tribo.cache_len(), 50);
}

#[tokio::test]
async fn test_cache_limited() {
    let tribo = Tribo::new(100);
    let ctx = RequestContext::background();

    let value = tribo.get(&ctx, 1000).await.unwrap();
    assert_eq!(value.value(), nth(1000).unwrap().to_string());
    assert_eq!(wait_for_len(&tribo, 100).await, 100);

    tribo.get(&ctx, 2000).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(tribo.cache_len() <= 100);
}

#[tokio::test]
async fn test_beyond_limit_recomputes_from_cached_tail() {
    let tribo = Tribo::new(10);
    let ctx = RequestContext::background();

    tribo.get(&ctx, 10).await.unwrap();
    wait_for_len(&tribo, 10).await;

    let value = tribo.get(&ctx, 30).await.unwrap();
    assert_eq!(value.value(), "8646064");
    assert_eq!(tribo.cache_len(), 10);
}

#[test]
fn test_zero_limit_still_answers() {
    let tribo = Tribo::new(0);
    let ctx = RequestContext::background();
    assert_eq!(tribo.get_blocking(&ctx, 10).unwrap().value(), "44");
    assert_eq!(tribo.get_blocking(&ctx, 10).unwrap().value(), "44");
    assert_eq!(tribo.cache_len(), 3);
    assert_eq!(tribo.statistics().merges_submitted, 0);
}

#[tokio::test]
async fn test_expired_context_leaves_cache_untouched() {
    let tribo = Tribo::new(100);
    let ctx = RequestContext::with_timeout(Duration::ZERO);

    let err = tribo.get(&ctx, 1_000_000).await.unwrap_err();
    assert!(matches!(err, TriboError::DeadlineExceeded { .. }));
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(tribo.cache_len(), 3);
    assert_eq!(tribo.statistics().cancellations, 1);
    assert_eq!(tribo.statistics().merges_submitted, 0);
}

#[tokio::test]
async fn test_expired_context_still_serves_cache() {
    let tribo = Tribo::new(100);
    let ctx = RequestContext::with_timeout(Duration::ZERO);
    assert_eq!(tribo.get(&ctx, 3).await.unwrap().value(), "1");
}

#[tokio::test]
async fn test_timeout_during_long_extension() {
    let tribo = Tribo::new(100_000);
    let ctx = RequestContext::with_timeout(Duration::from_millis(50));

    let started = Instant::now();
    let err = tribo.get(&ctx, 10_000_000).await.unwrap_err();
    assert!(matches!(err, TriboError::DeadlineExceeded { millis: 50 }));
    assert!(started.elapsed() < Duration::from_secs(5));

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(tribo.cache_len(), 3);
}

#[tokio::test]
async fn test_cancel_during_long_extension() {
    let tribo = Tribo::new(100_000);
    let ctx = RequestContext::background();

    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        canceller.cancel();
    });

    let err = tribo.get(&ctx, 10_000_000).await.unwrap_err();
    assert_eq!(err, TriboError::Cancelled);
    assert_eq!(tribo.cache_len(), 3);
}

#[tokio::test]
async fn test_dropped_future_stops_computation() {
    let tribo = Tribo::new(100_000);
    let ctx = RequestContext::background();

    let result = tokio::time::timeout(
        Duration::from_millis(30),
        tribo.get(&ctx, 10_000_000),
    )
    .await;
    assert!(result.is_err());

    // The blocking task observes the drop guard and records the cancellation.
    let deadline = Instant::now() + Duration::from_secs(5);
    while tribo.statistics().cancellations == 0 && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(tribo.statistics().cancellations, 1);
    assert!(!ctx.is_done());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_same_index() {
    let tribo = Tribo::new(5000);
    let ctx = RequestContext::background();
    let want = nth(3000).unwrap().to_string();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let tribo = tribo.clone();
            let ctx = ctx.clone();
            tokio::spawn(async move {
                let value = tribo.get(&ctx, 3000).await.unwrap();
                (value, tribo.cache_len())
            })
        })
        .collect();

    let mut observed = Vec::new();
    for handle in handles {
        let (value, len) = handle.await.unwrap();
        assert_eq!(value.value(), want);
        observed.push(len);
    }

    let final_len = wait_for_len(&tribo, 3000).await;
    assert_eq!(final_len, 3000);
    assert!(observed.iter().all(|&len| len <= final_len));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_interleaved_requests_agree() {
    let tribo = Tribo::new(400);
    let ctx = RequestContext::background();

    let handles: Vec<_> = (1..=40)
        .map(|i| {
            let tribo = tribo.clone();
            let ctx = ctx.clone();
            let n = (i * 37 % 500 + 1) as i64;
            tokio::spawn(async move { (n, tribo.get(&ctx, n).await.unwrap()) })
        })
        .collect();

    for handle in handles {
        let (n, value) = handle.await.unwrap();
        assert_eq!(value.value(), nth(n as usize).unwrap().to_string());
    }
    assert!(tribo.cache_len() <= 400);
}

#[test]
fn test_blocking_merge_without_runtime() {
    let tribo = Tribo::new(64);
    let ctx = RequestContext::background();

    assert_eq!(tribo.get_blocking(&ctx, 30).unwrap().value(), "8646064");
    assert_eq!(wait_for_len_blocking(&tribo, 30), 30);
    assert_eq!(tribo.get_blocking(&ctx, 30).unwrap().value(), "8646064");
    assert_eq!(tribo.statistics().fast_hits, 1);
}

#[test]
fn test_clones_share_cache() {
    let tribo = Tribo::new(64);
    let other = tribo.clone();
    let ctx = RequestContext::background();

    tribo.get_blocking(&ctx, 20).unwrap();
    assert_eq!(wait_for_len_blocking(&other, 20), 20);
}
