//! Integration tests for the engine's public API

use std::time::{Duration, Instant};
use tribo_core::{
    CancellationToken, RequestContext, Tribo, TriboError, TriboResult, sequence,
};

async fn settle(tribo: &Tribo, expected: usize) -> usize {
    let deadline = Instant::now() + Duration::from_secs(5);
    while tribo.cache_len() != expected && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    tribo.cache_len()
}

/// Results do not depend on history, interleaving or cache size
#[tokio::test]
async fn test_results_independent_of_cache_state() -> TriboResult<()> {
    let ctx = RequestContext::background();
    let small = Tribo::new(0);
    let large = Tribo::new(10_000);

    for n in [1, 500, 37, 2_000, 4, 1_999, 3] {
        let a = small.get(&ctx, n).await?;
        let b = large.get(&ctx, n).await?;
        let c = large.get_blocking(&ctx, n)?;
        let fresh = sequence::nth(n as usize).unwrap().to_string();
        assert_eq!(a.value(), fresh);
        assert_eq!(b, a);
        assert_eq!(c, a);
    }
    Ok(())
}

#[tokio::test]
async fn test_literal_values() -> TriboResult<()> {
    let tribo = Tribo::new(100);
    let ctx = RequestContext::background();
    let want = ["0", "0", "1", "1", "2", "4", "7", "13", "24", "44"];
    for (i, want) in want.iter().enumerate() {
        assert_eq!(tribo.get(&ctx, i as i64 + 1).await?.value(), *want);
    }
    Ok(())
}

#[tokio::test]
async fn test_shutdown_token_cancels_in_flight() {
    let tribo = Tribo::new(100_000);
    let root = CancellationToken::new();
    let ctx = RequestContext::child_of(&root).timeout(Duration::from_secs(60));

    let task = {
        let tribo = tribo.clone();
        tokio::spawn(async move { tribo.get(&ctx, 50_000_000).await })
    };

    tokio::time::sleep(Duration::from_millis(30)).await;
    root.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("cancelled lookup should finish promptly")
        .unwrap();
    assert_eq!(result, Err(TriboError::Cancelled));
    assert_eq!(tribo.cache_len(), 3);
}

#[tokio::test]
async fn test_cache_monotonic_under_mixed_load() {
    let tribo = Tribo::new(1_000);
    let ctx = RequestContext::background();

    let mut previous = tribo.cache_len();
    for n in [10, 5, 400, 200, 1_500, 800, 999] {
        tribo.get(&ctx, n).await.unwrap();
        let len = tribo.cache_len();
        assert!(len >= previous, "cache shrank from {} to {}", previous, len);
        previous = len;
    }
    assert_eq!(settle(&tribo, 1_000).await, 1_000);
}
