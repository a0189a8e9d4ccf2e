//! Batch engine integration tests

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::backends::InstrumentedPoolAdapter;
    use crate::common::{InstrumentedSubscriptionStore, ResourcePoolFactory, SubscriptionFactory};
    use o2ims_gateway::core::batch::{
        BatchErrorKind, BatchOrchestrator, MAX_BATCH_SIZE, MAX_WORKERS,
    };
    use o2ims_gateway::core::traits::{ResourcePoolAdapter, SubscriptionStore};
    use o2ims_gateway::monitoring::{BatchMetrics, BatchOutcome};
    use o2ims_gateway::services::BatchService;
    use o2ims_gateway::utils::error::GatewayError;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    struct Fixture {
        service: BatchService,
        pools: Arc<InstrumentedPoolAdapter>,
        subscriptions: Arc<InstrumentedSubscriptionStore>,
        metrics: Arc<BatchMetrics>,
    }

    fn fixture(pools: InstrumentedPoolAdapter) -> Fixture {
        let metrics = Arc::new(BatchMetrics::new());
        let pools = Arc::new(pools);
        let subscriptions = Arc::new(InstrumentedSubscriptionStore::new());
        let service = BatchService::new(
            Arc::new(BatchOrchestrator::new(metrics.clone())),
            pools.clone(),
            subscriptions.clone(),
        );
        Fixture {
            service,
            pools,
            subscriptions,
            metrics,
        }
    }

    // ==================== Batch size bounds ====================

    #[tokio::test]
    async fn test_every_size_in_bounds_is_accepted() {
        for size in [1, 2, 50, 99, MAX_BATCH_SIZE] {
            let f = fixture(InstrumentedPoolAdapter::new());
            let response = assert_ok!(
                f.service
                    .create_subscriptions(
                        &CancellationToken::new(),
                        SubscriptionFactory::batch(size),
                        false,
                    )
                    .await
            );
            assert_eq!(response.results.len(), size);
            assert_eq!(response.success_count + response.failure_count, size);
        }
    }

    #[tokio::test]
    async fn test_rejection_is_idempotent_and_side_effect_free() {
        let f = fixture(InstrumentedPoolAdapter::new());

        for _ in 0..2 {
            let err = f
                .service
                .create_resource_pools(
                    &CancellationToken::new(),
                    ResourcePoolFactory::batch("rp", MAX_BATCH_SIZE + 1),
                    true,
                )
                .await
                .unwrap_err();
            assert!(matches!(err, GatewayError::Validation(_)));
        }

        assert_eq!(f.pools.create_calls(), 0);
        assert!(f.pools.inner.is_empty());
        let stats = f.metrics.operation_stats("create_resource_pools").unwrap();
        assert_eq!(stats.rejected, 2);
        assert_eq!(f.metrics.recent(1)[0].outcome, BatchOutcome::Rejected);
    }

    // ==================== Ordering and concurrency ====================

    #[tokio::test]
    async fn test_results_follow_request_order() {
        let f = fixture(InstrumentedPoolAdapter::new().with_latency(Duration::from_millis(5)));
        let items = ResourcePoolFactory::batch("ordered", 30);

        let response = assert_ok!(
            f.service
                .create_resource_pools(&CancellationToken::new(), items, false)
                .await
        );

        for (index, result) in response.results.iter().enumerate() {
            assert_eq!(result.index, index);
            let data = result.data.as_ref().unwrap();
            assert_eq!(data["resourcePoolId"], format!("ordered-{}", index));
        }
    }

    #[tokio::test]
    async fn test_slow_batch_respects_worker_limit() {
        let f = fixture(InstrumentedPoolAdapter::new().with_latency(Duration::from_millis(20)));

        let response = assert_ok!(
            f.service
                .create_resource_pools(
                    &CancellationToken::new(),
                    ResourcePoolFactory::batch("slow", 50),
                    false,
                )
                .await
        );

        assert_eq!(response.success_count, 50);
        assert!(f.pools.gauge.peak() <= MAX_WORKERS);
        assert!(f.pools.gauge.peak() > 1);
    }

    // ==================== Atomic semantics ====================

    #[tokio::test]
    async fn test_atomic_create_compensates_successes() {
        let f = fixture(InstrumentedPoolAdapter::new().failing_create("pool-b"));
        let items = vec![
            ResourcePoolFactory::with_id("a"),
            ResourcePoolFactory::with_id("b"),
            ResourcePoolFactory::with_id("c"),
        ];

        let response = assert_ok!(
            f.service
                .create_resource_pools(&CancellationToken::new(), items, true)
                .await
        );

        assert_eq!(response.success_count, 0);
        assert_eq!(response.failure_count, 3);
        assert_eq!(response.status_code(), 400);
        assert_eq!(
            response.results[0].error_kind(),
            Some(BatchErrorKind::RolledBack)
        );
        assert_eq!(response.results[1].status_code, 502);
        assert_eq!(
            response.results[2].error_kind(),
            Some(BatchErrorKind::RolledBack)
        );

        let mut undone = f.pools.delete_calls();
        undone.sort();
        assert_eq!(undone, vec!["a".to_string(), "c".to_string()]);
        assert!(f.pools.inner.is_empty());
    }

    #[tokio::test]
    async fn test_failed_compensation_is_not_retried() {
        let f = fixture(
            InstrumentedPoolAdapter::new()
                .failing_create("pool-b")
                .failing_delete("a"),
        );
        let items = vec![
            ResourcePoolFactory::with_id("a"),
            ResourcePoolFactory::with_id("b"),
        ];

        let response = assert_ok!(
            f.service
                .create_resource_pools(&CancellationToken::new(), items, true)
                .await
        );

        assert_eq!(response.failure_count, 2);
        assert_eq!(f.pools.delete_calls(), vec!["a".to_string()]);
        // The artifact is left behind; the caller still sees a rolled back item.
        assert!(f.pools.inner.contains("a"));
        assert_eq!(
            response.results[0].error_kind(),
            Some(BatchErrorKind::RolledBack)
        );
    }

    #[tokio::test]
    async fn test_atomic_delete_with_missing_target_deletes_nothing() {
        let f = fixture(InstrumentedPoolAdapter::new());
        assert_ok!(
            f.pools
                .create_resource_pool(ResourcePoolFactory::with_id("A"))
                .await
        );

        let response = assert_ok!(
            f.service
                .delete_resource_pools(
                    &CancellationToken::new(),
                    vec!["A".to_string(), "B".to_string()],
                    true,
                )
                .await
        );

        assert_eq!(response.success_count, 0);
        assert_eq!(response.failure_count, 2);
        assert!(f.pools.delete_calls().is_empty());
        assert!(f.pools.inner.contains("A"));
    }

    #[tokio::test]
    async fn test_non_atomic_partial_failure() {
        let f = fixture(InstrumentedPoolAdapter::new());
        let response = assert_ok!(
            f.service
                .create_subscriptions(
                    &CancellationToken::new(),
                    vec![
                        SubscriptionFactory::create(),
                        SubscriptionFactory::invalid(),
                        SubscriptionFactory::create(),
                    ],
                    false,
                )
                .await
        );

        assert_eq!(response.success_count, 2);
        assert_eq!(response.failure_count, 1);
        assert!(!response.success);
        assert_eq!(response.status_code(), 207);
        assert_eq!(f.subscriptions.inner.len(), 2);
    }

    // ==================== Cancellation ====================

    #[tokio::test]
    async fn test_pre_canceled_batch_touches_no_backend() {
        let f = fixture(InstrumentedPoolAdapter::new());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let created = assert_ok!(
            f.service
                .create_subscriptions(&cancel, SubscriptionFactory::batch(5), false)
                .await
        );
        let deleted = assert_ok!(
            f.service
                .delete_subscriptions(&cancel, vec!["x".to_string(), "y".to_string()], false)
                .await
        );

        assert_eq!(f.subscriptions.total_calls(), 0);
        for response in [&created, &deleted] {
            assert_eq!(response.success_count, 0);
            assert!(
                response
                    .results
                    .iter()
                    .all(|r| r.error_kind() == Some(BatchErrorKind::Canceled))
            );
        }
    }

    #[tokio::test]
    async fn test_deadline_mid_batch_cancels_unstarted_items() {
        let f = fixture(InstrumentedPoolAdapter::new().with_latency(Duration::from_millis(50)));
        let cancel = CancellationToken::new();
        let timer = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            timer.cancel();
        });

        let response = assert_ok!(
            f.service
                .create_resource_pools(&cancel, ResourcePoolFactory::batch("late", 30), false)
                .await
        );

        // The first wave was already in flight and completes.
        assert_eq!(response.success_count, MAX_WORKERS);
        assert_eq!(response.failure_count, 30 - MAX_WORKERS);
        assert_eq!(f.pools.create_calls(), MAX_WORKERS);
        assert_eq!(
            response
                .results
                .iter()
                .filter(|r| r.error_kind() == Some(BatchErrorKind::Canceled))
                .count(),
            30 - MAX_WORKERS
        );
    }

    // ==================== Subscriptions end to end ====================

    #[tokio::test]
    async fn test_subscription_create_then_atomic_delete() {
        let f = fixture(InstrumentedPoolAdapter::new());
        let created = assert_ok!(
            f.service
                .create_subscriptions(&CancellationToken::new(), SubscriptionFactory::batch(3), true)
                .await
        );
        let ids: Vec<String> = created
            .results
            .iter()
            .map(|r| r.data.as_ref().unwrap()["subscriptionId"].as_str().unwrap().to_string())
            .collect();

        let deleted = assert_ok!(
            f.service
                .delete_subscriptions(&CancellationToken::new(), ids.clone(), true)
                .await
        );
        assert!(deleted.success);
        assert_eq!(deleted.status_code(), 200);
        for id in &ids {
            assert!(f.subscriptions.inner.get(id).await.is_err());
        }
        assert_eq!(f.metrics.total_calls(), 2);
    }
}
