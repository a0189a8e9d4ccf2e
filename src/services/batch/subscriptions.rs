//! Subscription batch families

use super::{BatchService, item_data, lookup_probe, missing_item, operations, outcome_from};
use crate::core::batch::{
    BatchConfig, BatchPlan, BatchResponse, compensate, item_operation, rollback_operation,
};
use crate::core::models::SubscriptionCreate;
use crate::utils::error::Result;
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

impl BatchService {
    /// Create subscriptions concurrently; atomic batches delete what was
    /// created when any item fails
    pub async fn create_subscriptions(
        &self,
        cancel: &CancellationToken,
        subscriptions: Vec<SubscriptionCreate>,
        atomic: bool,
    ) -> Result<BatchResponse> {
        let config = BatchConfig::new(operations::CREATE_SUBSCRIPTIONS, subscriptions.len())
            .with_atomic(atomic)
            .with_worker_pool(true);
        let items = Arc::new(subscriptions);

        let store = self.subscriptions.clone();
        let operation = item_operation(move |_cancel, index| {
            let store = store.clone();
            let item = items.get(index).cloned();
            async move {
                let Some(item) = item else {
                    return missing_item(index);
                };
                outcome_from(index, 201, store.create(item).await, |created| {
                    (
                        item_data("subscription", created),
                        Some(created.subscription_id.clone()),
                    )
                })
            }
        });

        let store = self.subscriptions.clone();
        let rollback = rollback_operation(move |_cancel, ids| {
            let store = store.clone();
            async move {
                compensate(&ids, |id| {
                    let store = store.clone();
                    async move { store.delete(&id).await }
                })
                .await
            }
        });

        let plan = BatchPlan::new(config, operation).with_rollback(rollback);
        self.orchestrator.run(cancel, plan).await
    }

    /// Delete subscriptions one at a time; atomic batches first confirm
    /// every target exists
    pub async fn delete_subscriptions(
        &self,
        cancel: &CancellationToken,
        subscription_ids: Vec<String>,
        atomic: bool,
    ) -> Result<BatchResponse> {
        let config = BatchConfig::new(operations::DELETE_SUBSCRIPTIONS, subscription_ids.len())
            .with_atomic(atomic)
            .with_worker_pool(false);
        let ids = Arc::new(subscription_ids);

        let store = self.subscriptions.clone();
        let targets = ids.clone();
        let operation = item_operation(move |_cancel, index| {
            let store = store.clone();
            let id = targets.get(index).cloned();
            async move {
                let Some(id) = id else {
                    return missing_item(index);
                };
                outcome_from(index, 200, store.delete(&id).await, |_| {
                    (json!({ "subscriptionId": id }), None)
                })
            }
        });

        let mut plan = BatchPlan::new(config, operation);
        if atomic {
            let store = self.subscriptions.clone();
            let probe = lookup_probe("subscription", move |id: String| {
                let store = store.clone();
                async move { store.get(&id).await }
            });
            plan = plan.with_precheck(ids.as_ref().clone(), probe);
        }
        self.orchestrator.run(cancel, plan).await
    }
}
